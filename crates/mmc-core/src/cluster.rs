//! Cluster builder: groups correlated pairs into multi-event groups.
//!
//! Operates on the confidence-sorted pair list the correlator emits. The
//! default strategy reproduces the engine's historical single-pass scan,
//! which is order dependent: each cluster seed makes one forward sweep over
//! the remaining pairs, so a transitive link that only becomes visible
//! through a pair earlier in the list than the sweep's current position is
//! not picked up. [`ClusterAlgorithm::Transitive`] iterates to a fixpoint
//! instead and yields full connected components.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::correlate::EventPair;
use crate::event::Event;
use crate::types::{ClusterId, EventId, ValidationError};

/// Which grouping strategy [`find_clusters_with`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterAlgorithm {
    /// One forward sweep over the pair list per cluster seed. May
    /// under-merge on adverse pair orderings.
    #[default]
    SinglePass,
    /// Full connected components over the pair graph, independent of pair
    /// order.
    Transitive,
}

impl ClusterAlgorithm {
    /// String representation for configuration and CLI flags.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SinglePass => "single-pass",
            Self::Transitive => "transitive",
        }
    }
}

impl fmt::Display for ClusterAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusterAlgorithm {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single-pass" | "single_pass" => Ok(Self::SinglePass),
            "transitive" => Ok(Self::Transitive),
            _ => Err(ValidationError::InvalidClusterAlgorithm {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for ClusterAlgorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClusterAlgorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A group of events transitively connected through qualifying pairs.
///
/// Produced per clustering run with a freshly generated identifier; clusters
/// have no existence beyond the call that created them unless the caller
/// persists them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Generated identifier (UUID v4), fresh per run.
    pub id: ClusterId,

    /// Member events, in the order they were claimed.
    pub events: Vec<Event>,

    /// Number of member events. At least 2.
    pub size: usize,

    /// Timestamp of the earliest member detection.
    pub first_event_at: DateTime<Utc>,

    /// Timestamp of the latest member detection.
    pub last_event_at: DateTime<Utc>,
}

/// Groups correlated pairs into clusters using the default single-pass
/// strategy.
///
/// Every event appears in at most one cluster: once claimed, an event stays
/// with the cluster that claimed it first, under the pair-iteration order.
/// Events that were in no qualifying pair appear in no cluster, and a
/// minimal cluster has exactly two events.
#[must_use]
pub fn find_clusters(pairs: &[EventPair]) -> Vec<Cluster> {
    single_pass(pairs)
}

/// Groups correlated pairs into clusters using the chosen strategy.
#[must_use]
pub fn find_clusters_with(pairs: &[EventPair], algorithm: ClusterAlgorithm) -> Vec<Cluster> {
    let clusters = match algorithm {
        ClusterAlgorithm::SinglePass => single_pass(pairs),
        ClusterAlgorithm::Transitive => transitive(pairs),
    };
    tracing::debug!(
        pairs = pairs.len(),
        clusters = clusters.len(),
        %algorithm,
        "clustering complete"
    );
    clusters
}

/// One forward sweep per seed. Order dependent.
fn single_pass(pairs: &[EventPair]) -> Vec<Cluster> {
    let mut claimed: HashSet<EventId> = HashSet::new();
    let mut clusters = Vec::new();

    for (seed_index, seed) in pairs.iter().enumerate() {
        if claimed.contains(&seed.event1.id) && claimed.contains(&seed.event2.id) {
            // Both endpoints consumed by earlier clusters; nothing new here.
            continue;
        }

        // Seed from the unclaimed endpoints. An endpoint already claimed
        // stays with the cluster that claimed it first.
        let mut member_ids: HashSet<EventId> = HashSet::new();
        let mut members: Vec<Event> = Vec::new();
        for event in [&seed.event1, &seed.event2] {
            if claimed.insert(event.id.clone()) {
                member_ids.insert(event.id.clone());
                members.push(event.clone());
            }
        }

        // One sweep over the pairs after the seed. A link that would only
        // connect through an already-swept position is not revisited.
        for pair in &pairs[seed_index + 1..] {
            let has1 = member_ids.contains(&pair.event1.id);
            let has2 = member_ids.contains(&pair.event2.id);
            if has1 == has2 {
                continue;
            }
            let outsider = if has1 { &pair.event2 } else { &pair.event1 };
            if claimed.insert(outsider.id.clone()) {
                member_ids.insert(outsider.id.clone());
                members.push(outsider.clone());
            }
        }

        if members.len() < 2 {
            // A half-claimed seed that attracted nothing groups no one; its
            // event is released for later seeds.
            for event in &members {
                claimed.remove(&event.id);
            }
            continue;
        }

        clusters.push(build_cluster(members));
    }

    clusters
}

/// Connected components: sweep the full pair list to a fixpoint per seed.
fn transitive(pairs: &[EventPair]) -> Vec<Cluster> {
    let mut claimed: HashSet<EventId> = HashSet::new();
    let mut clusters = Vec::new();

    for seed in pairs {
        if claimed.contains(&seed.event1.id) || claimed.contains(&seed.event2.id) {
            // The component containing this pair was already emitted.
            continue;
        }

        let mut member_ids: HashSet<EventId> = HashSet::new();
        let mut members: Vec<Event> = Vec::new();
        for event in [&seed.event1, &seed.event2] {
            if member_ids.insert(event.id.clone()) {
                claimed.insert(event.id.clone());
                members.push(event.clone());
            }
        }

        loop {
            let mut changed = false;
            for pair in pairs {
                let has1 = member_ids.contains(&pair.event1.id);
                let has2 = member_ids.contains(&pair.event2.id);
                if has1 == has2 {
                    continue;
                }
                let outsider = if has1 { &pair.event2 } else { &pair.event1 };
                if !claimed.contains(&outsider.id) {
                    claimed.insert(outsider.id.clone());
                    member_ids.insert(outsider.id.clone());
                    members.push(outsider.clone());
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        clusters.push(build_cluster(members));
    }

    clusters
}

/// Create a cluster from claimed members.
///
/// # Panics
///
/// Panics if `members` has fewer than two events; both strategies only emit
/// clusters after collecting at least a full pair.
fn build_cluster(members: Vec<Event>) -> Cluster {
    assert!(
        members.len() >= 2,
        "build_cluster called with fewer than two members"
    );
    let id =
        ClusterId::new(uuid::Uuid::new_v4().to_string()).expect("UUID v4 string is never empty");

    // SAFETY: members is guaranteed non-empty by the assert above
    let first_event_at = members.iter().map(|e| e.detected_at).min().unwrap();
    let last_event_at = members.iter().map(|e| e.detected_at).max().unwrap();

    Cluster {
        id,
        size: members.len(),
        first_event_at,
        last_event_at,
        events: members,
    }
}
