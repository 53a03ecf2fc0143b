//! Correlation engine for multi-messenger astronomy.
//!
//! This crate contains the fundamental types and logic for:
//! - Geometry: great-circle angular separation between sky positions
//! - Scoring: spatiotemporal confidence for candidate pairs
//! - Correlation: pairwise windowing over normalized detection events
//! - Clustering: grouping correlated pairs into connected groups
//!
//! The engine is a set of pure functions over in-memory data. It performs
//! no I/O, holds no state between runs, and defines no threads or async
//! boundaries, so it can be called from any scheduling context; concurrent
//! invocations operate on their own inputs with nothing shared.

pub mod classify;
pub mod cluster;
pub mod correlate;
pub mod event;
pub mod geometry;
pub mod scoring;
pub mod temporal;
pub mod types;

pub use classify::{CorrelationType, UnknownCorrelationType, correlation_type};
pub use cluster::{Cluster, ClusterAlgorithm, find_clusters, find_clusters_with};
pub use correlate::{CorrelateError, CorrelationParams, EventPair, correlate};
pub use event::{Event, MessengerType};
pub use geometry::angular_separation;
pub use scoring::{SPATIAL_WEIGHT, TIME_WEIGHT, confidence_score};
pub use temporal::time_difference;
pub use types::{ClusterId, Confidence, EventId, ValidationError};
