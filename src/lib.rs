//! # mtsp-hybrid
//!
//! Hybrid solver for the multiple traveling salesman problem (m-TSP):
//! a swarm clusterer partitions the cities into balanced groups, then an
//! independent pheromone router builds a closed tour for each group.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Point, Partition, Candidate, Route, MtspSolution)
//! - [`distance`] — Shared read-only Euclidean distance matrix
//! - [`smo`] — Swarm clusterer (spider monkey optimization over balanced partitions)
//! - [`aco`] — Pheromone router (ant colony tour construction per cluster)
//! - [`solver`] — Hybrid orchestrator tying clustering and routing together
//! - [`error`] — Error and result types

pub mod aco;
pub mod distance;
pub mod error;
pub mod models;
pub mod smo;
pub mod solver;

pub use error::{Error, Result};
