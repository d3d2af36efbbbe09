//! Domain model types for the hybrid m-TSP engine.
//!
//! Provides the core abstractions: immutable points identified by city id,
//! balanced partitions of cities among salesmen, swarm candidates (a
//! partition plus its fitness), routes as closed-tour permutations of one
//! cluster, and the aggregate solution returned by the orchestrator.

mod candidate;
mod partition;
mod point;
mod route;
mod solution;

pub use candidate::Candidate;
pub use partition::Partition;
pub use point::Point;
pub use route::Route;
pub use solution::MtspSolution;

pub(crate) use point::points_from_coords;
