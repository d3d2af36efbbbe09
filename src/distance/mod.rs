//! Pairwise Euclidean distances.
//!
//! Provides the dense distance matrix shared read-only by the clusterer and
//! every router instance, plus the nearest-neighbor tour estimate used to
//! seed pheromone levels.

mod matrix;

pub use matrix::DistanceMatrix;
