//! Pheromone router: ant colony optimization over one cluster.
//!
//! Constructs and refines a closed visiting tour for a single cluster's
//! cities. Each iteration a batch of ants builds tours in parallel against
//! a frozen pheromone snapshot; evaporation and the reduced deposits are
//! applied once all ants finish.
//!
//! - [`AcoParams`] — ant count, iteration budget, `alpha`/`beta`/`rho`/`q`
//! - [`PheromoneMatrix`] — per-cluster directed pheromone intensities
//! - [`route`] — runs the colony and returns the best tour found

mod colony;
mod params;
mod pheromone;

pub use colony::route;
pub use params::AcoParams;
pub use pheromone::PheromoneMatrix;
