//! Swarm clusterer: spider monkey optimization over balanced partitions.
//!
//! Evolves a population of candidate city→salesman assignments toward
//! compact, balanced clusters. Candidates live in a flat arena; sub-groups
//! are index ranges into it, so fission and fusion only reshape the range
//! list. Leaders are frozen snapshots re-elected after each phase.
//!
//! - [`SmoParams`] — iteration budget, population size, stagnation limits,
//!   perturbation rate
//! - [`cluster`] — runs the full algorithm and returns the best partition

mod clusterer;
mod params;
mod perturb;
mod population;

pub use clusterer::cluster;
pub use params::SmoParams;

pub(crate) use perturb::{perturb, sse};
