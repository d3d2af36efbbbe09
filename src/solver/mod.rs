//! Hybrid orchestrator: cluster once, then route every cluster.
//!
//! Runs the swarm clusterer to partition the cities among the salesmen,
//! hands each cluster to an independent pheromone router (the routers share
//! only the read-only distance matrix and run in parallel), and aggregates
//! the routes and total length.

use log::info;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::aco::{self, AcoParams};
use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::{points_from_coords, MtspSolution, Partition, Point, Route};
use crate::smo::{self, SmoParams};

/// The hybrid m-TSP solver.
///
/// Construction validates all inputs synchronously; [`solve`](Self::solve)
/// then runs to completion and returns the per-salesman routes with their
/// combined length. A fixed seed makes a run reproducible.
///
/// # Examples
///
/// ```
/// use mtsp_hybrid::solver::HybridSolver;
/// use mtsp_hybrid::smo::SmoParams;
/// use mtsp_hybrid::aco::AcoParams;
///
/// let coords = [
///     (0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0),
///     (100.0, 100.0), (101.0, 100.0), (100.0, 101.0), (101.0, 101.0),
/// ];
/// let solver = HybridSolver::from_coords(
///     &coords,
///     2,
///     SmoParams::default().with_iterations(20).with_population_size(10),
///     AcoParams::default().with_ants(8).with_iterations(30),
/// )
/// .unwrap()
/// .with_seed(42);
///
/// let solution = solver.solve().unwrap();
/// assert_eq!(solution.num_routes(), 2);
/// assert!(solution.covers_all_cities(8));
/// ```
#[derive(Debug, Clone)]
pub struct HybridSolver {
    points: Vec<Point>,
    num_salesmen: usize,
    smo_params: SmoParams,
    aco_params: AcoParams,
    seed: Option<u64>,
}

impl HybridSolver {
    /// Creates a solver over an already-built point set.
    ///
    /// Rejects an empty point set, a zero salesman count, a city count not
    /// divisible by the salesman count, point ids that are not `0..n` in
    /// order, and invalid parameters — all before any iteration runs.
    pub fn new(
        points: Vec<Point>,
        num_salesmen: usize,
        smo_params: SmoParams,
        aco_params: AcoParams,
    ) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::invalid_input("point set is empty"));
        }
        if num_salesmen == 0 {
            return Err(Error::invalid_input("salesman count must be positive"));
        }
        if points.len() % num_salesmen != 0 {
            return Err(Error::invalid_input(format!(
                "{} cities are not divisible by {} salesmen",
                points.len(),
                num_salesmen
            )));
        }
        if let Some((index, point)) = points.iter().enumerate().find(|(i, p)| p.id() != *i) {
            return Err(Error::invalid_input(format!(
                "point at index {index} has id {} (ids must be 0..n in order)",
                point.id()
            )));
        }
        smo_params.validate(num_salesmen)?;
        aco_params.validate()?;
        Ok(Self {
            points,
            num_salesmen,
            smo_params,
            aco_params,
            seed: None,
        })
    }

    /// Creates a solver from an ordered `(x, y)` sequence; city ids are the
    /// sequence positions.
    pub fn from_coords(
        coords: &[(f64, f64)],
        num_salesmen: usize,
        smo_params: SmoParams,
        aco_params: AcoParams,
    ) -> Result<Self> {
        Self::new(
            points_from_coords(coords),
            num_salesmen,
            smo_params,
            aco_params,
        )
    }

    /// Fixes the master random seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The input points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The salesman count.
    pub fn num_salesmen(&self) -> usize {
        self.num_salesmen
    }

    /// Runs the full hybrid pipeline synchronously.
    ///
    /// Clusters once, routes every cluster in parallel, and returns one
    /// route per salesman plus the combined length. Fatal sub-engine errors
    /// propagate unchanged; there are no retries.
    pub fn solve(&self) -> Result<MtspSolution> {
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::rng().random()),
        };

        info!(
            "solver: start n={} m={}",
            self.points.len(),
            self.num_salesmen
        );
        let distances = DistanceMatrix::from_points(&self.points);

        let partition = smo::cluster(&self.points, self.num_salesmen, &self.smo_params, &mut rng)?;
        let clusters = partition.members_by_cluster();
        if let Some(c) = clusters.iter().position(|members| members.is_empty()) {
            return Err(Error::internal(format!("cluster {c} is empty")));
        }

        // Routers are mutually independent: disjoint city subsets, disjoint
        // pheromone matrices, shared read-only distances.
        let seeds: Vec<u64> = (0..clusters.len()).map(|_| rng.random()).collect();
        let routes: Vec<Route> = clusters
            .par_iter()
            .zip(seeds.par_iter())
            .map(|(cluster, &seed)| {
                let mut router_rng = ChaCha8Rng::seed_from_u64(seed);
                aco::route(cluster, &distances, &self.aco_params, &mut router_rng)
            })
            .collect::<Result<_>>()?;

        let solution = MtspSolution::new(routes);
        info!(
            "solver: done routes={} total_length={:.4}",
            solution.num_routes(),
            solution.total_length()
        );
        Ok(solution)
    }
}

/// Baseline solution from a random balanced assignment and random visiting
/// orders. Used as a statistical sanity bound on the optimized result.
pub fn random_baseline(points: &[Point], num_salesmen: usize, rng: &mut impl Rng) -> Result<MtspSolution> {
    if points.is_empty() {
        return Err(Error::invalid_input("point set is empty"));
    }
    if num_salesmen == 0 || points.len() % num_salesmen != 0 {
        return Err(Error::invalid_input(format!(
            "{} cities are not divisible by {} salesmen",
            points.len(),
            num_salesmen
        )));
    }

    let distances = DistanceMatrix::from_points(points);
    let partition = Partition::random_balanced(points.len(), num_salesmen, rng);
    let routes = partition
        .members_by_cluster()
        .into_iter()
        .map(|mut cluster| {
            cluster.shuffle(rng);
            let length = distances.closed_tour_length(&cluster);
            Route::new(cluster, length)
        })
        .collect();
    Ok(MtspSolution::new(routes))
}
