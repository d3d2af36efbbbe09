//! Ant colony tour construction and reinforcement.

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::aco::{AcoParams, PheromoneMatrix};
use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::Route;

/// Stagnation check cadence: if the best length has not moved between two
/// consecutive checkpoints, the colony stops early.
const CHECKPOINT_EVERY: usize = 100;

/// Heuristic weight substitute for zero-length edges (coincident points).
const ZERO_DISTANCE_ETA: f64 = 1e9;

/// Builds a closed tour over one cluster's cities.
///
/// `cluster` lists global city ids; `distances` is the full shared matrix.
/// Clusters of one or two cities return the trivial route without running
/// the colony. The returned route is the best tour seen across all
/// iterations (elitist retention), rotated to start at the cluster's first
/// city; its length includes the closing edge.
///
/// # Errors
///
/// `InvalidInput` if the cluster is empty, a city id is out of range for
/// the matrix, or the parameters fail validation.
///
/// # Examples
///
/// ```
/// use mtsp_hybrid::aco::{route, AcoParams};
/// use mtsp_hybrid::distance::DistanceMatrix;
/// use mtsp_hybrid::models::Point;
/// use rand_chacha::ChaCha8Rng;
/// use rand::SeedableRng;
///
/// let points = vec![
///     Point::new(0, 0.0, 0.0),
///     Point::new(1, 1.0, 0.0),
///     Point::new(2, 1.0, 1.0),
///     Point::new(3, 0.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// let params = AcoParams::default().with_ants(8).with_iterations(40);
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
///
/// let r = route(&[0, 1, 2, 3], &dm, &params, &mut rng).unwrap();
/// assert_eq!(r.len(), 4);
/// assert!((r.length() - 4.0).abs() < 1e-9);
/// ```
pub fn route(
    cluster: &[usize],
    distances: &DistanceMatrix,
    params: &AcoParams,
    rng: &mut impl Rng,
) -> Result<Route> {
    if cluster.is_empty() {
        return Err(Error::invalid_input("cluster is empty"));
    }
    if let Some(&city) = cluster.iter().find(|&&c| c >= distances.size()) {
        return Err(Error::invalid_input(format!(
            "city id {city} out of range for distance matrix of size {}",
            distances.size()
        )));
    }
    params.validate()?;

    let k = cluster.len();
    if k <= 2 {
        let length = distances.closed_tour_length(cluster);
        return Ok(Route::new(cluster.to_vec(), length));
    }

    // Seed pheromone from the greedy tour estimate, as a uniform level
    // proportional to 1 / (k * L_nn).
    let nn_length = distances.nearest_neighbor_tour_length(cluster);
    let initial = if nn_length > 0.0 {
        1.0 / (k as f64 * nn_length)
    } else {
        1.0
    };
    let mut pheromone = PheromoneMatrix::new(k, initial);

    info!(
        "aco: start k={} ants={} iterations={}",
        k, params.ants, params.iterations
    );

    let mut best_tour: Vec<usize> = Vec::new();
    let mut best_length = f64::INFINITY;
    let mut checkpoint_best = f64::INFINITY;

    for iteration in 0..params.iterations {
        // All ants walk against the same frozen pheromone snapshot; the
        // matrix is only touched after the whole batch finishes.
        let seeds: Vec<u64> = (0..params.ants).map(|_| rng.random()).collect();
        let tours: Vec<(Vec<usize>, f64)> = seeds
            .into_par_iter()
            .map(|seed| {
                let mut ant_rng = ChaCha8Rng::seed_from_u64(seed);
                construct_tour(cluster, distances, &pheromone, params, &mut ant_rng)
            })
            .collect();

        for (tour, length) in &tours {
            if *length < best_length {
                best_length = *length;
                best_tour = tour.clone();
            }
        }

        pheromone.evaporate(params.rho);
        for (tour, length) in &tours {
            deposit_tour(&mut pheromone, tour, *length, params.q);
        }

        if iteration % CHECKPOINT_EVERY == 0 || iteration + 1 == params.iterations {
            debug!("aco: iteration={} best_length={:.4}", iteration, best_length);
            if iteration > 0 && best_length == checkpoint_best {
                debug!("aco: stagnant checkpoint, stopping early");
                break;
            }
            checkpoint_best = best_length;
        }
    }

    // Rotate so the cluster's first city leads; stable across runs that
    // find the same cycle in different phases.
    let offset = best_tour.iter().position(|&c| c == 0).unwrap_or(0);
    let ordered: Vec<usize> = (0..k).map(|i| cluster[best_tour[(offset + i) % k]]).collect();

    info!("aco: done k={} best_length={:.4}", k, best_length);
    Ok(Route::new(ordered, best_length))
}

/// One ant's walk: starts at a random city and repeatedly picks the next
/// unvisited city by roulette over `τ^α · (1/d)^β`. Returns the local-index
/// tour and its closed length.
fn construct_tour(
    cluster: &[usize],
    distances: &DistanceMatrix,
    pheromone: &PheromoneMatrix,
    params: &AcoParams,
    rng: &mut impl Rng,
) -> (Vec<usize>, f64) {
    let k = cluster.len();
    let mut tour = Vec::with_capacity(k);
    let mut visited = vec![false; k];

    let start = rng.random_range(0..k);
    tour.push(start);
    visited[start] = true;

    let mut current = start;
    for _ in 1..k {
        let next = select_next(cluster, distances, pheromone, params, current, &visited, rng);
        tour.push(next);
        visited[next] = true;
        current = next;
    }

    let mut length = 0.0;
    for pair in tour.windows(2) {
        length += distances.get(cluster[pair[0]], cluster[pair[1]]);
    }
    length += distances.get(cluster[tour[k - 1]], cluster[tour[0]]);

    (tour, length)
}

/// Roulette-wheel transition rule. Falls back to a uniform draw over the
/// unvisited cities when the weight mass underflows to zero.
fn select_next(
    cluster: &[usize],
    distances: &DistanceMatrix,
    pheromone: &PheromoneMatrix,
    params: &AcoParams,
    current: usize,
    visited: &[bool],
    rng: &mut impl Rng,
) -> usize {
    let k = cluster.len();
    let mut weights = vec![0.0; k];
    let mut sum = 0.0;

    for j in 0..k {
        if visited[j] {
            continue;
        }
        let tau = pheromone.get(current, j);
        let d = distances.get(cluster[current], cluster[j]);
        let eta = if d > 0.0 { 1.0 / d } else { ZERO_DISTANCE_ETA };
        let w = tau.powf(params.alpha) * eta.powf(params.beta);
        if w.is_finite() {
            weights[j] = w;
            sum += w;
        }
    }

    if sum <= 0.0 || !sum.is_finite() {
        let remaining: Vec<usize> = (0..k).filter(|&j| !visited[j]).collect();
        return remaining[rng.random_range(0..remaining.len())];
    }

    let r = rng.random::<f64>() * sum;
    let mut cumulative = 0.0;
    let mut fallback = current;
    for j in 0..k {
        if visited[j] {
            continue;
        }
        cumulative += weights[j];
        fallback = j;
        if r <= cumulative {
            return j;
        }
    }
    // Rounding pushed r past the final cumulative sum.
    fallback
}

/// Reinforces every edge of one ant's closed tour, in both directions,
/// with `q / length`. Zero-length tours (all coincident points) deposit
/// nothing.
fn deposit_tour(pheromone: &mut PheromoneMatrix, tour: &[usize], length: f64, q: f64) {
    if length <= 0.0 {
        return;
    }
    let amount = q / length;
    let k = tour.len();
    for pair in tour.windows(2) {
        pheromone.deposit(pair[0], pair[1], amount);
        pheromone.deposit(pair[1], pair[0], amount);
    }
    pheromone.deposit(tour[k - 1], tour[0], amount);
    pheromone.deposit(tour[0], tour[k - 1], amount);
}
