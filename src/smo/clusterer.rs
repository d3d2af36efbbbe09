//! The swarm clusterer's phase loop.

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::models::{Candidate, Partition, Point};
use crate::smo::population::Population;
use crate::smo::{perturb, sse, SmoParams};

/// Log progress every this many iterations.
const PROGRESS_EVERY: usize = 20;

/// Partitions `points` into `num_clusters` balanced clusters.
///
/// Runs the spider monkey phases for the configured iteration budget and
/// returns the global leader's partition. With a single cluster the
/// population stays one sub-group and the search degenerates to a local
/// search, as fission would be meaningless.
///
/// # Errors
///
/// `InvalidInput` if the point set is empty, the city count is not
/// divisible by `num_clusters`, or the parameters fail validation.
/// `InternalInvariant` if a balance repair cannot converge.
///
/// # Examples
///
/// ```
/// use mtsp_hybrid::models::Point;
/// use mtsp_hybrid::smo::{cluster, SmoParams};
/// use rand_chacha::ChaCha8Rng;
/// use rand::SeedableRng;
///
/// let points: Vec<Point> = (0..8)
///     .map(|i| Point::new(i, i as f64, 0.0))
///     .collect();
/// let params = SmoParams::default().with_iterations(10).with_population_size(10);
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
///
/// let partition = cluster(&points, 2, &params, &mut rng).unwrap();
/// assert!(partition.is_balanced());
/// assert_eq!(partition.num_clusters(), 2);
/// ```
pub fn cluster(
    points: &[Point],
    num_clusters: usize,
    params: &SmoParams,
    rng: &mut impl Rng,
) -> Result<Partition> {
    if points.is_empty() {
        return Err(Error::invalid_input("point set is empty"));
    }
    if num_clusters == 0 {
        return Err(Error::invalid_input("cluster count must be positive"));
    }
    if points.len() % num_clusters != 0 {
        return Err(Error::invalid_input(format!(
            "{} cities are not divisible into {} clusters",
            points.len(),
            num_clusters
        )));
    }
    params.validate(num_clusters)?;

    let n = points.len();
    let candidates: Vec<Candidate> = (0..params.population_size)
        .map(|_| {
            let partition = Partition::random_balanced(n, num_clusters, rng);
            let fitness = sse(&partition, points);
            Candidate::new(partition, fitness)
        })
        .collect();
    let mut population = Population::new(candidates);

    // Single-cluster runs skip sub-grouping entirely.
    let max_groups = if num_clusters == 1 {
        1
    } else {
        (params.population_size / 5).max(1)
    };

    info!(
        "smo: start n={} m={} population={} iterations={} initial_fitness={:.4}",
        n,
        num_clusters,
        params.population_size,
        params.iterations,
        population.global_leader().fitness
    );

    for iteration in 0..params.iterations {
        local_leader_phase(&mut population, points, params.perturbation_rate, rng)?;
        global_leader_phase(&mut population, points, params.perturbation_rate, rng)?;
        population.reelect_leaders();
        local_leader_decision(&mut population, points, params, rng)?;
        global_leader_decision(&mut population, params, max_groups);

        if iteration % PROGRESS_EVERY == 0 || iteration + 1 == params.iterations {
            debug!(
                "smo: iteration={} groups={} best_fitness={:.4}",
                iteration,
                population.num_groups(),
                population.global_leader().fitness
            );
        }
    }

    info!(
        "smo: done best_fitness={:.4}",
        population.global_leader().fitness
    );
    Ok(population.global_leader().partition.clone())
}

/// Local leader phase: every non-leader candidate proposes a perturbation
/// toward its frozen sub-group leader mixed with a random peer from the same
/// sub-group, accepted greedily (not worse).
///
/// Proposals read only frozen leader snapshots and write each to their own
/// slot, so they run in parallel with one seeded RNG per candidate.
fn local_leader_phase(
    population: &mut Population,
    points: &[Point],
    rate: f64,
    rng: &mut impl Rng,
) -> Result<()> {
    let leaders = population.local_leaders().to_vec();
    let groups: Vec<_> = population.groups().to_vec();
    let group_of = population.group_of_each();
    let seeds: Vec<u64> = (0..population.len()).map(|_| rng.random()).collect();

    let candidates = population.candidates();
    let proposals: Vec<Option<Candidate>> = (0..candidates.len())
        .into_par_iter()
        .map(|i| {
            let g = group_of[i];
            let leader = &leaders[g];
            let range = &groups[g];
            if i == leader.index || range.len() < 2 {
                return Ok(None);
            }
            let mut task_rng = ChaCha8Rng::seed_from_u64(seeds[i]);
            let peer = loop {
                let k = task_rng.random_range(range.clone());
                if k != i {
                    break k;
                }
            };

            let proposal = perturb(
                candidates[i].partition(),
                &leader.partition,
                candidates[peer].partition(),
                rate,
                points,
                &mut task_rng,
            )?;
            let fitness = sse(&proposal, points);
            if fitness <= candidates[i].fitness() {
                Ok(Some(Candidate::new(proposal, fitness)))
            } else {
                Ok(None)
            }
        })
        .collect::<Result<_>>()?;

    for (i, proposal) in proposals.into_iter().enumerate() {
        if let Some(candidate) = proposal {
            population.replace(i, candidate);
        }
    }
    Ok(())
}

/// Global leader phase: candidates are selected with probability derived
/// from their fitness (better candidates more likely) and propose a
/// perturbation toward the frozen global leader mixed with a random peer,
/// accepted greedily.
fn global_leader_phase(
    population: &mut Population,
    points: &[Point],
    rate: f64,
    rng: &mut impl Rng,
) -> Result<()> {
    let len = population.len();
    let fitnesses: Vec<f64> = population.candidates().iter().map(|c| c.fitness()).collect();
    let max_fitness = fitnesses.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let probabilities: Vec<f64> = if max_fitness <= 0.0 {
        vec![1.0; len]
    } else {
        fitnesses
            .iter()
            .map(|&f| 0.9 * ((max_fitness - f) / max_fitness) + 0.1)
            .collect()
    };

    let global = population.global_leader().partition.clone();
    for i in 0..len {
        if rng.random::<f64>() >= probabilities[i] {
            continue;
        }
        let peer = if len < 2 {
            i
        } else {
            loop {
                let k = rng.random_range(0..len);
                if k != i {
                    break k;
                }
            }
        };

        let proposal = perturb(
            population.candidates()[i].partition(),
            &global,
            population.candidates()[peer].partition(),
            rate,
            points,
            rng,
        )?;
        let fitness = sse(&proposal, points);
        if fitness <= population.candidates()[i].fitness() {
            population.replace(i, Candidate::new(proposal, fitness));
        }
    }
    Ok(())
}

/// Local leader decision: any sub-group stuck past `local_limit` has its
/// non-leader members shaken toward a mix of the global leader and a fresh
/// random partition, replacing them unconditionally (diversification, not
/// greedy), then its counter resets.
fn local_leader_decision(
    population: &mut Population,
    points: &[Point],
    params: &SmoParams,
    rng: &mut impl Rng,
) -> Result<()> {
    let n = points.len();
    for g in 0..population.num_groups() {
        let leader = &population.local_leaders()[g];
        if leader.stagnation < params.local_limit {
            continue;
        }
        let leader_index = leader.index;
        let range = population.groups()[g].clone();
        let global = population.global_leader().partition.clone();

        for i in range {
            if i == leader_index {
                continue;
            }
            let fresh = Partition::random_balanced(n, global.num_clusters(), rng);
            let shaken = perturb(
                population.candidates()[i].partition(),
                &global,
                &fresh,
                params.perturbation_rate,
                points,
                rng,
            )?;
            let fitness = sse(&shaken, points);
            population.replace(i, Candidate::new(shaken, fitness));
        }
        population.reset_local_stagnation(g);
    }
    Ok(())
}

/// Global leader decision: on global stagnation, split one more sub-group
/// off (fission) until the group cap, then merge everything back into a
/// single group (fusion).
fn global_leader_decision(population: &mut Population, params: &SmoParams, max_groups: usize) {
    if population.global_leader().stagnation < params.global_limit {
        return;
    }
    population.reset_global_stagnation();
    if max_groups <= 1 {
        return;
    }
    if population.num_groups() < max_groups {
        population.split_groups();
        debug!("smo: fission, groups={}", population.num_groups());
    } else {
        population.merge_groups();
        debug!("smo: fusion, groups=1");
    }
}
