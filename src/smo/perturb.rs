//! Partition perturbation, balance repair, and fitness.

use rand::Rng;

use crate::error::{Error, Result};
use crate::models::{Partition, Point};

/// Clustering fitness: total squared distance of every city to its cluster
/// centroid (SSE). Lower is better.
pub(crate) fn sse(partition: &Partition, points: &[Point]) -> f64 {
    let centroids = partition.centroids(points);
    partition
        .assignments()
        .iter()
        .enumerate()
        .map(|(city, &c)| points[city].squared_distance_to_coords(centroids[c].0, centroids[c].1))
        .sum()
}

/// Proposes a perturbed partition biased toward a leader and a peer.
///
/// Each city keeps its current assignment with probability `keep_rate`;
/// otherwise it adopts the leader's or the peer's assignment with equal
/// probability. The mix usually breaks balance, so a repair pass restores
/// exactly `n / m` cities per cluster before the proposal is returned.
pub(crate) fn perturb(
    base: &Partition,
    leader: &Partition,
    peer: &Partition,
    keep_rate: f64,
    points: &[Point],
    rng: &mut impl Rng,
) -> Result<Partition> {
    let m = base.num_clusters();
    let mut assignment: Vec<usize> = base
        .assignments()
        .iter()
        .enumerate()
        .map(|(city, &own)| {
            if rng.random::<f64>() < keep_rate {
                own
            } else if rng.random_bool(0.5) {
                leader.cluster_of(city)
            } else {
                peer.cluster_of(city)
            }
        })
        .collect();

    repair(&mut assignment, m, points)?;
    Ok(Partition::from_repaired(assignment, m))
}

/// Restores per-cluster balance by moving cities out of overfull clusters.
///
/// Each move takes the most distant city (from its own centroid) of the
/// fullest cluster and hands it to the underfull cluster whose centroid is
/// closest, so the repair degrades compactness as little as possible.
/// Centroids are computed once from the broken assignment; every move
/// strictly shrinks the imbalance, so the loop ends within `n` moves.
fn repair(assignment: &mut [usize], m: usize, points: &[Point]) -> Result<()> {
    let n = assignment.len();
    debug_assert!(n % m == 0);
    let target = n / m;

    let mut counts = vec![0usize; m];
    for &c in assignment.iter() {
        counts[c] += 1;
    }

    let centroids = centroids_of(assignment, m, points);

    for _ in 0..n {
        if counts.iter().all(|&c| c == target) {
            return Ok(());
        }
        // Counts sum to n, so an underfull cluster implies an overfull one.
        let donor = match (0..m).max_by_key(|&c| counts[c]) {
            Some(c) if counts[c] > target => c,
            _ => return Err(Error::internal("balance repair found no donor cluster")),
        };

        // City of the donor cluster farthest from the donor centroid.
        let (dcx, dcy) = centroids[donor];
        let city = assignment
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == donor)
            .max_by(|&(a, _), &(b, _)| {
                let da = points[a].squared_distance_to_coords(dcx, dcy);
                let db = points[b].squared_distance_to_coords(dcx, dcy);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(city, _)| city)
            .ok_or_else(|| Error::internal("donor cluster has no members"))?;

        // Underfull cluster whose centroid is nearest to that city.
        let recipient = (0..m)
            .filter(|&c| counts[c] < target)
            .min_by(|&a, &b| {
                let da = points[city].squared_distance_to_coords(centroids[a].0, centroids[a].1);
                let db = points[city].squared_distance_to_coords(centroids[b].0, centroids[b].1);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or_else(|| Error::internal("balance repair lost its recipient cluster"))?;

        assignment[city] = recipient;
        counts[donor] -= 1;
        counts[recipient] += 1;
    }

    if counts.iter().all(|&c| c == target) {
        Ok(())
    } else {
        Err(Error::internal("balance repair did not converge"))
    }
}

fn centroids_of(assignment: &[usize], m: usize, points: &[Point]) -> Vec<(f64, f64)> {
    let mut sums = vec![(0.0, 0.0, 0usize); m];
    for (city, &c) in assignment.iter().enumerate() {
        sums[c].0 += points[city].x();
        sums[c].1 += points[city].y();
        sums[c].2 += 1;
    }
    sums.into_iter()
        .map(|(sx, sy, count)| {
            if count == 0 {
                (0.0, 0.0)
            } else {
                (sx / count as f64, sy / count as f64)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn line_points(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i, i as f64, 0.0)).collect()
    }

    #[test]
    fn test_sse_tight_clusters_beat_mixed() {
        let points = vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 1.0, 0.0),
            Point::new(2, 100.0, 0.0),
            Point::new(3, 101.0, 0.0),
        ];
        let tight = Partition::from_assignments(vec![0, 0, 1, 1], 2).expect("balanced");
        let mixed = Partition::from_assignments(vec![0, 1, 0, 1], 2).expect("balanced");
        assert!(sse(&tight, &points) < sse(&mixed, &points));
    }

    #[test]
    fn test_sse_single_point_clusters_are_zero() {
        let points = line_points(2);
        let p = Partition::from_assignments(vec![0, 1], 2).expect("balanced");
        assert!(sse(&p, &points).abs() < 1e-10);
    }

    #[test]
    fn test_perturb_preserves_balance() {
        let points = line_points(12);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let base = Partition::random_balanced(12, 3, &mut rng);
        let leader = Partition::random_balanced(12, 3, &mut rng);
        let peer = Partition::random_balanced(12, 3, &mut rng);

        for _ in 0..20 {
            let p = perturb(&base, &leader, &peer, 0.1, &points, &mut rng).expect("repairable");
            assert!(p.is_balanced());
            assert_eq!(p.len(), 12);
        }
    }

    #[test]
    fn test_repair_already_balanced_is_noop() {
        let points = line_points(4);
        let mut assignment = vec![0, 0, 1, 1];
        repair(&mut assignment, 2, &points).expect("balanced input");
        assert_eq!(assignment, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_repair_fills_empty_cluster() {
        let points = line_points(4);
        let mut assignment = vec![0, 0, 0, 0];
        repair(&mut assignment, 2, &points).expect("repairable");
        let ones = assignment.iter().filter(|&&c| c == 1).count();
        assert_eq!(ones, 2);
    }

    #[test]
    fn test_repair_moves_outlier_first() {
        // Cluster 0 holds everything; its farthest member from the centroid
        // sits at x=3 and should be donated first.
        let points = line_points(4);
        let mut assignment = vec![0, 0, 0, 1];
        repair(&mut assignment, 2, &points).expect("repairable");
        assert_eq!(assignment.iter().filter(|&&c| c == 0).count(), 2);
        assert_eq!(assignment[0], 0);
        assert_eq!(assignment[1], 0);
    }

    proptest! {
        #[test]
        fn prop_repair_restores_balance(seed in 0u64..500, m in 1usize..5, per in 1usize..6) {
            let n = m * per;
            let points = line_points(n);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut assignment: Vec<usize> =
                (0..n).map(|_| rng.random_range(0..m)).collect();
            repair(&mut assignment, m, &points).expect("repairable");
            let mut counts = vec![0usize; m];
            for &c in &assignment {
                counts[c] += 1;
            }
            prop_assert!(counts.iter().all(|&c| c == per));
        }
    }
}
