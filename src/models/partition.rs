//! Balanced city-to-salesman partition.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::models::Point;

/// A mapping from each city id to exactly one cluster id in `[0, m)`.
///
/// A partition is the "position" of one candidate in the swarm clusterer's
/// population. The engine only ever works with balanced partitions: every
/// cluster holds exactly `n / m` cities, which the caller guarantees by
/// requiring `n % m == 0`.
///
/// # Examples
///
/// ```
/// use mtsp_hybrid::models::Partition;
/// use rand_chacha::ChaCha8Rng;
/// use rand::SeedableRng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let p = Partition::random_balanced(6, 2, &mut rng);
/// assert_eq!(p.len(), 6);
/// assert_eq!(p.num_clusters(), 2);
/// assert!(p.is_balanced());
/// assert_eq!(p.cluster_members(0).len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    assignment: Vec<usize>,
    num_clusters: usize,
}

impl Partition {
    /// Generates a uniformly random balanced partition of `n` cities into
    /// `m` clusters by shuffling the city ids and chunking.
    ///
    /// Assumes `n % m == 0`; validated by the engine boundary.
    pub fn random_balanced(n: usize, m: usize, rng: &mut impl Rng) -> Self {
        debug_assert!(m >= 1 && n % m == 0);
        let mut cities: Vec<usize> = (0..n).collect();
        cities.shuffle(rng);

        let per_cluster = n / m;
        let mut assignment = vec![0; n];
        for (slot, &city) in cities.iter().enumerate() {
            assignment[city] = slot / per_cluster;
        }
        Self {
            assignment,
            num_clusters: m,
        }
    }

    /// Creates a partition from an explicit city→cluster map.
    ///
    /// Returns `InvalidInput` if any cluster id is out of range or the
    /// clusters are not balanced.
    pub fn from_assignments(assignment: Vec<usize>, num_clusters: usize) -> Result<Self> {
        if num_clusters == 0 || assignment.is_empty() {
            return Err(Error::invalid_input("partition must be non-empty"));
        }
        if let Some(&c) = assignment.iter().find(|&&c| c >= num_clusters) {
            return Err(Error::invalid_input(format!(
                "cluster id {c} out of range for {num_clusters} clusters"
            )));
        }
        let p = Self {
            assignment,
            num_clusters,
        };
        if !p.is_balanced() {
            return Err(Error::invalid_input("partition is not balanced"));
        }
        Ok(p)
    }

    /// Wraps a pre-repaired assignment vector. Internal constructor for the
    /// clusterer's perturbation pipeline; the caller guarantees balance.
    pub(crate) fn from_repaired(assignment: Vec<usize>, num_clusters: usize) -> Self {
        debug_assert!(assignment.iter().all(|&c| c < num_clusters));
        Self {
            assignment,
            num_clusters,
        }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Returns `true` if the partition covers no cities.
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Number of clusters (salesmen).
    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    /// Cluster id assigned to the given city.
    pub fn cluster_of(&self, city: usize) -> usize {
        self.assignment[city]
    }

    /// The full city→cluster map.
    pub fn assignments(&self) -> &[usize] {
        &self.assignment
    }

    /// City ids in the given cluster, in ascending id order.
    pub fn cluster_members(&self, cluster: usize) -> Vec<usize> {
        self.assignment
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == cluster)
            .map(|(city, _)| city)
            .collect()
    }

    /// Member lists for every cluster, indexed by cluster id.
    pub fn members_by_cluster(&self) -> Vec<Vec<usize>> {
        let mut clusters = vec![Vec::new(); self.num_clusters];
        for (city, &c) in self.assignment.iter().enumerate() {
            clusters[c].push(city);
        }
        clusters
    }

    /// City count per cluster, indexed by cluster id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_clusters];
        for &c in &self.assignment {
            sizes[c] += 1;
        }
        sizes
    }

    /// Returns `true` if every cluster holds exactly `n / m` cities.
    pub fn is_balanced(&self) -> bool {
        let n = self.assignment.len();
        if n % self.num_clusters != 0 {
            return false;
        }
        let target = n / self.num_clusters;
        self.cluster_sizes().iter().all(|&s| s == target)
    }

    /// Coordinate centroid of each cluster, indexed by cluster id.
    ///
    /// `points` must be indexed by city id. An empty cluster yields the
    /// origin; the engine never produces one on a balanced partition.
    pub fn centroids(&self, points: &[Point]) -> Vec<(f64, f64)> {
        let mut sums = vec![(0.0, 0.0, 0usize); self.num_clusters];
        for (city, &c) in self.assignment.iter().enumerate() {
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
}
