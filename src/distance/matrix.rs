//! Dense distance matrix.

use crate::models::Point;

/// A dense n×n Euclidean distance matrix stored in row-major order.
///
/// Computed once from the point set and read-only for the engine's
/// lifetime, so it can be shared across threads without locking.
///
/// # Examples
///
/// ```
/// use mtsp_hybrid::models::Point;
/// use mtsp_hybrid::distance::DistanceMatrix;
///
/// let points = vec![
///     Point::new(0, 0.0, 0.0),
///     Point::new(1, 3.0, 4.0),
///     Point::new(2, 0.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the Euclidean distance matrix from point coordinates.
    ///
    /// `points` must be indexed by city id.
    pub fn from_points(points: &[Point]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from city `from` to city `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from city `from` to city `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of cities in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Length of the closed tour visiting `order` and returning to its
    /// first city. Zero for fewer than two cities.
    pub fn closed_tour_length(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for pair in order.windows(2) {
            total += self.get(pair[0], pair[1]);
        }
        total + self.get(order[order.len() - 1], order[0])
    }

    /// Returns the nearest neighbor of `from` among the given candidates.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| {
                self.get(from, a)
                    .partial_cmp(&self.get(from, b))
                    .expect("distance should not be NaN")
            })
    }

    /// Greedy nearest-neighbor closed-tour length over a city subset.
    ///
    /// Starts from the first city of the subset, always hops to the nearest
    /// unvisited city, and closes the loop back to the start. Used to seed
    /// the router's initial pheromone level.
    pub fn nearest_neighbor_tour_length(&self, cities: &[usize]) -> f64 {
        if cities.len() < 2 {
            return 0.0;
        }
        let mut remaining = cities[1..].to_vec();
        let mut current = cities[0];
        let mut total = 0.0;

        while let Some(next) = self.nearest_neighbor(current, &remaining) {
            total += self.get(current, next);
            remaining.retain(|&c| c != next);
            current = next;
        }
        total + self.get(current, cities[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Point> {
        vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 3.0, 4.0),
            Point::new(2, 0.0, 8.0),
        ]
    }

    #[test]
    fn test_from_points() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!(dm.get(0, 0).abs() < 1e-10);
    }

    #[test]
    fn test_symmetric() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_idempotent() {
        // Pure function of coordinates: recomputation yields the same matrix.
        let a = DistanceMatrix::from_points(&sample_points());
        let b = DistanceMatrix::from_points(&sample_points());
        assert_eq!(a, b);
    }

    #[test]
    fn test_closed_tour_length() {
        let points = vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 1.0, 0.0),
            Point::new(2, 1.0, 1.0),
            Point::new(3, 0.0, 1.0),
        ];
        let dm = DistanceMatrix::from_points(&points);
        assert!((dm.closed_tour_length(&[0, 1, 2, 3]) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_closed_tour_trivial() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.closed_tour_length(&[]), 0.0);
        assert_eq!(dm.closed_tour_length(&[1]), 0.0);
        // Two cities: out and back.
        assert!((dm.closed_tour_length(&[0, 1]) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_nearest_neighbor() {
        let dm = DistanceMatrix::from_points(&sample_points());
        // From city 0: city 1 at 5.0 beats city 2 at 8.0.
        assert_eq!(dm.nearest_neighbor(0, &[1, 2]), Some(1));
        assert_eq!(dm.nearest_neighbor(2, &[0, 1]), Some(1));
        assert_eq!(dm.nearest_neighbor(0, &[2]), Some(2));
    }

    #[test]
    fn test_nearest_neighbor_empty_candidates() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.nearest_neighbor(0, &[]), None);
    }

    #[test]
    fn test_nearest_neighbor_tour_length() {
        let points = vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 1.0, 0.0),
            Point::new(2, 2.0, 0.0),
        ];
        let dm = DistanceMatrix::from_points(&points);
        // 0 -> 1 -> 2 -> 0: 1 + 1 + 2 = 4
        assert!((dm.nearest_neighbor_tour_length(&[0, 1, 2]) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_nearest_neighbor_subset() {
        let points = vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 100.0, 0.0),
            Point::new(2, 1.0, 0.0),
            Point::new(3, 2.0, 0.0),
        ];
        let dm = DistanceMatrix::from_points(&points);
        // Subset ignores city 1 entirely: 0 -> 2 -> 3 -> 0 = 1 + 1 + 2
        assert!((dm.nearest_neighbor_tour_length(&[0, 2, 3]) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_nearest_neighbor_trivial() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.nearest_neighbor_tour_length(&[0]), 0.0);
        assert_eq!(dm.nearest_neighbor_tour_length(&[]), 0.0);
    }
}
