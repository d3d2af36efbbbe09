//! Salesman route type.

use serde::{Deserialize, Serialize};

/// An ordered visiting sequence for one salesman.
///
/// `cities` is a strict permutation of one cluster's city ids: each city
/// appears exactly once and the starting city is not repeated at the end.
/// Tours are **closed**: `length` includes the edge from the last city back
/// to the first, so a route over `k ≥ 2` cities sums `k` edges. Routes of
/// one (or zero) cities have length zero.
///
/// # Examples
///
/// ```
/// use mtsp_hybrid::models::Route;
///
/// let r = Route::new(vec![2, 0, 1], 12.5);
/// assert_eq!(r.len(), 3);
/// assert_eq!(r.cities(), &[2, 0, 1]);
/// assert_eq!(r.length(), 12.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    cities: Vec<usize>,
    length: f64,
}

impl Route {
    /// Creates a route from an ordered city sequence and its closed-tour
    /// length.
    pub fn new(cities: Vec<usize>, length: f64) -> Self {
        Self { cities, length }
    }

    /// City ids in visiting order.
    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    /// Number of cities visited.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns `true` if the route visits no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Total closed-tour length.
    pub fn length(&self) -> f64 {
        self.length
    }
}
