//! Aggregate m-TSP solution.

use serde::{Deserialize, Serialize};

use crate::models::Route;

/// A complete solution: one route per salesman plus the combined length.
///
/// Produced by the hybrid orchestrator. Across all routes combined, every
/// city id in `[0, n)` appears exactly once.
///
/// # Examples
///
/// ```
/// use mtsp_hybrid::models::{MtspSolution, Route};
///
/// let sol = MtspSolution::new(vec![
///     Route::new(vec![0, 1], 2.0),
///     Route::new(vec![3, 2], 4.0),
/// ]);
/// assert_eq!(sol.num_routes(), 2);
/// assert!((sol.total_length() - 6.0).abs() < 1e-10);
/// assert!(sol.covers_all_cities(4));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MtspSolution {
    routes: Vec<Route>,
    total_length: f64,
}

impl MtspSolution {
    /// Creates a solution; the total length is the sum of route lengths.
    pub fn new(routes: Vec<Route>) -> Self {
        let total_length = routes.iter().map(Route::length).sum();
        Self {
            routes,
            total_length,
        }
    }

    /// Per-salesman routes, indexed by salesman.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes (always equals the salesman count).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Combined length of all routes.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Checks that the routes visit every city id in `[0, n)` exactly once.
    pub fn covers_all_cities(&self, n: usize) -> bool {
        let mut seen = vec![false; n];
        for route in &self.routes {
            for &city in route.cities() {
                if city >= n || seen[city] {
                    return false;
                }
                seen[city] = true;
            }
        }
        seen.into_iter().all(|s| s)
    }
}
