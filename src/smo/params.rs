//! Swarm clusterer parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunable parameters for the swarm clusterer.
///
/// # Examples
///
/// ```
/// use mtsp_hybrid::smo::SmoParams;
///
/// let params = SmoParams::default()
///     .with_iterations(50)
///     .with_population_size(30);
/// assert_eq!(params.iterations, 50);
/// assert!(params.validate(4).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoParams {
    /// Number of optimization rounds.
    pub iterations: usize,
    /// Number of candidates in the population.
    pub population_size: usize,
    /// Sub-group stagnation rounds before the local leader decision fires.
    pub local_limit: usize,
    /// Global stagnation rounds before fission/fusion fires.
    pub global_limit: usize,
    /// Per-city probability of keeping the current assignment during a
    /// perturbation (`pr` in the literature).
    pub perturbation_rate: f64,
}

impl Default for SmoParams {
    fn default() -> Self {
        Self {
            iterations: 100,
            population_size: 50,
            local_limit: 20,
            global_limit: 20,
            perturbation_rate: 0.1,
        }
    }
}

impl SmoParams {
    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets the local leader stagnation limit.
    pub fn with_local_limit(mut self, local_limit: usize) -> Self {
        self.local_limit = local_limit;
        self
    }

    /// Sets the global leader stagnation limit.
    pub fn with_global_limit(mut self, global_limit: usize) -> Self {
        self.global_limit = global_limit;
        self
    }

    /// Sets the perturbation rate.
    pub fn with_perturbation_rate(mut self, perturbation_rate: f64) -> Self {
        self.perturbation_rate = perturbation_rate;
        self
    }

    /// Validates the parameter set for a given cluster count.
    ///
    /// The population must hold at least `2 * num_clusters` candidates so
    /// each cluster is represented and sub-groups can split meaningfully.
    pub fn validate(&self, num_clusters: usize) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::invalid_input("smo iterations must be positive"));
        }
        if self.population_size < 2 * num_clusters.max(1) {
            return Err(Error::invalid_input(format!(
                "smo population size {} must be at least {} (2 per cluster)",
                self.population_size,
                2 * num_clusters.max(1)
            )));
        }
        if self.local_limit == 0 || self.global_limit == 0 {
            return Err(Error::invalid_input("smo stagnation limits must be positive"));
        }
        if !self.perturbation_rate.is_finite()
            || self.perturbation_rate <= 0.0
            || self.perturbation_rate > 1.0
        {
            return Err(Error::invalid_input(format!(
                "smo perturbation rate {} must be in (0, 1]",
                self.perturbation_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = SmoParams::default();
        assert_eq!(p.iterations, 100);
        assert_eq!(p.population_size, 50);
        assert_eq!(p.local_limit, 20);
        assert_eq!(p.global_limit, 20);
        assert!((p.perturbation_rate - 0.1).abs() < 1e-10);
        assert!(p.validate(4).is_ok());
    }

    #[test]
    fn test_builders() {
        let p = SmoParams::default()
            .with_iterations(10)
            .with_population_size(12)
            .with_local_limit(5)
            .with_global_limit(7)
            .with_perturbation_rate(0.3);
        assert_eq!(p.iterations, 10);
        assert_eq!(p.population_size, 12);
        assert_eq!(p.local_limit, 5);
        assert_eq!(p.global_limit, 7);
        assert!((p.perturbation_rate - 0.3).abs() < 1e-10);
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        assert!(SmoParams::default().with_iterations(0).validate(2).is_err());
    }

    #[test]
    fn test_validate_rejects_small_population() {
        let p = SmoParams::default().with_population_size(5);
        assert!(p.validate(3).is_err());
        assert!(p.validate(2).is_err());
        assert!(SmoParams::default().with_population_size(6).validate(3).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_rate() {
        assert!(SmoParams::default().with_perturbation_rate(0.0).validate(2).is_err());
        assert!(SmoParams::default().with_perturbation_rate(-0.1).validate(2).is_err());
        assert!(SmoParams::default().with_perturbation_rate(1.5).validate(2).is_err());
        assert!(SmoParams::default().with_perturbation_rate(1.0).validate(2).is_ok());
    }
}
