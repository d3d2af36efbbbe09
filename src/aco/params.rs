//! Pheromone router parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunable parameters for the pheromone router.
///
/// # Examples
///
/// ```
/// use mtsp_hybrid::aco::AcoParams;
///
/// let params = AcoParams::default().with_ants(10).with_iterations(50);
/// assert_eq!(params.ants, 10);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcoParams {
    /// Number of ants per iteration.
    pub ants: usize,
    /// Number of colony iterations.
    pub iterations: usize,
    /// Pheromone weight exponent.
    pub alpha: f64,
    /// Inverse-distance heuristic weight exponent.
    pub beta: f64,
    /// Evaporation rate per iteration.
    pub rho: f64,
    /// Deposit scale: each ant deposits `q / tour_length` on its edges.
    pub q: f64,
}

impl Default for AcoParams {
    fn default() -> Self {
        Self {
            ants: 20,
            iterations: 200,
            alpha: 1.0,
            beta: 5.0,
            rho: 0.5,
            q: 100.0,
        }
    }
}

impl AcoParams {
    /// Sets the ant count.
    pub fn with_ants(mut self, ants: usize) -> Self {
        self.ants = ants;
        self
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the pheromone weight exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the heuristic weight exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    /// Sets the deposit scale.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Validates the parameter set.
    pub fn validate(&self) -> Result<()> {
        if self.ants == 0 {
            return Err(Error::invalid_input("aco ant count must be positive"));
        }
        if self.iterations == 0 {
            return Err(Error::invalid_input("aco iterations must be positive"));
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(Error::invalid_input(format!(
                "aco alpha {} must be positive",
                self.alpha
            )));
        }
        if !self.beta.is_finite() || self.beta <= 0.0 {
            return Err(Error::invalid_input(format!(
                "aco beta {} must be positive",
                self.beta
            )));
        }
        if !self.rho.is_finite() || self.rho <= 0.0 || self.rho >= 1.0 {
            return Err(Error::invalid_input(format!(
                "aco rho {} must be in (0, 1)",
                self.rho
            )));
        }
        if !self.q.is_finite() || self.q <= 0.0 {
            return Err(Error::invalid_input(format!(
                "aco q {} must be positive",
                self.q
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
        let p = AcoParams::default();
        assert_eq!(p.ants, 20);
        assert_eq!(p.iterations, 200);
        assert!((p.alpha - 1.0).abs() < 1e-10);
        assert!((p.beta - 5.0).abs() < 1e-10);
        assert!((p.rho - 0.5).abs() < 1e-10);
        assert!((p.q - 100.0).abs() < 1e-10);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let p = AcoParams::default()
            .with_ants(5)
            .with_iterations(10)
            .with_alpha(2.0)
            .with_beta(3.0)
            .with_rho(0.2)
            .with_q(50.0);
        assert_eq!(p.ants, 5);
        assert_eq!(p.iterations, 10);
        assert!((p.alpha - 2.0).abs() < 1e-10);
        assert!((p.beta - 3.0).abs() < 1e-10);
        assert!((p.rho - 0.2).abs() < 1e-10);
        assert!((p.q - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AcoParams::default().with_ants(0).validate().is_err());
        assert!(AcoParams::default().with_iterations(0).validate().is_err());
        assert!(AcoParams::default().with_alpha(0.0).validate().is_err());
        assert!(AcoParams::default().with_beta(-1.0).validate().is_err());
        assert!(AcoParams::default().with_rho(0.0).validate().is_err());
        assert!(AcoParams::default().with_rho(1.0).validate().is_err());
        assert!(AcoParams::default().with_q(0.0).validate().is_err());
        assert!(AcoParams::default().with_q(f64::NAN).validate().is_err());
    }
}
