//! Pheromone intensity matrix.

/// Lower bound on pheromone intensity. Evaporation never starves an edge
/// to exactly zero selection probability.
pub(crate) const PHEROMONE_FLOOR: f64 = 1e-12;

/// Dense k×k matrix of directed pheromone intensities for one cluster.
///
/// Initialized to a uniform level, then mutated by one evaporation pass and
/// the batched ant deposits each colony iteration. Owned exclusively by one
/// router instance.
///
/// # Examples
///
/// ```
/// use mtsp_hybrid::aco::PheromoneMatrix;
///
/// let mut pm = PheromoneMatrix::new(3, 0.5);
/// pm.deposit(0, 1, 0.25);
/// assert!((pm.get(0, 1) - 0.75).abs() < 1e-10);
/// pm.evaporate(0.5);
/// assert!((pm.get(0, 1) - 0.375).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct PheromoneMatrix {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneMatrix {
    /// Creates a matrix with every edge at `initial` intensity (clamped to
    /// the positive floor).
    pub fn new(size: usize, initial: f64) -> Self {
        Self {
            data: vec![initial.max(PHEROMONE_FLOOR); size * size],
            size,
        }
    }

    /// Pheromone intensity on the directed edge `from → to`.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Adds `amount` to the directed edge `from → to`.
    pub fn deposit(&mut self, from: usize, to: usize, amount: f64) {
        self.data[from * self.size + to] += amount;
    }

    /// Decays every edge by `(1 - rho)`, clamping to the positive floor.
    pub fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        for value in &mut self.data {
            *value = (*value * keep).max(PHEROMONE_FLOOR);
        }
    }

    /// Matrix dimension (cluster size).
    pub fn size(&self) -> usize {
        self.size
    }
}
