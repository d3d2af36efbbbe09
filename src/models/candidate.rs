//! Swarm member: a partition plus its fitness.

use crate::models::Partition;

/// One member of the swarm clusterer's population.
///
/// Holds a balanced [`Partition`] and its scalar fitness (lower is better).
/// Candidates are replaced wholesale when a better proposal is accepted,
/// never patched in place.
#[derive(Debug, Clone)]
pub struct Candidate {
    partition: Partition,
    fitness: f64,
}

impl Candidate {
    /// Creates a candidate from an evaluated partition.
    pub fn new(partition: Partition, fitness: f64) -> Self {
        Self { partition, fitness }
    }

    /// The candidate's partition.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Consumes the candidate, returning its partition.
    pub fn into_partition(self) -> Partition {
        self.partition
    }

    /// Fitness value (lower is better).
    pub fn fitness(&self) -> f64 {
        self.fitness
    }
}
