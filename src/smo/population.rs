//! Candidate arena with sub-group structure and leader state.

use std::ops::Range;

use crate::models::{Candidate, Partition};

/// A leader snapshot: the best partition of a scope (sub-group or whole
/// population), its fitness, the arena index it came from, and how many
/// re-elections passed without improvement.
#[derive(Debug, Clone)]
pub(crate) struct Leader {
    pub partition: Partition,
    pub fitness: f64,
    pub index: usize,
    pub stagnation: usize,
}

/// The clusterer's population: a flat candidate arena partitioned into
/// contiguous index ranges (sub-groups). Fission and fusion only reshape
/// the range list; candidates never move.
#[derive(Debug)]
pub(crate) struct Population {
    candidates: Vec<Candidate>,
    groups: Vec<Range<usize>>,
    local_leaders: Vec<Leader>,
    global_leader: Leader,
}

impl Population {
    /// Builds a population as one sub-group and elects initial leaders.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        debug_assert!(!candidates.is_empty());
        let groups = vec![0..candidates.len()];
        let global_leader = elect(&candidates, 0..candidates.len());
        let local_leaders = vec![global_leader.clone()];
        Self {
            candidates,
            groups,
            local_leaders,
            global_leader,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Replaces the candidate at `index` with an accepted proposal.
    pub fn replace(&mut self, index: usize, candidate: Candidate) {
        self.candidates[index] = candidate;
    }

    pub fn groups(&self) -> &[Range<usize>] {
        &self.groups
    }

    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn local_leaders(&self) -> &[Leader] {
        &self.local_leaders
    }

    pub fn global_leader(&self) -> &Leader {
        &self.global_leader
    }

    /// Arena index → sub-group index map for the current structure.
    pub fn group_of_each(&self) -> Vec<usize> {
        let mut map = vec![0; self.candidates.len()];
        for (g, range) in self.groups.iter().enumerate() {
            for i in range.clone() {
                map[i] = g;
            }
        }
        map
    }

    /// Re-elects every local leader and the global leader.
    ///
    /// A leader whose fitness did not strictly improve has its stagnation
    /// counter incremented; an improved leader is replaced and reset.
    pub fn reelect_leaders(&mut self) {
        for (g, range) in self.groups.iter().enumerate() {
            let best = elect(&self.candidates, range.clone());
            let leader = &mut self.local_leaders[g];
            if best.fitness < leader.fitness {
                leader.partition = best.partition;
                leader.fitness = best.fitness;
                leader.index = best.index;
                leader.stagnation = 0;
            } else {
                leader.stagnation += 1;
            }
        }

        let best = elect(&self.candidates, 0..self.candidates.len());
        if best.fitness < self.global_leader.fitness {
            self.global_leader.partition = best.partition;
            self.global_leader.fitness = best.fitness;
            self.global_leader.index = best.index;
            self.global_leader.stagnation = 0;
        } else {
            self.global_leader.stagnation += 1;
        }
    }

    pub fn reset_local_stagnation(&mut self, group: usize) {
        self.local_leaders[group].stagnation = 0;
    }

    pub fn reset_global_stagnation(&mut self) {
        self.global_leader.stagnation = 0;
    }

    /// Fission: adds one sub-group by re-chunking the arena into equal
    /// contiguous ranges, then elects fresh local leaders.
    pub fn split_groups(&mut self) {
        let num_groups = self.groups.len() + 1;
        self.groups = chunk_ranges(self.candidates.len(), num_groups);
        self.local_leaders = self
            .groups
            .iter()
            .map(|range| elect(&self.candidates, range.clone()))
            .collect();
    }

    /// Fusion: collapses all sub-groups back into one, led by the current
    /// global leader.
    pub fn merge_groups(&mut self) {
        self.groups = vec![0..self.candidates.len()];
        let mut leader = self.global_leader.clone();
        leader.stagnation = 0;
        self.local_leaders = vec![leader];
    }
}

/// Best candidate (lowest fitness) within an arena range.
fn elect(candidates: &[Candidate], range: Range<usize>) -> Leader {
    debug_assert!(!range.is_empty());
    let mut best = range.start;
    for i in range {
        if candidates[i].fitness() < candidates[best].fitness() {
            best = i;
        }
    }
    Leader {
        partition: candidates[best].partition().clone(),
        fitness: candidates[best].fitness(),
        index: best,
        stagnation: 0,
    }
}

/// Splits `len` indices into `num_groups` contiguous ranges whose sizes
/// differ by at most one.
fn chunk_ranges(len: usize, num_groups: usize) -> Vec<Range<usize>> {
    let base = len / num_groups;
    let extra = len % num_groups;
    let mut ranges = Vec::with_capacity(num_groups);
    let mut start = 0;
    for g in 0..num_groups {
        let size = base + usize::from(g < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Partition;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_population(fitnesses: &[f64]) -> Population {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let candidates = fitnesses
            .iter()
            .map(|&f| Candidate::new(Partition::random_balanced(4, 2, &mut rng), f))
            .collect();
        Population::new(candidates)
    }

    #[test]
    fn test_initial_election() {
        let pop = make_population(&[5.0, 2.0, 7.0, 3.0]);
        assert_eq!(pop.num_groups(), 1);
        assert_eq!(pop.global_leader().index, 1);
        assert_eq!(pop.global_leader().fitness, 2.0);
        assert_eq!(pop.local_leaders()[0].index, 1);
    }

    #[test]
    fn test_reelect_tracks_stagnation() {
        let mut pop = make_population(&[5.0, 2.0, 7.0, 3.0]);
        pop.reelect_leaders();
        assert_eq!(pop.global_leader().stagnation, 1);

        let better = Candidate::new(pop.candidates()[0].partition().clone(), 1.0);
        pop.replace(2, better);
        pop.reelect_leaders();
        assert_eq!(pop.global_leader().stagnation, 0);
        assert_eq!(pop.global_leader().index, 2);
        assert_eq!(pop.global_leader().fitness, 1.0);
    }

    #[test]
    fn test_split_and_merge() {
        let mut pop = make_population(&[5.0, 2.0, 7.0, 3.0, 9.0, 1.0]);
        pop.split_groups();
        assert_eq!(pop.num_groups(), 2);
        assert_eq!(pop.groups(), &[0..3, 3..6]);
        assert_eq!(pop.local_leaders()[0].index, 1);
        assert_eq!(pop.local_leaders()[1].index, 5);

        pop.split_groups();
        assert_eq!(pop.num_groups(), 3);
        assert_eq!(pop.groups(), &[0..2, 2..4, 4..6]);

        pop.merge_groups();
        assert_eq!(pop.num_groups(), 1);
        assert_eq!(pop.local_leaders()[0].fitness, pop.global_leader().fitness);
    }

    #[test]
    fn test_group_of_each() {
        let mut pop = make_population(&[5.0, 2.0, 7.0, 3.0, 9.0, 1.0]);
        pop.split_groups();
        assert_eq!(pop.group_of_each(), vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_chunk_ranges_uneven() {
        assert_eq!(chunk_ranges(7, 3), vec![0..3, 3..5, 5..7]);
        assert_eq!(chunk_ranges(6, 2), vec![0..3, 3..6]);
        assert_eq!(chunk_ranges(3, 1), vec![0..3]);
    }
}
