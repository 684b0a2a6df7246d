//! Frontier strategies for the best-first search engine.
//!
//! A strategy decides how states are keyed in the priority frontier: by path
//! cost alone (uniform cost) or by cost plus one of the two heuristics (the
//! A* variants). The frontier itself breaks priority ties with a monotonic
//! insertion counter, so extraction order never depends on state contents.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use smallvec::SmallVec;

use crate::state::RailwayState;

/// Search strategy selecting the frontier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Order by path cost alone.
    UniformCost,
    /// Order by path cost plus the misplaced-train count.
    AStarMisplaced,
    /// Order by path cost plus the Manhattan displacement sum.
    AStarManhattan,
}

impl SearchStrategy {
    /// Every strategy, in comparison-report order.
    pub fn all() -> [SearchStrategy; 3] {
        [
            SearchStrategy::UniformCost,
            SearchStrategy::AStarMisplaced,
            SearchStrategy::AStarManhattan,
        ]
    }

    /// Short display name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategy::UniformCost => "UCS",
            SearchStrategy::AStarMisplaced => "A* Misplaced",
            SearchStrategy::AStarManhattan => "A* Manhattan",
        }
    }

    /// Build a frontier seeded with the initial state.
    ///
    /// The seed key is 0 for uniform cost and the bare heuristic value for
    /// the A* variants. The seed is alone in the frontier, so only the
    /// recorded key differs between the conventions, not expansion order.
    pub fn seed(&self, initial: &RailwayState) -> Frontier {
        let key = match self {
            SearchStrategy::UniformCost => 0,
            SearchStrategy::AStarMisplaced => initial.misplaced_heuristic(),
            SearchStrategy::AStarManhattan => initial.manhattan_heuristic(),
        };
        let mut frontier = Frontier::new();
        frontier.push(key, initial.clone());
        frontier
    }

    /// Insert freshly generated neighbors into the frontier.
    ///
    /// Neighbors already expanded are dropped. Everything else is keyed by
    /// this strategy and recorded in the parent map with `current` as its
    /// parent; reaching the same frontier state again overwrites the
    /// previous parent (last writer wins).
    pub fn expand(
        &self,
        frontier: &mut Frontier,
        neighbors: SmallVec<[RailwayState; 8]>,
        explored: &HashSet<RailwayState>,
        parents: &mut HashMap<RailwayState, Option<RailwayState>>,
        current: &RailwayState,
    ) {
        for neighbor in neighbors {
            if explored.contains(&neighbor) {
                continue;
            }
            let key = self.key(&neighbor);
            parents.insert(neighbor.clone(), Some(current.clone()));
            frontier.push(key, neighbor);
        }
    }

    fn key(&self, state: &RailwayState) -> usize {
        match self {
            SearchStrategy::UniformCost => state.cost(),
            SearchStrategy::AStarMisplaced => state.cost() + state.misplaced_heuristic(),
            SearchStrategy::AStarManhattan => state.cost() + state.manhattan_heuristic(),
        }
    }
}

/// Priority frontier of states awaiting expansion.
///
/// Lowest key pops first; equal keys pop in insertion order. Duplicate
/// states are allowed — the search discards stale entries at pop time.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: usize, state: RailwayState) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry { key, seq, state });
    }

    /// Remove and return the lowest-keyed state.
    pub fn pop(&mut self) -> Option<RailwayState> {
        self.heap.pop().map(|entry| entry.state)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[derive(Debug)]
struct Entry {
    key: usize,
    seq: u64,
    state: RailwayState,
}

// Inverted ordering so the max-heap pops the smallest (key, seq) pair. The
// sequence number is unique, so states themselves are never compared.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl Eq for Entry {}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(main: &[&str], sidings: &[&[&str]], goal: &[&str]) -> RailwayState {
        RailwayState::new(
            main.iter().map(|s| s.to_string()).collect(),
            sidings
                .iter()
                .map(|siding| siding.iter().map(|s| s.to_string()).collect())
                .collect(),
            goal.iter().map(|s| s.to_string()).collect(),
        )
        .expect("test state should be valid")
    }

    #[test]
    fn test_frontier_pops_lowest_key() {
        let mut frontier = Frontier::new();
        frontier.push(3, state(&["3"], &[], &["3"]));
        frontier.push(1, state(&["1"], &[], &["1"]));
        frontier.push(2, state(&["2"], &[], &["2"]));

        assert_eq!(frontier.pop().unwrap().main_track(), &["1".to_string()]);
        assert_eq!(frontier.pop().unwrap().main_track(), &["2".to_string()]);
        assert_eq!(frontier.pop().unwrap().main_track(), &["3".to_string()]);
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_frontier_breaks_ties_by_insertion_order() {
        let mut frontier = Frontier::new();
        frontier.push(5, state(&["a"], &[], &["a"]));
        frontier.push(5, state(&["b"], &[], &["b"]));
        frontier.push(5, state(&["c"], &[], &["c"]));

        assert_eq!(frontier.pop().unwrap().main_track(), &["a".to_string()]);
        assert_eq!(frontier.pop().unwrap().main_track(), &["b".to_string()]);
        assert_eq!(frontier.pop().unwrap().main_track(), &["c".to_string()]);
    }

    #[test]
    fn test_seed_keys() {
        let initial = state(&["2", "1", "3"], &[&[], &[]], &["1", "2", "3"]);

        // The seed key is strategy specific but each frontier holds one entry.
        for strategy in SearchStrategy::all() {
            let frontier = strategy.seed(&initial);
            assert_eq!(frontier.len(), 1);
        }
    }

    #[test]
    fn test_expand_skips_explored() {
        let initial = state(&["2", "1", "3"], &[&[], &[]], &["1", "2", "3"]);
        let neighbors = initial.neighbors();
        let first = neighbors[0].clone();

        let mut explored = HashSet::new();
        explored.insert(first);

        let mut parents = HashMap::new();
        let mut frontier = Frontier::new();
        SearchStrategy::UniformCost.expand(
            &mut frontier,
            neighbors,
            &explored,
            &mut parents,
            &initial,
        );

        // One of the two successors was already explored.
        assert_eq!(frontier.len(), 1);
        assert_eq!(parents.len(), 1);
    }

    #[test]
    fn test_expand_records_parent() {
        let initial = state(&["2", "1"], &[&[]], &["1", "2"]);
        let neighbors = initial.neighbors();
        let child = neighbors[0].clone();

        let mut parents = HashMap::new();
        let mut frontier = Frontier::new();
        SearchStrategy::AStarMisplaced.expand(
            &mut frontier,
            neighbors,
            &HashSet::new(),
            &mut parents,
            &initial,
        );

        assert_eq!(parents.get(&child), Some(&Some(initial)));
    }
}
