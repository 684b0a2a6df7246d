//! Generalized best-first search over railway states.
//!
//! One loop serves every strategy: the frontier strategy decides how states
//! are keyed, while the engine drives expansion, explored-set bookkeeping,
//! parent tracking, and path reconstruction. Each run owns its frontier,
//! explored set, and parent map exclusively; nothing is shared or retried.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use log::debug;

use crate::state::RailwayState;
use crate::strategy::SearchStrategy;

/// Result of one search run.
///
/// `path` is the solution from the initial state to the goal, inclusive, or
/// `None` when the reachable space was exhausted without a goal.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub path: Option<Vec<RailwayState>>,
    pub nodes_expanded: usize,
    pub max_queue_size: usize,
    pub elapsed: Duration,
}

impl SearchOutcome {
    pub fn solved(&self) -> bool {
        self.path.is_some()
    }

    /// Number of moves in the solution, or 0 when there is none.
    pub fn path_length(&self) -> usize {
        self.path
            .as_ref()
            .map(|path| path.len().saturating_sub(1))
            .unwrap_or(0)
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Expansion throughput, guarded against a zero elapsed time.
    pub fn nodes_per_second(&self) -> f64 {
        let seconds = self.elapsed_seconds();
        if seconds > 0.0 {
            self.nodes_expanded as f64 / seconds
        } else {
            0.0
        }
    }
}

/// Run a best-first search from `initial` under the given strategy.
///
/// States are de-duplicated at pop time: the frontier may hold several
/// entries for one state, and all but the first popped are discarded. The
/// search space is finite, so the loop always terminates — either at the
/// first goal pop or when the frontier empties.
pub fn best_first_search(initial: &RailwayState, strategy: SearchStrategy) -> SearchOutcome {
    let start = Instant::now();

    let mut frontier = strategy.seed(initial);
    let mut explored: HashSet<RailwayState> = HashSet::new();
    let mut parents: HashMap<RailwayState, Option<RailwayState>> = HashMap::new();
    parents.insert(initial.clone(), None);

    let mut nodes_expanded = 0;
    let mut max_queue_size = 1;

    debug!("{}: starting search", strategy.name());

    while let Some(current) = frontier.pop() {
        if current.is_goal() {
            let path = reconstruct_path(&parents, &current);
            debug!(
                "{}: goal reached, {} moves, {} nodes expanded",
                strategy.name(),
                path.len().saturating_sub(1),
                nodes_expanded
            );
            return SearchOutcome {
                path: Some(path),
                nodes_expanded,
                max_queue_size,
                elapsed: start.elapsed(),
            };
        }

        if explored.contains(&current) {
            continue;
        }

        let neighbors = current.neighbors();
        explored.insert(current.clone());
        nodes_expanded += 1;

        strategy.expand(&mut frontier, neighbors, &explored, &mut parents, &current);
        max_queue_size = max_queue_size.max(frontier.len());
    }

    debug!(
        "{}: frontier exhausted after {} expansions, no solution",
        strategy.name(),
        nodes_expanded
    );
    SearchOutcome {
        path: None,
        nodes_expanded,
        max_queue_size,
        elapsed: start.elapsed(),
    }
}

/// Walk the parent map from the goal back to the root and reverse.
fn reconstruct_path(
    parents: &HashMap<RailwayState, Option<RailwayState>>,
    goal: &RailwayState,
) -> Vec<RailwayState> {
    let mut path = Vec::new();
    let mut cursor = Some(goal);
    while let Some(state) = cursor {
        path.push(state.clone());
        cursor = parents.get(state).and_then(|parent| parent.as_ref());
    }
    path.reverse();
    path
}
