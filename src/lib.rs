//! Railway shunting puzzle solver.
//!
//! Trains on a main track and a set of bounded-capacity sidings must be
//! rearranged into a goal order, moving only the front of the main track or
//! the back of a siding. This crate provides the state model, three frontier
//! strategies (uniform cost and two A* variants), the generalized best-first
//! search engine with instrumentation, a validated benchmark catalog, and
//! result reporting.

pub mod catalog;
pub mod report;
pub mod search;
pub mod state;
pub mod strategy;

// Re-export main types
pub use catalog::{Catalog, CatalogError, Difficulty, PuzzleConfig, PuzzleValidation};
pub use report::{comparison_table, render_path, write_summary, RunReport, StrategySummary};
pub use search::{best_first_search, SearchOutcome};
pub use state::{RailwayState, StateError, SIDING_CAPACITY};
pub use strategy::{Frontier, SearchStrategy};
