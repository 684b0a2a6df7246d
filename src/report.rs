//! Result summaries and reporting.
//!
//! The search engine hands back raw instrumentation; this module derives the
//! comparison metrics, renders tables and solution paths for the terminal,
//! and produces the serializable report consumed by external plotting tools.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::search::SearchOutcome;
use crate::state::RailwayState;
use crate::strategy::SearchStrategy;

/// Metrics for one strategy run, ready for display or serialization.
#[derive(Debug, Clone, Serialize)]
pub struct StrategySummary {
    pub strategy: String,
    pub solved: bool,
    pub path_length: usize,
    pub nodes_expanded: usize,
    pub max_queue_size: usize,
    pub elapsed_seconds: f64,
    pub nodes_per_second: f64,
}

impl StrategySummary {
    pub fn new(strategy: SearchStrategy, outcome: &SearchOutcome) -> Self {
        Self {
            strategy: strategy.name().to_string(),
            solved: outcome.solved(),
            path_length: outcome.path_length(),
            nodes_expanded: outcome.nodes_expanded,
            max_queue_size: outcome.max_queue_size,
            elapsed_seconds: outcome.elapsed_seconds(),
            nodes_per_second: outcome.nodes_per_second(),
        }
    }
}

/// The whole-run artifact: one puzzle, one summary per strategy.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub puzzle: String,
    pub results: Vec<StrategySummary>,
}

impl RunReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Fixed-width comparison table across strategies.
pub fn comparison_table(summaries: &[StrategySummary]) -> String {
    let mut table = String::new();
    table.push_str(&format!(
        "{:<15}{:<15}{:<15}{:<15}{:<15}{}\n",
        "Algorithm", "Path Length", "Nodes Expanded", "Max Queue", "Time (s)", "Nodes/s"
    ));
    table.push_str(&"-".repeat(75));
    table.push('\n');
    for summary in summaries {
        table.push_str(&format!(
            "{:<15}{:<15}{:<15}{:<15}{:<15}{:.2}\n",
            summary.strategy,
            summary.path_length,
            summary.nodes_expanded,
            summary.max_queue_size,
            format!("{:.4}", summary.elapsed_seconds),
            summary.nodes_per_second
        ));
    }
    table
}

/// Render a solution path step by step.
pub fn render_path(path: &[RailwayState]) -> String {
    let mut out = String::new();
    for (step, state) in path.iter().enumerate() {
        out.push_str(&format!("Step {step}:\n{state}\n\n"));
    }
    out
}

/// Write a summary-statistics file for a run into `dir`.
///
/// Returns the path of the written file.
pub fn write_summary(
    dir: &Path,
    puzzle_name: &str,
    summaries: &[StrategySummary],
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let file = dir.join(format!("stats_{puzzle_name}.txt"));

    let mut content = String::new();
    content.push_str(&format!("Summary Statistics for Puzzle: {puzzle_name}\n"));
    content.push_str(&"=".repeat(50));
    content.push_str("\n\n");
    for summary in summaries {
        content.push_str(&format!("Algorithm: {}\n", summary.strategy));
        content.push_str(&"-".repeat(30));
        content.push('\n');
        content.push_str(&format!("Path Length: {}\n", summary.path_length));
        content.push_str(&format!("Nodes Expanded: {}\n", summary.nodes_expanded));
        content.push_str(&format!("Max Queue Size: {}\n", summary.max_queue_size));
        content.push_str(&format!(
            "Execution Time: {:.4} seconds\n",
            summary.elapsed_seconds
        ));
        content.push_str(&format!(
            "Nodes per Second: {:.2}\n\n",
            summary.nodes_per_second
        ));
    }

    fs::write(&file, content)?;
    Ok(file)
}
