//! Benchmark puzzle catalog.
//!
//! Puzzle definitions deserialize directly from JSON and are validated
//! before a state is ever built from them: an invalid entry is rejected with
//! enumerated messages rather than surfacing as an engine-level fault.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{RailwayState, StateError, SIDING_CAPACITY};

/// Difficulty tier of a benchmark puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A puzzle definition as stored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub main_track: Vec<String>,
    pub sidings: Vec<Vec<String>>,
    pub goal_order: Vec<String>,
    pub description: String,
    pub difficulty: Difficulty,
    /// Minimal number of moves needed to solve the puzzle.
    pub expected_depth: usize,
}

impl PuzzleConfig {
    /// Check the catalog schema rules, collecting every violation.
    pub fn validate(&self) -> PuzzleValidation {
        let mut validation = PuzzleValidation::default();

        if self.main_track.is_empty() {
            validation.errors.push("Main track cannot be empty".to_string());
        }
        if self.sidings.is_empty() {
            validation.errors.push("At least one siding is required".to_string());
        }
        for (i, siding) in self.sidings.iter().enumerate() {
            if siding.len() > SIDING_CAPACITY {
                validation.errors.push(format!(
                    "Siding {} holds {} trains, more than the capacity of {}",
                    i + 1,
                    siding.len(),
                    SIDING_CAPACITY
                ));
            }
        }
        if self.goal_order.is_empty() {
            validation.errors.push("Goal order cannot be empty".to_string());
        }

        let all_trains: Vec<&String> = self
            .main_track
            .iter()
            .chain(self.sidings.iter().flatten())
            .collect();
        let unique: HashSet<&String> = all_trains.iter().copied().collect();
        if unique.len() != all_trains.len() {
            validation
                .errors
                .push("Each train ID must appear exactly once".to_string());
        }
        let goal_set: HashSet<&String> = self.goal_order.iter().collect();
        if goal_set != unique || self.goal_order.len() != unique.len() {
            validation.errors.push(
                "Goal order must contain exactly the same trains as the initial state"
                    .to_string(),
            );
        }

        if self.sidings.len() > 3 {
            validation
                .warnings
                .push("More than 3 sidings may make the puzzle too easy".to_string());
        }
        if all_trains.len() > 5 {
            validation
                .warnings
                .push("More than 5 trains may make the puzzle too complex".to_string());
        }

        validation
    }

    /// Build the initial search state for this puzzle.
    pub fn to_state(&self) -> Result<RailwayState, StateError> {
        RailwayState::new(
            self.main_track.clone(),
            self.sidings.clone(),
            self.goal_order.clone(),
        )
    }
}

/// Outcome of validating one catalog entry.
#[derive(Debug, Clone, Default)]
pub struct PuzzleValidation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl PuzzleValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Errors raised by catalog lookup and persistence.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown benchmark puzzle {0:?}")]
    UnknownPuzzle(String),
    #[error("puzzle {name:?} failed validation: {}", .errors.join("; "))]
    Invalid { name: String, errors: Vec<String> },
    #[error("catalog I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A named collection of validated puzzle definitions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    puzzles: BTreeMap<String, PuzzleConfig>,
}

impl Catalog {
    /// The built-in benchmark set.
    pub fn builtin() -> Self {
        let mut puzzles = BTreeMap::new();
        puzzles.insert(
            "easy1".to_string(),
            puzzle(
                &["1", "2", "3"],
                2,
                &["1", "2", "3"],
                "Already in goal order; no moves required",
                Difficulty::Easy,
                0,
            ),
        );
        puzzles.insert(
            "easy2".to_string(),
            puzzle(
                &["2", "1", "3"],
                2,
                &["1", "2", "3"],
                "Swap the two front trains",
                Difficulty::Easy,
                4,
            ),
        );
        puzzles.insert(
            "medium1".to_string(),
            puzzle(
                &["3", "1", "2"],
                2,
                &["1", "2", "3"],
                "Rotate three trains using two sidings",
                Difficulty::Medium,
                6,
            ),
        );
        puzzles.insert(
            "medium2".to_string(),
            puzzle(
                &["2", "3", "1"],
                3,
                &["1", "2", "3"],
                "Rotate three trains using three sidings",
                Difficulty::Medium,
                6,
            ),
        );
        puzzles.insert(
            "hard1".to_string(),
            puzzle(
                &["4", "3", "2", "1"],
                3,
                &["1", "2", "3", "4"],
                "Reverse four trains",
                Difficulty::Hard,
                10,
            ),
        );
        puzzles.insert(
            "hard2".to_string(),
            puzzle(
                &["2", "4", "1", "3"],
                3,
                &["1", "2", "3", "4"],
                "Untangle four interleaved trains",
                Difficulty::Hard,
                8,
            ),
        );
        Self { puzzles }
    }

    /// Parse a catalog from JSON, validating every entry.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let puzzles: BTreeMap<String, PuzzleConfig> = serde_json::from_str(json)?;
        for (name, config) in &puzzles {
            let validation = config.validate();
            if !validation.is_valid() {
                return Err(CatalogError::Invalid {
                    name: name.clone(),
                    errors: validation.errors,
                });
            }
        }
        Ok(Self { puzzles })
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.puzzles)?)
    }

    pub fn to_file(&self, path: &Path) -> Result<(), CatalogError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Look up a puzzle by name, validating it before handing it out.
    pub fn get(&self, name: &str) -> Result<&PuzzleConfig, CatalogError> {
        let config = self
            .puzzles
            .get(name)
            .ok_or_else(|| CatalogError::UnknownPuzzle(name.to_string()))?;
        let validation = config.validate();
        if !validation.is_valid() {
            return Err(CatalogError::Invalid {
                name: name.to_string(),
                errors: validation.errors,
            });
        }
        for warning in &validation.warnings {
            warn!("puzzle {name:?}: {warning}");
        }
        Ok(config)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PuzzleConfig)> {
        self.puzzles.iter().map(|(name, config)| (name.as_str(), config))
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }
}

fn puzzle(
    main_track: &[&str],
    num_sidings: usize,
    goal_order: &[&str],
    description: &str,
    difficulty: Difficulty,
    expected_depth: usize,
) -> PuzzleConfig {
    PuzzleConfig {
        main_track: main_track.iter().map(|s| s.to_string()).collect(),
        sidings: vec![Vec::new(); num_sidings],
        goal_order: goal_order.iter().map(|s| s.to_string()).collect(),
        description: description.to_string(),
        difficulty,
        expected_depth,
    }
}
