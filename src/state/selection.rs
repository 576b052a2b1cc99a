//! Cell selection and its legality rules.
//!
//! A selection is legal when it is non-empty, covers at most 85% of the grid,
//! and has at least one cell in every column. The ledger re-checks all of
//! this; the local check only gates the start button.

use std::collections::BTreeSet;
use std::fmt;

use super::grid::GridConfig;

/// Share of the grid a selection may cover, in percent.
pub const MAX_COVERAGE_PERCENT: usize = 85;

/// Largest legal selection for a grid: `floor(total_cells * 0.85)`.
pub fn max_allowed(total_cells: usize) -> usize {
    total_cells * MAX_COVERAGE_PERCENT / 100
}

/// Why a selection is not legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionIssue {
    /// Nothing selected
    Empty,
    /// More cells than the 85% cap
    TooManyCells { selected: usize, max_allowed: usize },
    /// Columns without a selected cell
    MissingColumns { columns: Vec<usize> },
}

impl fmt::Display for SelectionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Select squares to start"),
            Self::TooManyCells {
                selected,
                max_allowed,
            } => write!(
                f,
                "Too many squares selected ({}/{}, max 85%)",
                selected, max_allowed
            ),
            Self::MissingColumns { columns } => write!(
                f,
                "Must select at least one square in each column (missing {:?})",
                columns
            ),
        }
    }
}

/// Selected cells of one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    config: GridConfig,
    cells: BTreeSet<usize>,
}

impl SelectionSet {
    /// Empty selection sized to the grid.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            cells: BTreeSet::new(),
        }
    }

    /// Selection from raw indices. Indices outside the grid are dropped; the
    /// 85% cap is not applied so restored state can be checked with `issue()`.
    pub fn from_indices(config: GridConfig, indices: impl IntoIterator<Item = usize>) -> Self {
        let cells = indices
            .into_iter()
            .filter(|i| config.contains(*i))
            .collect();
        Self { config, cells }
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn max_allowed(&self) -> usize {
        max_allowed(self.config.total_cells())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }

    /// Flip membership of a cell. Returns whether the selection changed.
    ///
    /// Adding is refused at the cap; removing is always allowed.
    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.config.contains(index) {
            return false;
        }
        if self.cells.remove(&index) {
            return true;
        }
        if self.cells.len() >= self.max_allowed() {
            return false;
        }
        self.cells.insert(index)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Selected indices, ascending.
    pub fn indices(&self) -> Vec<usize> {
        self.cells.iter().copied().collect()
    }

    /// Columns with no selected cell.
    pub fn missing_columns(&self) -> Vec<usize> {
        let mut covered = vec![false; self.config.columns];
        for &index in &self.cells {
            covered[self.config.column_of(index)] = true;
        }
        covered
            .iter()
            .enumerate()
            .filter(|(_, hit)| !**hit)
            .map(|(column, _)| column)
            .collect()
    }

    pub fn covers_every_column(&self) -> bool {
        self.missing_columns().is_empty()
    }

    /// First rule the selection breaks, if any.
    pub fn issue(&self) -> Option<SelectionIssue> {
        let selected = self.cells.len();
        let max_allowed = self.max_allowed();

        if selected == 0 {
            return Some(SelectionIssue::Empty);
        }
        if selected > max_allowed {
            return Some(SelectionIssue::TooManyCells {
                selected,
                max_allowed,
            });
        }
        let missing = self.missing_columns();
        if !missing.is_empty() {
            return Some(SelectionIssue::MissingColumns { columns: missing });
        }
        None
    }

    pub fn is_valid(&self) -> bool {
        self.issue().is_none()
    }

    /// Selected share of the grid, 0.0..=1.0.
    pub fn coverage(&self) -> f64 {
        let total = self.config.total_cells();
        if total == 0 {
            return 0.0;
        }
        self.cells.len() as f64 / total as f64
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "cells": self.indices(),
            "selected": self.len(),
            "max_allowed": self.max_allowed(),
            "every_column": self.covers_every_column(),
            "coverage_percent": self.coverage() * 100.0
        })
    }
}
