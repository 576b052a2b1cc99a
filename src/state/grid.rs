//! Grid dimensions per difficulty level.

use serde::{Deserialize, Serialize};

/// Difficulty presets, index = level. Columns × rows.
pub const DIFFICULTY_PRESETS: [GridConfig; 4] = [
    GridConfig::new(6, 3),
    GridConfig::new(8, 4),
    GridConfig::new(10, 5),
    GridConfig::new(12, 6),
];

/// Grid shape. Cells are indexed row-major: `row * columns + column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
}

impl GridConfig {
    pub const fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Resolve a difficulty level, clamped to the preset list.
    pub fn for_level(level: usize) -> Self {
        DIFFICULTY_PRESETS[clamp_level(level)]
    }

    pub fn total_cells(&self) -> usize {
        self.columns * self.rows
    }

    /// Column of a cell index.
    pub fn column_of(&self, index: usize) -> usize {
        index % self.columns
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.total_cells()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "columns": self.columns,
            "rows": self.rows,
            "total_cells": self.total_cells()
        })
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        DIFFICULTY_PRESETS[0]
    }
}

/// Number of difficulty levels.
pub fn level_count() -> usize {
    DIFFICULTY_PRESETS.len()
}

/// Clamp a requested level to the valid range.
pub fn clamp_level(level: usize) -> usize {
    level.min(DIFFICULTY_PRESETS.len() - 1)
}
