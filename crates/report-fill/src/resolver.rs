//! Coordinate resolution
//!
//! Resolution order is fixed: a field present in the override table
//! wins, every other field falls through to the baseline. Overrides
//! never merge into the baseline, so dropping the override restores
//! the original layout wholesale.

use crate::coords::{CoordinateTable, FieldCoordinate};
use crate::DocKind;

/// Resolves field coordinates against baseline plus optional override
#[derive(Debug, Clone)]
pub struct CoordinateResolver {
    baseline: CoordinateTable,
    override_table: Option<CoordinateTable>,
}

impl CoordinateResolver {
    /// Resolver over the hand-authored baseline with no override
    pub fn new() -> Self {
        Self {
            baseline: CoordinateTable::baseline(),
            override_table: None,
        }
    }

    /// Install a partial override table
    pub fn with_override(mut self, table: CoordinateTable) -> Self {
        self.override_table = Some(table);
        self
    }

    /// Remove the override, restoring the baseline layout
    pub fn clear_override(&mut self) {
        self.override_table = None;
    }

    /// Whether an override table is installed
    pub fn has_override(&self) -> bool {
        self.override_table.is_some()
    }

    /// Coordinate for a field, override first then baseline
    pub fn resolve(&self, kind: DocKind, field: &str) -> Option<&FieldCoordinate> {
        if let Some(table) = &self.override_table {
            if let Some(coord) = table.get(kind, field) {
                return Some(coord);
            }
        }
        self.baseline.get(kind, field)
    }
}

impl Default for CoordinateResolver {
    fn default() -> Self {
        Self::new()
    }
}
