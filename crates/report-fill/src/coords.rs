//! Coordinate tables
//!
//! A coordinate table maps field names to page positions per document
//! kind. The hand-authored baseline covers every required field of both
//! forms; override tables (produced externally, persisted as JSON) are
//! partial and take precedence field by field at resolution time.

use crate::fields::{
    axle_measured, axle_violation, witness_field, AXLE_SLOTS, MAX_WITNESSES, TOTAL_MEASURED,
    TOTAL_VIOLATION,
};
use crate::DocKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Position and size of one field on its template page
///
/// Coordinates are in points; `y` is measured from the top of the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldCoordinate {
    /// X coordinate in points
    pub x: f64,
    /// Y coordinate in points (from top)
    pub y: f64,
    /// Font size in points
    #[serde(rename = "fontSize")]
    pub font_size: f32,
}

/// Per-kind mapping from field name to coordinate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTable {
    /// Detection report fields (template page 1)
    #[serde(default)]
    pub report: HashMap<String, FieldCoordinate>,
    /// Statement fields (template page 2)
    #[serde(default)]
    pub statement: HashMap<String, FieldCoordinate>,
}

impl CoordinateTable {
    /// Look up a field's coordinate for a document kind
    pub fn get(&self, kind: DocKind, field: &str) -> Option<&FieldCoordinate> {
        self.kind_map(kind).get(field)
    }

    /// Insert or replace a field's coordinate
    pub fn insert(&mut self, kind: DocKind, field: &str, coord: FieldCoordinate) {
        self.kind_map_mut(kind).insert(field.to_string(), coord);
    }

    fn kind_map(&self, kind: DocKind) -> &HashMap<String, FieldCoordinate> {
        match kind {
            DocKind::Report => &self.report,
            DocKind::Statement => &self.statement,
        }
    }

    fn kind_map_mut(&mut self, kind: DocKind) -> &mut HashMap<String, FieldCoordinate> {
        match kind {
            DocKind::Report => &mut self.report,
            DocKind::Statement => &mut self.statement,
        }
    }

    /// Parse a previously saved (partial) table from JSON
    ///
    /// Absent or malformed data means "no override"; entries with a
    /// non-positive font size or negative position are dropped rather
    /// than trusted.
    pub fn from_json(json: &str) -> Option<Self> {
        let mut table: CoordinateTable = serde_json::from_str(json).ok()?;
        table.report.retain(|_, c| c.is_valid());
        table.statement.retain(|_, c| c.is_valid());
        Some(table)
    }

    /// Serialize the table for external persistence
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// The hand-authored baseline layout for the standard template
    ///
    /// Total over the required field set of both kinds; positions are
    /// in A4 point-space with y from the top of the page.
    pub fn baseline() -> Self {
        let mut t = CoordinateTable::default();

        // --- Detection report, page 1 ---
        let report: &[(&str, f64, f64, f32)] = &[
            ("doc_year", 170.0, 118.0, 10.0),
            ("doc_month", 215.0, 118.0, 10.0),
            ("doc_day", 250.0, 118.0, 10.0),
            ("doc_hour", 290.0, 118.0, 10.0),
            ("doc_minute", 325.0, 118.0, 10.0),
            ("location", 160.0, 142.0, 10.0),
            ("office_name", 160.0, 166.0, 10.0),
            ("driver_name", 160.0, 198.0, 10.0),
            ("driver_birth", 390.0, 198.0, 10.0),
            ("driver_address", 160.0, 222.0, 9.0),
            ("driver_phone", 390.0, 222.0, 10.0),
            ("company_name", 160.0, 246.0, 10.0),
            ("company_phone", 390.0, 246.0, 10.0),
            ("vehicle_number", 160.0, 278.0, 10.0),
            ("vehicle_type", 390.0, 278.0, 10.0),
            ("axle_count", 160.0, 302.0, 10.0),
            ("cargo", 390.0, 302.0, 10.0),
            ("route_from", 160.0, 326.0, 10.0),
            ("route_to", 390.0, 326.0, 10.0),
            ("width_measured", 160.0, 360.0, 10.0),
            ("width_violation", 390.0, 360.0, 10.0),
            ("length_measured", 160.0, 384.0, 10.0),
            ("length_violation", 390.0, 384.0, 10.0),
            ("height_measured", 160.0, 408.0, 10.0),
            ("height_violation", 390.0, 408.0, 10.0),
            ("allowed_total", 160.0, 432.0, 10.0),
            ("overweight_percent", 160.0, 636.0, 10.0),
            ("fine_amount", 160.0, 660.0, 10.0),
            ("due_date", 390.0, 660.0, 10.0),
        ];
        for &(field, x, y, size) in report {
            t.insert(DocKind::Report, field, coord(x, y, size));
        }

        // Axle table: one row per slot, measured and violation columns
        for slot in 1..=AXLE_SLOTS {
            let y = 468.0 + (slot as f64 - 1.0) * 16.0;
            t.insert(DocKind::Report, &axle_measured(slot), coord(230.0, y, 9.0));
            t.insert(DocKind::Report, &axle_violation(slot), coord(430.0, y, 9.0));
        }
        t.insert(DocKind::Report, TOTAL_MEASURED, coord(230.0, 604.0, 10.0));
        t.insert(DocKind::Report, TOTAL_VIOLATION, coord(430.0, 604.0, 10.0));

        // --- Violator's statement, page 2 ---
        let statement: &[(&str, f64, f64, f32)] = &[
            ("doc_year", 150.0, 120.0, 10.0),
            ("doc_month", 195.0, 120.0, 10.0),
            ("doc_day", 230.0, 120.0, 10.0),
            ("location", 150.0, 148.0, 10.0),
            ("name", 150.0, 180.0, 10.0),
            ("birth_date", 390.0, 180.0, 10.0),
            ("address", 150.0, 208.0, 9.0),
            ("phone", 390.0, 208.0, 10.0),
            ("vehicle_number", 150.0, 236.0, 10.0),
            ("statement_body", 90.0, 300.0, 10.0),
        ];
        for &(field, x, y, size) in statement {
            t.insert(DocKind::Statement, field, coord(x, y, size));
        }

        // Witness rows at the bottom of the statement
        for slot in 1..=MAX_WITNESSES {
            let y = 640.0 + (slot as f64 - 1.0) * 28.0;
            t.insert(
                DocKind::Statement,
                &witness_field(slot, "office"),
                coord(110.0, y, 9.0),
            );
            t.insert(
                DocKind::Statement,
                &witness_field(slot, "position"),
                coord(280.0, y, 9.0),
            );
            t.insert(
                DocKind::Statement,
                &witness_field(slot, "name"),
                coord(440.0, y, 9.0),
            );
        }

        t
    }
}

impl FieldCoordinate {
    /// Inside the page's point-space with a usable font size
    pub fn is_valid(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.font_size > 0.0
    }
}

fn coord(x: f64, y: f64, font_size: f32) -> FieldCoordinate {
    FieldCoordinate { x, y, font_size }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::required_fields;
    use pretty_assertions::assert_eq;

    // A4 page bounds in points
    const PAGE_WIDTH: f64 = 595.28;
    const PAGE_HEIGHT: f64 = 841.89;

    #[test]
    fn test_baseline_is_total_over_required_fields() {
        let baseline = CoordinateTable::baseline();
        for kind in [DocKind::Report, DocKind::Statement] {
            for field in required_fields(kind) {
                assert!(
                    baseline.get(kind, &field).is_some(),
                    "baseline missing {kind:?} field {field}"
                );
            }
        }
    }

    #[test]
    fn test_baseline_coordinates_within_page() {
        let baseline = CoordinateTable::baseline();
        for map in [&baseline.report, &baseline.statement] {
            for (field, c) in map {
                assert!(
                    c.x >= 0.0 && c.x <= PAGE_WIDTH && c.y >= 0.0 && c.y <= PAGE_HEIGHT,
                    "{field} out of page bounds: {c:?}"
                );
                assert!(c.font_size > 0.0, "{field} has non-positive font size");
            }
        }
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{
            "report": {
                "location": { "x": 99.0, "y": 150.0, "fontSize": 11.0 }
            }
        }"#;

        let table = CoordinateTable::from_json(json).unwrap();
        assert_eq!(
            table.get(DocKind::Report, "location"),
            Some(&FieldCoordinate {
                x: 99.0,
                y: 150.0,
                font_size: 11.0
            })
        );
        assert!(table.statement.is_empty());
    }

    #[test]
    fn test_from_json_malformed_is_no_override() {
        assert!(CoordinateTable::from_json("").is_none());
        assert!(CoordinateTable::from_json("not json").is_none());
        assert!(CoordinateTable::from_json("[1, 2, 3]").is_none());
    }

    #[test]
    fn test_from_json_drops_invalid_entries() {
        let json = r#"{
            "report": {
                "location": { "x": 99.0, "y": 150.0, "fontSize": 0.0 },
                "cargo": { "x": 10.0, "y": 20.0, "fontSize": 9.0 }
            }
        }"#;

        let table = CoordinateTable::from_json(json).unwrap();
        assert!(table.get(DocKind::Report, "location").is_none());
        assert!(table.get(DocKind::Report, "cargo").is_some());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut table = CoordinateTable::default();
        table.insert(DocKind::Statement, "name", coord(150.0, 180.0, 10.0));

        let json = table.to_json().unwrap();
        let parsed = CoordinateTable::from_json(&json).unwrap();
        assert_eq!(parsed, table);
    }
}
