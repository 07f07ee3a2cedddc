//! Field lists for each document kind
//!
//! The assembler walks these lists in order; the coordinate table is
//! keyed by the same names.

use crate::DocKind;

/// Number of per-axle weight slots on the report form
pub const AXLE_SLOTS: usize = 8;

/// Witness slots available on the statement form
pub const MAX_WITNESSES: usize = 3;

/// Total of the measured axle loads
pub const TOTAL_MEASURED: &str = "total_measured";

/// Total of the violation axle loads
pub const TOTAL_VIOLATION: &str = "total_violation";

/// Scalar fields of the detection report (page 1)
const REPORT_FIELDS: &[&str] = &[
    "doc_year",
    "doc_month",
    "doc_day",
    "doc_hour",
    "doc_minute",
    "location",
    "office_name",
    "driver_name",
    "driver_birth",
    "driver_phone",
    "driver_address",
    "company_name",
    "company_phone",
    "vehicle_number",
    "vehicle_type",
    "axle_count",
    "cargo",
    "route_from",
    "route_to",
    "width_measured",
    "width_violation",
    "length_measured",
    "length_violation",
    "height_measured",
    "height_violation",
    "allowed_total",
    "overweight_percent",
    "fine_amount",
    "due_date",
];

/// Scalar fields of the violator's statement (page 2)
const STATEMENT_FIELDS: &[&str] = &[
    "doc_year",
    "doc_month",
    "doc_day",
    "location",
    "name",
    "birth_date",
    "phone",
    "address",
    "vehicle_number",
    "statement_body",
];

/// Scalar fields defined for a document kind
pub fn scalar_fields(kind: DocKind) -> &'static [&'static str] {
    match kind {
        DocKind::Report => REPORT_FIELDS,
        DocKind::Statement => STATEMENT_FIELDS,
    }
}

/// Field name of a measured axle slot (1-indexed)
pub fn axle_measured(slot: usize) -> String {
    format!("axle_measured_{slot}")
}

/// Field name of a violation axle slot (1-indexed)
pub fn axle_violation(slot: usize) -> String {
    format!("axle_violation_{slot}")
}

/// Field name of one part of a witness slot (1-indexed)
///
/// `part` is one of "office", "position", "name".
pub fn witness_field(slot: usize, part: &str) -> String {
    format!("witness_{slot}_{part}")
}

/// Every field the baseline coordinate table must cover for a kind
pub fn required_fields(kind: DocKind) -> Vec<String> {
    let mut fields: Vec<String> = scalar_fields(kind).iter().map(|f| f.to_string()).collect();

    match kind {
        DocKind::Report => {
            for slot in 1..=AXLE_SLOTS {
                fields.push(axle_measured(slot));
                fields.push(axle_violation(slot));
            }
            fields.push(TOTAL_MEASURED.to_string());
            fields.push(TOTAL_VIOLATION.to_string());
        }
        DocKind::Statement => {
            for slot in 1..=MAX_WITNESSES {
                for part in ["office", "position", "name"] {
                    fields.push(witness_field(slot, part));
                }
            }
        }
    }

    fields
}
