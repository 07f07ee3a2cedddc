//! Report Fill - axle-overload violation document assembly
//!
//! This crate fills the two pages of a violation template PDF from
//! operator-entered field values:
//! - A per-document-kind coordinate table (baseline plus optional
//!   partial override) maps field names to page positions
//! - The assembler walks each kind's field list, formats and places
//!   values, accumulates axle-load totals, and emphasizes values that
//!   strictly exceed the configured weight limits
//! - Pure helpers compute fines, overweight percentages, and due dates
//!
//! # Example
//!
//! ```ignore
//! use report_fill::{Assembler, DocKind, FormData};
//! use pdf_fill::FontPair;
//!
//! let fonts = FontPair::new("nanum", &regular_ttf)?.with_bold(&bold_ttf)?;
//! let assembler = Assembler::new()
//!     .with_fonts(fonts)
//!     .with_override_json(&saved_override);
//! let completed = assembler.assemble(&template_bytes, DocKind::Report, &form)?;
//! let bytes = completed.into_bytes()?;
//! ```

pub mod assembler;
pub mod calc;
pub mod coords;
pub mod fields;
pub mod form;
pub mod resolver;
pub mod threshold;

pub use assembler::{Assembler, CompletedDocument, Notify, PlaceText, SilentNotifier};
pub use coords::{CoordinateTable, FieldCoordinate};
pub use form::{FormData, WitnessEntry};
pub use resolver::CoordinateResolver;
pub use threshold::ThresholdRule;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during document assembly
#[derive(Debug, Error)]
pub enum FillError {
    #[error("Failed to open template: {0}")]
    Template(String),

    #[error("Template has {have} pages but a {kind:?} document needs page {required}")]
    PageMissing {
        kind: DocKind,
        required: usize,
        have: usize,
    },

    #[error("Placement failed: {0}")]
    Render(#[from] pdf_fill::PdfError),
}

/// Result type for assembly operations
pub type Result<T> = std::result::Result<T, FillError>;

/// The two documents produced from one violation template
///
/// Each kind is bound to a fixed page of the multi-page template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    /// Violation detection report (page 1 of the template)
    Report,
    /// Violator's written statement (page 2 of the template)
    Statement,
}

impl DocKind {
    /// Template page this kind is written to (1-indexed)
    pub fn page(&self) -> usize {
        match self {
            DocKind::Report => 1,
            DocKind::Statement => 2,
        }
    }

    /// Korean document label used in suggested filenames
    pub fn label(&self) -> &'static str {
        match self {
            DocKind::Report => "적발보고서",
            DocKind::Statement => "진술서",
        }
    }
}

/// Suggested download filename: `"<label>_<YYYYMMDD>.pdf"`
pub fn suggested_filename(label: &str, date: NaiveDate) -> String {
    format!("{}_{}.pdf", label, date.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dockind_pages() {
        assert_eq!(DocKind::Report.page(), 1);
        assert_eq!(DocKind::Statement.page(), 2);
    }

    #[test]
    fn test_suggested_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
        assert_eq!(
            suggested_filename("적발보고서", date),
            "적발보고서_20260113.pdf"
        );
    }

    #[test]
    fn test_suggested_filename_pads_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        assert_eq!(suggested_filename("진술서", date), "진술서_20260801.pdf");
    }

    #[test]
    fn test_dockind_serde() {
        let kind: DocKind = serde_json::from_str("\"report\"").unwrap();
        assert_eq!(kind, DocKind::Report);
        assert_eq!(serde_json::to_string(&DocKind::Statement).unwrap(), "\"statement\"");
    }
}
