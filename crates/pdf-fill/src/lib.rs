//! PDF Fill - coordinate text placement on existing PDF templates
//!
//! This crate provides the document-rendering capability consumed by the
//! report assembler:
//! - Opening and saving PDF documents (file or bytes)
//! - Embedding a TrueType font pair (regular + bold)
//! - Writing text at specific page coordinates with size and color
//! - A per-character degraded fallback for characters the font lacks
//!
//! # Example
//!
//! ```ignore
//! use pdf_fill::{FontPair, PdfDocument, TextStyle};
//!
//! let mut doc = PdfDocument::open("template.pdf")?;
//! doc.set_fonts(FontPair::new("nanum", &regular_ttf)?.with_bold(&bold_ttf)?);
//! doc.insert_text("서울특별시", 1, 120.0, 240.0, &TextStyle::new(10.0))?;
//! doc.save("filled.pdf")?;
//! ```

mod document;
mod font;
mod text;

pub use document::{Color, PdfDocument, TextStyle};
pub use font::{apply_glyph_policy, FontData, FontPair, GlyphPolicy};
pub use text::{generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to open PDF: {0}")]
    OpenError(String),

    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("No fonts loaded")]
    FontNotLoaded,

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("No glyph for character {0:?} and strict glyph policy is active")]
    MissingGlyph(char),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;
