//! Document assembly
//!
//! The assembler walks a document kind's field list, resolves each
//! field's coordinate, and places the entered values on the kind's
//! template page. Axle slots are accumulated into totals along the
//! way, and weights past the configured limits are emphasized.

use crate::calc::{format_tons, round2_half_up};
use crate::fields::{
    axle_measured, axle_violation, scalar_fields, witness_field, AXLE_SLOTS, MAX_WITNESSES,
    TOTAL_MEASURED, TOTAL_VIOLATION,
};
use crate::form::FormData;
use crate::resolver::CoordinateResolver;
use crate::threshold::ThresholdRule;
use crate::{DocKind, FillError, Result};
use pdf_fill::{FontPair, GlyphPolicy, PdfDocument, TextStyle};

/// Contract the rendering capability satisfies: write one string at a
/// page position with a style
///
/// Whitespace-only text is a silent no-op, never an error.
pub trait PlaceText {
    fn place(&mut self, text: &str, page: usize, x: f64, y: f64, style: &TextStyle)
        -> pdf_fill::Result<()>;
}

impl PlaceText for PdfDocument {
    fn place(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        style: &TextStyle,
    ) -> pdf_fill::Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        self.insert_text(text, page, x, y, style)
    }
}

/// Receiver for values the assembler drops on the floor
///
/// Axle entries that do not parse as positive numbers are excluded
/// from placement and from the sums; the notifier is told so a caller
/// can surface it. The default does nothing.
pub trait Notify {
    fn value_skipped(&self, kind: DocKind, field: &str, raw: &str);
}

/// Notifier that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notify for SilentNotifier {
    fn value_skipped(&self, _kind: DocKind, _field: &str, _raw: &str) {}
}

/// A filled document plus the page it was written to
///
/// Owned exclusively by the caller; nothing in the assembler retains
/// a handle after `assemble` returns.
pub struct CompletedDocument {
    doc: PdfDocument,
    page: usize,
}

impl CompletedDocument {
    /// Template page the values were placed on (1-indexed)
    pub fn page(&self) -> usize {
        self.page
    }

    /// Serialize the filled document
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        Ok(self.doc.to_bytes()?)
    }

    /// Take the underlying document
    pub fn into_inner(self) -> PdfDocument {
        self.doc
    }
}

/// Fills one document kind's page from operator-entered form data
pub struct Assembler {
    resolver: CoordinateResolver,
    threshold: ThresholdRule,
    fonts: Option<FontPair>,
    glyph_policy: GlyphPolicy,
    notifier: Box<dyn Notify>,
}

impl Assembler {
    /// Assembler over the baseline layout with default limits
    ///
    /// Fonts must be supplied via [`with_fonts`](Self::with_fonts)
    /// before any non-empty value can be placed.
    pub fn new() -> Self {
        Self {
            resolver: CoordinateResolver::new(),
            threshold: ThresholdRule::default(),
            fonts: None,
            glyph_policy: GlyphPolicy::default(),
            notifier: Box::new(SilentNotifier),
        }
    }

    /// Set the font pair used for all placements
    pub fn with_fonts(mut self, fonts: FontPair) -> Self {
        self.fonts = Some(fonts);
        self
    }

    /// Install a partial coordinate override table
    pub fn with_override(mut self, table: crate::CoordinateTable) -> Self {
        self.resolver = self.resolver.with_override(table);
        self
    }

    /// Install an override table from its persisted JSON form
    ///
    /// Malformed JSON means no override; the baseline stays in effect.
    pub fn with_override_json(self, json: &str) -> Self {
        match crate::CoordinateTable::from_json(json) {
            Some(table) => self.with_override(table),
            None => self,
        }
    }

    /// Replace the default weight limits
    pub fn with_threshold(mut self, threshold: ThresholdRule) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the default glyph policy
    pub fn with_glyph_policy(mut self, policy: GlyphPolicy) -> Self {
        self.glyph_policy = policy;
        self
    }

    /// Replace the default (silent) notifier
    pub fn with_notifier(mut self, notifier: Box<dyn Notify>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Fill one document kind from a template
    ///
    /// Opens the template bytes, verifies the kind's page exists, and
    /// places every present field value. The returned document is
    /// fully owned by the caller.
    pub fn assemble(
        &self,
        template: &[u8],
        kind: DocKind,
        form: &FormData,
    ) -> Result<CompletedDocument> {
        let mut doc = PdfDocument::open_from_bytes(template)
            .map_err(|e| FillError::Template(e.to_string()))?;

        let have = doc.page_count();
        let required = kind.page();
        if have < required {
            return Err(FillError::PageMissing {
                kind,
                required,
                have,
            });
        }

        if let Some(fonts) = &self.fonts {
            doc.set_fonts(fonts.clone());
        }
        doc.set_glyph_policy(self.glyph_policy);

        self.fill(&mut doc, kind, form)?;

        Ok(CompletedDocument {
            doc,
            page: kind.page(),
        })
    }

    /// Place all of a kind's fields through a placement adapter
    ///
    /// Exposed separately from [`assemble`](Self::assemble) so the
    /// placement sequence can be driven against any [`PlaceText`]
    /// implementation.
    pub fn fill<P: PlaceText>(&self, placer: &mut P, kind: DocKind, form: &FormData) -> Result<()> {
        let page = kind.page();

        // Scalar fields: present and non-empty values only, coordinates
        // may be absent on partial templates
        for field in scalar_fields(kind) {
            let value = match form.get(field) {
                Some(v) if !v.trim().is_empty() => v.trim(),
                _ => continue,
            };
            let coord = match self.resolver.resolve(kind, field) {
                Some(c) => c,
                None => continue,
            };
            let style = TextStyle::new(coord.font_size);
            placer.place(value, page, coord.x, coord.y, &style)?;
        }

        // Axle slots: only positive parseable values are placed and
        // summed; measured values past the axle limit are emphasized
        let mut total_measured = 0.0;
        let mut total_violation = 0.0;

        for slot in 1..=AXLE_SLOTS {
            let field = axle_measured(slot);
            if let Some(v) = self.axle_value(kind, &field, form) {
                total_measured += v;
                if let Some(coord) = self.resolver.resolve(kind, &field) {
                    let style = self
                        .threshold
                        .style_for(coord.font_size, self.threshold.exceeds_axle(v));
                    placer.place(&format_tons(v), page, coord.x, coord.y, &style)?;
                }
            }

            let field = axle_violation(slot);
            if let Some(v) = self.axle_value(kind, &field, form) {
                total_violation += v;
                if let Some(coord) = self.resolver.resolve(kind, &field) {
                    let style = TextStyle::new(coord.font_size);
                    placer.place(&format_tons(v), page, coord.x, coord.y, &style)?;
                }
            }
        }

        // Totals are placed only when something contributed
        let total_measured = round2_half_up(total_measured);
        if total_measured > 0.0 {
            if let Some(coord) = self.resolver.resolve(kind, TOTAL_MEASURED) {
                let style = self.threshold.style_for(
                    coord.font_size,
                    self.threshold.exceeds_total(total_measured),
                );
                placer.place(&format_tons(total_measured), page, coord.x, coord.y, &style)?;
            }
        }

        let total_violation = round2_half_up(total_violation);
        if total_violation > 0.0 {
            if let Some(coord) = self.resolver.resolve(kind, TOTAL_VIOLATION) {
                let style = TextStyle::new(coord.font_size);
                placer.place(
                    &format_tons(total_violation),
                    page,
                    coord.x,
                    coord.y,
                    &style,
                )?;
            }
        }

        // Witness lines exist only on the statement; entries past the
        // third slot are dropped without error
        if kind == DocKind::Statement {
            for (i, witness) in form.witnesses.iter().take(MAX_WITNESSES).enumerate() {
                let slot = i + 1;
                let parts = [
                    ("office", witness.office.as_str()),
                    ("position", witness.position.as_str()),
                    ("name", witness.name.as_str()),
                ];
                for (part, value) in parts {
                    if value.trim().is_empty() {
                        continue;
                    }
                    let field = witness_field(slot, part);
                    if let Some(coord) = self.resolver.resolve(kind, &field) {
                        let style = TextStyle::new(coord.font_size);
                        placer.place(value.trim(), page, coord.x, coord.y, &style)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Positive parseable axle entry, or nothing
    ///
    /// Entered values that fail this filter are reported to the
    /// notifier rather than erroring.
    fn axle_value(&self, kind: DocKind, field: &str, form: &FormData) -> Option<f64> {
        let raw = form.get(field)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v > 0.0 => Some(v),
            _ => {
                self.notifier.value_skipped(kind, field, raw);
                None
            }
        }
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}
