//! PDF Document wrapper

use crate::font::{apply_glyph_policy, FontPair, GlyphPolicy};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Red color
    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Style for a single text placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points
    pub size: f32,
    /// Use the bold variant (falls back to regular if none loaded)
    pub bold: bool,
    /// Text color
    pub color: Color,
}

impl TextStyle {
    /// Regular black text at the given size
    pub fn new(size: f32) -> Self {
        Self {
            size,
            bold: false,
            color: Color::black(),
        }
    }

    /// Switch to the bold variant
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the text color
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// PDF Document wrapper providing coordinate text placement
///
/// Text operators are buffered per page and flushed into the content
/// streams at save time; fonts are embedded once, covering every
/// character placed anywhere in the document.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Loaded font pair, injected once via set_fonts
    fonts: Option<FontPair>,
    /// Policy for characters the font cannot represent
    glyph_policy: GlyphPolicy,
    /// Embedded fonts (font name -> PDF object ID)
    embedded_fonts: HashMap<String, ObjectId>,
    /// Page font resources (page number -> font name -> resource name)
    page_font_resources: HashMap<usize, HashMap<String, String>>,
    /// Next font resource number
    next_font_resource: u32,
    /// Buffered content operators per page (page number -> operators)
    page_content_buffer: HashMap<usize, Vec<u8>>,
}

impl PdfDocument {
    fn from_document(inner: Document) -> Self {
        Self {
            inner,
            fonts: None,
            glyph_policy: GlyphPolicy::default(),
            embedded_fonts: HashMap::new(),
            page_font_resources: HashMap::new(),
            next_font_resource: 1,
            page_content_buffer: HashMap::new(),
        }
    }

    /// Open a PDF document from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = Document::load(path).map_err(|e| PdfError::OpenError(e.to_string()))?;
        Ok(Self::from_document(inner))
    }

    /// Open a PDF document from bytes
    pub fn open_from_bytes(data: &[u8]) -> Result<Self> {
        let inner = Document::load_mem(data).map_err(|e| PdfError::OpenError(e.to_string()))?;
        Ok(Self::from_document(inner))
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Inject the font pair used for all placements
    ///
    /// Fonts are loaded once and shared read-only afterwards; calling
    /// this again replaces the pair before anything was embedded.
    pub fn set_fonts(&mut self, fonts: FontPair) {
        self.fonts = Some(fonts);
    }

    /// Set the policy for characters without a glyph
    pub fn set_glyph_policy(&mut self, policy: GlyphPolicy) {
        self.glyph_policy = policy;
    }

    /// Current glyph policy
    pub fn glyph_policy(&self) -> GlyphPolicy {
        self.glyph_policy
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert (empty text is a no-op)
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate in points (from top)
    /// * `style` - Size, weight, and color
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        style: &TextStyle,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        if text.is_empty() {
            return Ok(());
        }

        let policy = self.glyph_policy;
        let fonts = self.fonts.as_mut().ok_or(PdfError::FontNotLoaded)?;
        let font = fonts.variant_mut(style.bold);

        // Degrade or reject characters the face cannot represent
        let rendered = apply_glyph_policy(text, font, policy)?;

        font.add_chars(&rendered);
        let text_hex = font.encode_text_hex(&rendered);
        let font_name = font.name.clone();

        let font_resource_name = self.get_or_create_font_ref(&font_name, page)?;

        // Convert Y coordinate from top-origin to PDF bottom-origin
        let page_height = self.get_page_height(page)?;
        let pdf_y = page_height - y;

        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: style.size,
            color: style.color,
        };
        let operators = generate_text_operators(&text_hex, x, pdf_y, &ctx);

        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.finalize()?;
        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.finalize()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Flush buffered content and embed used fonts
    fn finalize(&mut self) -> Result<()> {
        self.flush_content_buffers()?;
        self.embed_fonts()?;
        Ok(())
    }

    /// Embed all fonts that were used into the PDF
    fn embed_fonts(&mut self) -> Result<()> {
        // Re-embedding with the complete character set
        self.embedded_fonts.clear();

        let mut font_names: Vec<String> = Vec::new();
        if let Some(fonts) = &self.fonts {
            for font in [Some(&fonts.regular), fonts.bold.as_ref()]
                .into_iter()
                .flatten()
            {
                if !font.used_chars.is_empty() {
                    font_names.push(font.name.clone());
                }
            }
        }

        for font_name in font_names {
            self.embed_font_object(&font_name)?;
        }

        self.finalize_page_font_resources()?;

        Ok(())
    }

    fn get_font(&self, font_name: &str) -> Result<&crate::font::FontData> {
        let fonts = self.fonts.as_ref().ok_or(PdfError::FontNotLoaded)?;
        [Some(&fonts.regular), fonts.bold.as_ref()]
            .into_iter()
            .flatten()
            .find(|f| f.name == font_name)
            .ok_or(PdfError::FontNotLoaded)
    }

    /// Embed a single font object into the PDF
    fn embed_font_object(&mut self, font_name: &str) -> Result<ObjectId> {
        let font_objects = self.get_font(font_name)?.to_pdf_objects()?;

        // Font file stream
        let font_file_id = self.inner.add_object(font_objects.font_file_stream);

        // Font descriptor referencing the font file
        let mut font_descriptor = font_objects.font_descriptor;
        font_descriptor.set("FontFile2", Object::Reference(font_file_id));
        let font_descriptor_id = self.inner.add_object(font_descriptor);

        // CIDFont referencing the descriptor
        let mut cid_font = font_objects.cid_font;
        cid_font.set("FontDescriptor", Object::Reference(font_descriptor_id));
        let cid_font_id = self.inner.add_object(cid_font);

        // Type0 font referencing CIDFont and ToUnicode
        let mut type0_font = font_objects.type0_font;
        type0_font.set(
            "DescendantFonts",
            Object::Array(vec![Object::Reference(cid_font_id)]),
        );

        let tounicode_id = self.inner.add_object(font_objects.tounicode_stream);
        type0_font.set("ToUnicode", Object::Reference(tounicode_id));

        let type0_font_id = self.inner.add_object(type0_font);

        self.embedded_fonts
            .insert(font_name.to_string(), type0_font_id);

        Ok(type0_font_id)
    }

    /// Get or create a font resource name (e.g., "F1") for a page
    fn get_or_create_font_ref(&mut self, font_name: &str, page: usize) -> Result<String> {
        // The font itself is embedded at save time when the full
        // character set is known; only the resource name is assigned here.
        let page_resources = self.page_font_resources.entry(page).or_default();

        if let Some(resource_name) = page_resources.get(font_name) {
            return Ok(resource_name.clone());
        }

        let resource_name = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;

        page_resources.insert(font_name.to_string(), resource_name.clone());

        Ok(resource_name)
    }

    /// Add font references to all pages that use them
    ///
    /// Called during save, after the fonts have been embedded with their
    /// complete character sets.
    fn finalize_page_font_resources(&mut self) -> Result<()> {
        let page_resources: Vec<(usize, Vec<(String, String)>)> = self
            .page_font_resources
            .iter()
            .map(|(&page, fonts)| {
                let font_list: Vec<_> = fonts
                    .iter()
                    .map(|(font_name, resource_name)| (font_name.clone(), resource_name.clone()))
                    .collect();
                (page, font_list)
            })
            .collect();

        for (page, fonts) in page_resources {
            if !fonts.is_empty() {
                self.add_fonts_to_page_resources(page, &fonts)?;
            }
        }

        Ok(())
    }

    /// Add multiple fonts to a page's Resources dictionary
    fn add_fonts_to_page_resources(
        &mut self,
        page: usize,
        fonts: &[(String, String)],
    ) -> Result<()> {
        let pages = self.inner.get_pages();
        let page_id = *pages
            .get(&(page as u32))
            .ok_or(PdfError::InvalidPage(page, pages.len()))?;

        let page_obj = self.inner.get_object(page_id)?;
        let page_dict = page_obj
            .as_dict()
            .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))?;

        // Get or create Resources dictionary
        let mut resources_dict = match page_dict.get(b"Resources") {
            Ok(resources) => match resources.as_dict() {
                Ok(dict) => dict.clone(),
                Err(_) => Dictionary::new(),
            },
            Err(_) => Dictionary::new(),
        };

        // Get or create Font dictionary in Resources
        let mut font_dict = match resources_dict.get(b"Font") {
            Ok(font) => match font.as_dict() {
                Ok(dict) => dict.clone(),
                Err(_) => Dictionary::new(),
            },
            Err(_) => Dictionary::new(),
        };

        for (font_name, resource_name) in fonts {
            let font_ref = self
                .embedded_fonts
                .get(font_name)
                .ok_or(PdfError::FontNotLoaded)?;
            font_dict.set(resource_name.as_bytes(), Object::Reference(*font_ref));
        }

        resources_dict.set(b"Font", Object::Dictionary(font_dict));

        let mut new_page_dict = page_dict.clone();
        new_page_dict.set(b"Resources", Object::Dictionary(resources_dict));

        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    /// Get page height in points
    ///
    /// Extracts the page height from the MediaBox or CropBox, following
    /// the parent Pages chain for inherited boxes.
    fn get_page_height(&self, page: usize) -> Result<f64> {
        let pages = self.inner.get_pages();
        let page_id = *pages
            .get(&(page as u32))
            .ok_or(PdfError::InvalidPage(page, pages.len()))?;

        let media_box = self.get_inherited_media_box(page_id)?;

        extract_height_from_media_box(&media_box)
    }

    /// Get MediaBox, following the parent inheritance chain if needed
    fn get_inherited_media_box(&self, page_id: ObjectId) -> Result<Vec<Object>> {
        let mut current_id = page_id;

        // Safety limit on parent chain depth
        for _ in 0..10 {
            let obj = self.inner.get_object(current_id)?;
            let dict = obj
                .as_dict()
                .map_err(|_| PdfError::ParseError("Object is not a dictionary".to_string()))?;

            if let Ok(media_box) = dict.get(b"MediaBox").or_else(|_| dict.get(b"CropBox")) {
                let media_box_array = match media_box {
                    Object::Array(arr) => arr.clone(),
                    Object::Reference(ref_id) => {
                        let referred = self.inner.get_object(*ref_id)?;
                        referred
                            .as_array()
                            .map_err(|_| {
                                PdfError::ParseError(
                                    "MediaBox reference is not an array".to_string(),
                                )
                            })?
                            .clone()
                    }
                    _ => return Err(PdfError::ParseError("MediaBox is not an array".to_string())),
                };
                return Ok(media_box_array);
            }

            if let Ok(Object::Reference(parent_id)) = dict.get(b"Parent") {
                current_id = *parent_id;
                continue;
            }

            break;
        }

        // Fallback: assume A4 page size
        Ok(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(595.28),
            Object::Real(841.89),
        ])
    }

    /// Buffer content operators for a page (written at save time)
    ///
    /// Appending to the content stream immediately would create a new
    /// stream object per placement; buffering flushes everything in one
    /// stream per page during save.
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Flush all buffered content to page streams
    fn flush_content_buffers(&mut self) -> Result<()> {
        let buffers: Vec<(usize, Vec<u8>)> = self.page_content_buffer.drain().collect();

        for (page, content) in buffers {
            if !content.is_empty() {
                self.append_to_content_stream(page, &content)?;
            }
        }

        Ok(())
    }

    /// Append content to a page's content stream
    ///
    /// Handles single streams, referenced streams, and stream arrays;
    /// compressed streams are decompressed before appending.
    fn append_to_content_stream(&mut self, page: usize, content: &[u8]) -> Result<()> {
        let pages = self.inner.get_pages();
        let page_id = *pages
            .get(&(page as u32))
            .ok_or(PdfError::InvalidPage(page, pages.len()))?;

        let (existing_content, page_dict_clone) = {
            let page_obj = self.inner.get_object(page_id)?;
            let page_dict = page_obj
                .as_dict()
                .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?;

            let page_dict_clone = page_dict.clone();

            let existing_content = match page_dict.get(b"Contents") {
                Ok(contents) => match contents {
                    Object::Stream(stream) => stream
                        .decompressed_content()
                        .unwrap_or_else(|_| stream.content.clone()),
                    Object::Reference(ref_id) => {
                        if let Ok(Object::Stream(stream)) = self.inner.get_object(*ref_id) {
                            stream
                                .decompressed_content()
                                .unwrap_or_else(|_| stream.content.clone())
                        } else {
                            Vec::new()
                        }
                    }
                    Object::Array(arr) => {
                        let mut combined = Vec::new();
                        for obj in arr {
                            match obj {
                                Object::Reference(ref_id) => {
                                    if let Ok(Object::Stream(stream)) =
                                        self.inner.get_object(*ref_id)
                                    {
                                        let data = stream
                                            .decompressed_content()
                                            .unwrap_or_else(|_| stream.content.clone());
                                        combined.extend_from_slice(&data);
                                    }
                                }
                                Object::Stream(stream) => {
                                    let data = stream
                                        .decompressed_content()
                                        .unwrap_or_else(|_| stream.content.clone());
                                    combined.extend_from_slice(&data);
                                }
                                _ => {}
                            }
                        }
                        combined
                    }
                    _ => Vec::new(),
                },
                Err(_) => Vec::new(),
            };

            (existing_content, page_dict_clone)
        };

        let mut new_content = existing_content;
        new_content.extend_from_slice(content);

        let new_stream = Stream::new(Dictionary::new(), new_content);
        let stream_id = self.inner.add_object(new_stream);

        let mut new_page_dict = page_dict_clone;
        new_page_dict.set(b"Contents", Object::Reference(stream_id));

        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }
}

/// Extract height from a MediaBox array
fn extract_height_from_media_box(media_box_array: &[Object]) -> Result<f64> {
    if media_box_array.len() >= 4 {
        let y1 = media_box_array[1]
            .as_f32()
            .map(|v| v as f64)
            .ok()
            .or_else(|| media_box_array[1].as_i64().ok().map(|v| v as f64))
            .ok_or_else(|| PdfError::ParseError("Invalid MediaBox y1".to_string()))?;
        let y2 = media_box_array[3]
            .as_f32()
            .map(|v| v as f64)
            .ok()
            .or_else(|| media_box_array[3].as_i64().ok().map(|v| v as f64))
            .ok_or_else(|| PdfError::ParseError("Invalid MediaBox y2".to_string()))?;
        return Ok(y2 - y1);
    }

    Err(PdfError::ParseError("Invalid MediaBox format".to_string()))
}
