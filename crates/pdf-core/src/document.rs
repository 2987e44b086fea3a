//! PDF Document writer

use crate::font::{FontWeight, StandardFont};
use crate::image::{
    calculate_scaled_dimensions, generate_image_operators, ImageScaleMode, ImageXObject,
};
use crate::text::{generate_text_operators, TextRenderContext, TextSegment};
use crate::{Align, PdfError, Result};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};

/// Producer string written to the Info dictionary
const PRODUCER: &str = "convenio pdf-core";

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
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// US Letter, 8.5 x 11 in
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

/// Font selection state; absent until `set_font` is called
#[derive(Debug, Clone, Copy)]
struct FontState {
    weight: FontWeight,
    size: f32,
}

/// PDF Document writer providing high-level drawing operations
///
/// Coordinates are PDF user space: origin at the lower-left corner,
/// y growing upwards, units in points.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// The page tree root
    pages_id: ObjectId,
    /// Size used for every page
    page_size: PageSize,
    /// Current font
    font: Option<FontState>,
    /// Current text color
    current_text_color: Color,
    /// Font dictionaries already added (font -> PDF object ID)
    embedded_fonts: BTreeMap<StandardFont, ObjectId>,
    /// Page font resources (page number -> font -> resource name)
    page_font_resources: BTreeMap<usize, BTreeMap<StandardFont, String>>,
    /// Next font resource number
    next_font_resource: u32,
    /// Embedded images (data hash -> (object ID, pixel width, pixel height))
    embedded_images: HashMap<u64, (ObjectId, u32, u32)>,
    /// Page image resources (page number -> object ID -> resource name)
    page_image_resources: BTreeMap<usize, BTreeMap<ObjectId, String>>,
    /// Next image resource number
    next_image_resource: u32,
    /// Buffered content operators per page (page number -> operators)
    page_content_buffer: BTreeMap<usize, Vec<u8>>,
}

impl PdfDocument {
    /// Create a document with a single blank page
    ///
    /// # Example
    /// ```ignore
    /// let doc = PdfDocument::new(PageSize::LETTER)?;
    /// assert_eq!(doc.page_count(), 1);
    /// ```
    pub fn new(page_size: PageSize) -> Result<Self> {
        let mut inner = Document::with_version("1.4");

        let pages_id = inner.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        let mut doc = Self {
            inner,
            pages_id,
            page_size,
            font: None,
            current_text_color: Color::default(),
            embedded_fonts: BTreeMap::new(),
            page_font_resources: BTreeMap::new(),
            next_font_resource: 1,
            embedded_images: HashMap::new(),
            page_image_resources: BTreeMap::new(),
            next_image_resource: 1,
            page_content_buffer: BTreeMap::new(),
        };
        doc.add_blank_page()?;

        Ok(doc)
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Set the document title (Info dictionary)
    pub fn set_title(&mut self, title: &str) {
        let info_id = self.inner.add_object(dictionary! {
            "Title" => text_string(title),
            "Producer" => text_string(PRODUCER),
        });
        self.inner.trailer.set("Info", info_id);
    }

    /// Set the current font weight and size
    pub fn set_font(&mut self, weight: FontWeight, size: f32) {
        self.font = Some(FontState { weight, size });
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    fn current_font(&self) -> Result<FontState> {
        self.font.ok_or(PdfError::FontNotSet)
    }

    fn check_page(&self, page: usize) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }
        Ok(())
    }

    /// Insert a line of text
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - Anchor X coordinate in points (left edge, centre or right edge per `align`)
    /// * `y` - Baseline Y coordinate in points (from bottom)
    /// * `align` - Text alignment
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        self.check_page(page)?;
        let font = self.current_font()?;

        if text.is_empty() {
            return Ok(());
        }

        self.draw_run(text, font.weight, font.size, page, x, y, align)?;
        Ok(())
    }

    /// Insert several runs of text on one baseline
    ///
    /// Each segment is drawn in its own weight at the current size, starting
    /// where the previous segment's measured width ended.
    ///
    /// # Returns
    /// The x coordinate after the last segment
    pub fn insert_segments(
        &mut self,
        segments: &[TextSegment],
        page: usize,
        x: f64,
        y: f64,
    ) -> Result<f64> {
        self.check_page(page)?;
        let font = self.current_font()?;

        let mut current_x = x;
        for segment in segments {
            if segment.text.is_empty() {
                continue;
            }
            current_x += self.draw_run(
                &segment.text,
                segment.weight,
                font.size,
                page,
                current_x,
                y,
                Align::Left,
            )?;
        }

        Ok(current_x)
    }

    /// Emit text operators for one run and return its width
    #[allow(clippy::too_many_arguments)]
    fn draw_run(
        &mut self,
        text: &str,
        weight: FontWeight,
        size: f32,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<f64> {
        let font = StandardFont::for_weight(weight);
        let width = font.text_width_points(text, size) as f64;
        let font_resource_name = self.get_or_create_font_ref(font, page)?;

        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: size,
            text_width: width,
            color: self.current_text_color,
        };
        let operators = generate_text_operators(&font.encode_text_hex(text), x, y, align, &ctx);
        self.buffer_content(page, &operators);

        Ok(width)
    }

    /// Insert an image with scaling mode
    ///
    /// With `FitBox` the scaled image is centred inside the box.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image_scaled(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: ImageScaleMode,
    ) -> Result<()> {
        self.check_page(page)?;

        let (image_resource_name, orig_width, orig_height) =
            self.get_or_create_image_ref(data, page)?;

        let (actual_width, actual_height) =
            calculate_scaled_dimensions(orig_width, orig_height, width, height, mode);

        let (draw_x, draw_y) = match mode {
            ImageScaleMode::FitBox => (
                x + (width - actual_width) / 2.0,
                y + (height - actual_height) / 2.0,
            ),
            _ => (x, y),
        };

        let operators = generate_image_operators(
            &image_resource_name,
            draw_x,
            draw_y,
            actual_width,
            actual_height,
        );
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.flush_content_buffers()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Add a blank page of the document's page size
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_blank_page(&mut self) -> Result<usize> {
        let contents_id = self
            .inner
            .add_object(Stream::new(Dictionary::new(), Vec::new()));

        let page_id = self.inner.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(self.page_size.width as f32),
                Object::Real(self.page_size.height as f32),
            ],
            "Resources" => Dictionary::new(),
            "Contents" => contents_id,
        });

        let pages_dict = self
            .inner
            .get_object_mut(self.pages_id)?
            .as_dict_mut()
            .map_err(|_| PdfError::ParseError("Pages object is not a dictionary".to_string()))?;

        let mut kids = pages_dict
            .get(b"Kids")
            .and_then(|kids| kids.as_array().cloned())
            .map_err(|_| PdfError::ParseError("Pages object missing Kids array".to_string()))?;
        kids.push(Object::Reference(page_id));
        let count = kids.len();

        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", count as i64);

        Ok(count)
    }

    fn page_id(&self, page: usize) -> Result<ObjectId> {
        let pages = self.inner.get_pages();
        pages
            .get(&(page as u32))
            .copied()
            .ok_or(PdfError::InvalidPage(page, pages.len()))
    }

    /// Get or create a font resource name for a page
    fn get_or_create_font_ref(&mut self, font: StandardFont, page: usize) -> Result<String> {
        if let Some(name) = self
            .page_font_resources
            .get(&page)
            .and_then(|fonts| fonts.get(&font))
        {
            return Ok(name.clone());
        }

        let object_id = match self.embedded_fonts.get(&font) {
            Some(id) => *id,
            None => {
                let id = self.inner.add_object(font.to_pdf_dictionary());
                self.embedded_fonts.insert(font, id);
                id
            }
        };

        let resource_name = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;

        self.add_to_page_resources(page, b"Font", &resource_name, object_id)?;
        self.page_font_resources
            .entry(page)
            .or_default()
            .insert(font, resource_name.clone());

        Ok(resource_name)
    }

    /// Get or create an image reference for a specific page
    ///
    /// Returns the resource name (e.g., "Im1") and original pixel dimensions.
    /// Images are deduplicated by hash of their data.
    fn get_or_create_image_ref(&mut self, data: &[u8], page: usize) -> Result<(String, u32, u32)> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        let (object_id, width, height) = match self.embedded_images.get(&data_hash) {
            Some(entry) => *entry,
            None => {
                let xobject = ImageXObject::from_bytes(data).map_err(|e| {
                    PdfError::ImageError(format!("Failed to create image XObject: {e}"))
                })?;
                let id = self.inner.add_object(xobject.to_pdf_stream());
                let entry = (id, xobject.width, xobject.height);
                self.embedded_images.insert(data_hash, entry);
                entry
            }
        };

        if let Some(name) = self
            .page_image_resources
            .get(&page)
            .and_then(|images| images.get(&object_id))
        {
            return Ok((name.clone(), width, height));
        }

        let resource_name = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;

        self.add_to_page_resources(page, b"XObject", &resource_name, object_id)?;
        self.page_image_resources
            .entry(page)
            .or_default()
            .insert(object_id, resource_name.clone());

        Ok((resource_name, width, height))
    }

    /// Register a resource in a page's Resources sub-dictionary (`/Font`, `/XObject`)
    fn add_to_page_resources(
        &mut self,
        page: usize,
        category: &[u8],
        resource_name: &str,
        object_id: ObjectId,
    ) -> Result<()> {
        let page_id = self.page_id(page)?;

        let page_dict = self
            .inner
            .get_object_mut(page_id)?
            .as_dict_mut()
            .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?;

        let mut resources = page_dict
            .get(b"Resources")
            .and_then(Object::as_dict)
            .cloned()
            .unwrap_or_else(|_| Dictionary::new());

        let mut entries = resources
            .get(category)
            .and_then(Object::as_dict)
            .cloned()
            .unwrap_or_else(|_| Dictionary::new());
        entries.set(resource_name, Object::Reference(object_id));

        resources.set(category, Object::Dictionary(entries));
        page_dict.set("Resources", Object::Dictionary(resources));

        Ok(())
    }

    /// Buffer content operators for a page (written at save time)
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Append all buffered operators to the pages' content streams
    fn flush_content_buffers(&mut self) -> Result<()> {
        let buffers = std::mem::take(&mut self.page_content_buffer);

        for (page, content) in buffers {
            if content.is_empty() {
                continue;
            }

            let page_id = self.page_id(page)?;
            let contents_id = self
                .inner
                .get_object(page_id)?
                .as_dict()
                .and_then(|dict| dict.get(b"Contents"))
                .and_then(Object::as_reference)
                .map_err(|_| PdfError::ParseError("Page has no content stream".to_string()))?;

            let stream = self
                .inner
                .get_object_mut(contents_id)?
                .as_stream_mut()
                .map_err(|_| PdfError::ParseError("Contents is not a stream".to_string()))?;

            let mut new_content = stream.content.clone();
            new_content.extend_from_slice(&content);
            stream.set_content(new_content);
        }

        Ok(())
    }
}

/// Encode a PDF text string: literal for ASCII, UTF-16BE with BOM otherwise
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
