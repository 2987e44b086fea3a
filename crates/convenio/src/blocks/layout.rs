//! Fixed page layout of the 2026 agreement template

use super::{
    brand_green, tagline_gray, Block, ImageBlock, Position, SegmentsBlock, Size, TextBlock,
    TextStyle,
};
use crate::assets::Asset;
use crate::schema::AgreementInput;
use es_text::{format_currency, format_date_long};
use pdf_core::{Align, ImageScaleMode, PageSize, TextSegment};
use tracing::debug;

/// Distance from the top edge to the first line
pub const TOP_MARGIN: f64 = 60.0;
/// Left edge of headings and the letter body
pub const MARGIN_X: f64 = 60.0;
/// Left edge of indented lines and the hotel signature
pub const INDENT_X: f64 = 80.0;
/// Left edge of the client signature column
pub const SIGNATURE_X: f64 = 380.0;

pub const LOGO_WIDTH: f64 = 150.0;
pub const LOGO_HEIGHT: f64 = 60.0;
pub const FOOTER_HEIGHT: f64 = 30.0;

const BODY_SIZE: f32 = 12.0;
const SIGNATURE_SIZE: f32 = 13.0;
const LOGO_TEXT_SIZE: f32 = 24.0;
const TAGLINE_SIZE: f32 = 10.0;

const HOTEL_SIGNATORY: &str = "Ricardo Peña Covarrubias";
const HOTEL_NAME: &str = "Avanta Hotel & Villas";

/// Accumulates blocks while walking a cursor down the page
struct LayoutBuilder {
    blocks: Vec<Block>,
    y: f64,
}

impl LayoutBuilder {
    fn new(start_y: f64) -> Self {
        Self {
            blocks: Vec::new(),
            y: start_y,
        }
    }

    fn text(&mut self, x: f64, text: impl Into<String>, style: TextStyle) {
        self.text_aligned(x, text, Align::Left, style);
    }

    fn text_aligned(&mut self, x: f64, text: impl Into<String>, align: Align, style: TextStyle) {
        self.blocks.push(Block::Text(TextBlock {
            text: text.into(),
            position: Position { x, y: self.y },
            align,
            style,
        }));
    }

    fn segments(&mut self, x: f64, segments: Vec<TextSegment>, style: TextStyle) {
        self.blocks.push(Block::Segments(SegmentsBlock {
            segments,
            position: Position { x, y: self.y },
            style,
        }));
    }

    fn image(&mut self, asset: Asset, position: Position, size: Size, mode: ImageScaleMode) {
        self.blocks.push(Block::Image(ImageBlock {
            asset,
            position,
            size,
            mode,
        }));
    }

    /// Move the cursor down
    fn advance(&mut self, dy: f64) {
        self.y -= dy;
    }
}

/// Build the drawing instructions for one agreement
///
/// # Arguments
/// * `input` - Validated agreement data
/// * `has_logo` - Draw the logo image; otherwise a text logo is used
/// * `has_footer` - Draw the footer strip
/// * `page` - Page size the positions are computed for
pub fn layout(input: &AgreementInput, has_logo: bool, has_footer: bool, page: PageSize) -> Vec<Block> {
    let regular = TextStyle::regular(BODY_SIZE);
    let bold = TextStyle::bold(BODY_SIZE);

    let full_name = input.client.full_name();
    let company = input.client.company_or_default();
    let rates = &input.rates;

    let mut b = LayoutBuilder::new(page.height - TOP_MARGIN);

    // Letterhead
    if has_logo {
        b.image(
            Asset::Logo,
            Position {
                x: MARGIN_X,
                y: b.y - 20.0,
            },
            Size {
                width: LOGO_WIDTH,
                height: LOGO_HEIGHT,
            },
            ImageScaleMode::FitBox,
        );
        b.advance(70.0);
    } else {
        b.text(
            MARGIN_X,
            "AVANTA",
            TextStyle::bold(LOGO_TEXT_SIZE).with_color(brand_green()),
        );
        b.advance(20.0);
        b.text(
            MARGIN_X,
            "Hotel & Villas",
            TextStyle::regular(TAGLINE_SIZE).with_color(tagline_gray()),
        );
        b.advance(40.0);
    }

    // Date, right-aligned to the margin
    b.text_aligned(
        page.width - MARGIN_X,
        format_date_long(input.date),
        Align::Right,
        regular,
    );
    b.advance(25.0);

    b.text(MARGIN_X, full_name.as_str(), bold);
    b.advance(20.0);

    b.text(MARGIN_X, format!("Convenio Avanta con {company}"), regular);
    b.advance(25.0);

    b.text(
        MARGIN_X,
        format!("A continuación, encontrará las tarifas especiales para {company}"),
        regular,
    );
    b.advance(15.0);
    b.text(MARGIN_X, "        por parte de Avanta Hotel & Villas", regular);
    b.advance(30.0);

    // Rates without breakfast
    b.text(MARGIN_X, "Tarifas sin desayuno", regular);
    b.advance(21.0);
    b.text(
        INDENT_X,
        format!(
            "Habitación Sencilla  King:     {}  por noche",
            format_currency(rates.king_sin)
        ),
        bold,
    );
    b.advance(15.0);
    b.text(INDENT_X, "Para 1 o 2 personas", regular);
    b.advance(15.0);
    b.text(
        INDENT_X,
        format!(
            "Habitación Doble Queen:     {}  por noche",
            format_currency(rates.queen_sin)
        ),
        bold,
    );
    b.advance(16.0);
    b.text(INDENT_X, "Para 2 personas", regular);
    b.advance(23.0);

    // Rates with buffet breakfast
    b.text(MARGIN_X, "Tarifas con desayuno Buffet", regular);
    b.advance(20.0);
    b.text(
        INDENT_X,
        format!(
            "Habitación Sencilla King:      {}  por noche",
            format_currency(rates.king_con)
        ),
        bold,
    );
    b.advance(15.0);
    b.text(INDENT_X, " Para 1 persona", regular);
    b.advance(15.0);
    b.text(
        INDENT_X,
        format!(
            "Habitación Doble Queen:     {}  por noche",
            format_currency(rates.queen_con)
        ),
        bold,
    );
    b.advance(16.0);
    b.text(INDENT_X, "Para 2 personas", regular);
    b.advance(23.0);

    // Services
    b.text(MARGIN_X, "Ofrecemos servicios de:", regular);
    b.advance(23.0);
    b.text(INDENT_X, "Wi-Fi de alta velocidad Gratis", regular);
    b.advance(15.0);
    b.text(
        INDENT_X,
        "Sala de reuniones y espacio de trabajo para hasta 12 personas.",
        regular,
    );
    b.advance(15.0);
    b.text(INDENT_X, "Estacionamiento gratuito", regular);
    b.advance(26.0);

    // Terms
    b.text(MARGIN_X, "Especificaciones de tarifas convenio:", regular);
    b.advance(22.0);
    for line in [
        "La tarifa convenio está disponible únicamente para reservaciones realizadas",
        "directamente con el hotel. a través de nuestro motor de reservaciones con el",
        "código de Promocional: AVANTA",
    ] {
        b.text(INDENT_X, line, bold);
        b.advance(15.0);
    }
    b.text(
        INDENT_X,
        format!(
            "Tarifa vigente al 31 de diciembre de {} a partir de ahí el presente convenio",
            input.validity_year_or_default()
        ),
        regular,
    );
    b.advance(15.0);
    b.segments(
        INDENT_X,
        vec![
            TextSegment::regular("continuará "),
            TextSegment::bold("(no tiene vencimiento) "),
            TextSegment::regular("con las respectivas actualizaciones"),
        ],
        regular,
    );
    b.advance(15.0);
    b.text(INDENT_X, "de tarifa y documento", regular);
    b.advance(15.0);
    b.text(
        INDENT_X,
        "Todas las reservaciones están sujetas a disponibilidad.",
        regular,
    );
    b.advance(30.0);

    b.text(
        MARGIN_X,
        "Agradezco su atención y quedo o la espero de su respuesta.",
        regular,
    );
    b.advance(60.0);

    // Signatures
    let signature = TextStyle::regular(SIGNATURE_SIZE);
    b.text(INDENT_X, HOTEL_SIGNATORY, signature);
    b.text(SIGNATURE_X, full_name.as_str(), signature);
    b.advance(15.0);
    b.text(INDENT_X, HOTEL_NAME, signature);
    b.text(SIGNATURE_X, company, signature);

    if has_footer {
        b.image(
            Asset::Footer,
            Position { x: 0.0, y: 0.0 },
            Size {
                width: page.width,
                height: FOOTER_HEIGHT,
            },
            ImageScaleMode::Stretch,
        );
    }

    debug!(
        blocks = b.blocks.len(),
        last_y = b.y,
        has_logo,
        has_footer,
        "agreement layout built"
    );

    b.blocks
}
