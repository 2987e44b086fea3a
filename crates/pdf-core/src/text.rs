//! Text rendering utilities

use crate::document::Color;
use crate::font::FontWeight;
use crate::Align;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// One run of a line drawn in a single weight
///
/// Consecutive segments share a baseline; each one starts where the
/// previous one ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub text: String,
    pub weight: FontWeight,
}

impl TextSegment {
    pub fn new(text: impl Into<String>, weight: FontWeight) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }

    pub fn regular(text: impl Into<String>) -> Self {
        Self::new(text, FontWeight::Regular)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, FontWeight::Bold)
    }
}

/// Calculate X offset for text alignment
pub fn calculate_x_offset(text_width: f64, align: Align) -> f64 {
    match align {
        Align::Left => 0.0,
        Align::Right => -text_width,
    }
}

/// Generate PDF operators for text insertion
///
/// Creates the PDF text operators (BT, rg, Tf, Td, Tj, ET) to render text
/// at a specific position with alignment support.
///
/// # Arguments
/// * `text_hex` - Hex-encoded WinAnsi text (e.g., "<48656C6C6F>")
/// * `x` - Anchor X coordinate in points (PDF coordinates, from left)
/// * `y` - Baseline Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment relative to `x`
/// * `ctx` - Text rendering context
pub fn generate_text_operators(
    text_hex: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let final_x = x + calculate_x_offset(ctx.text_width, align);

    let mut ops = String::new();
    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        ctx.color.r, ctx.color.g, ctx.color.b
    ));
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));
    ops.push_str(&format!("{final_x} {y} Td\n"));
    ops.push_str(&format!("{text_hex} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}
