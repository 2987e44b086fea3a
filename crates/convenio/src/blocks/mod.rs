//! Drawing instructions for one agreement page
//!
//! The layout step produces a flat list of blocks with absolute positions;
//! the renderer only executes them. Coordinates are PDF points from the
//! bottom-left corner of the page.

mod layout;

pub use layout::{
    layout, FOOTER_HEIGHT, INDENT_X, LOGO_HEIGHT, LOGO_WIDTH, MARGIN_X, SIGNATURE_X, TOP_MARGIN,
};

use crate::assets::Asset;
use pdf_core::{Align, Color, FontWeight, ImageScaleMode, TextSegment};

/// Position of a block (x = left/anchor, y = baseline or bottom edge)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Size of an image box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Brand green used for the text logo
pub fn brand_green() -> Color {
    Color::from_rgb(0x8B, 0xB1, 0x52)
}

/// Gray used for the tagline under the text logo
pub fn tagline_gray() -> Color {
    Color::from_rgb(0x66, 0x66, 0x66)
}

/// Near-black used for all body text
pub fn body_color() -> Color {
    Color::from_rgb(0x33, 0x33, 0x33)
}

/// Font and color for a text block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub weight: FontWeight,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    /// Regular body text
    pub fn regular(size: f32) -> Self {
        Self {
            weight: FontWeight::Regular,
            size,
            color: body_color(),
        }
    }

    /// Bold body text
    pub fn bold(size: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            size,
            color: body_color(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// A single line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub position: Position,
    pub align: Align,
    pub style: TextStyle,
}

/// A line made of runs with different weights
///
/// `style.weight` is ignored; each segment carries its own.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentsBlock {
    pub segments: Vec<TextSegment>,
    pub position: Position,
    pub style: TextStyle,
}

/// One of the letterhead images
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub asset: Asset,
    /// Bottom-left corner of the box
    pub position: Position,
    pub size: Size,
    pub mode: ImageScaleMode,
}

/// Drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text(TextBlock),
    Segments(SegmentsBlock),
    Image(ImageBlock),
}

impl Block {
    /// Vertical position of the block
    pub fn y(&self) -> f64 {
        match self {
            Block::Text(b) => b.position.y,
            Block::Segments(b) => b.position.y,
            Block::Image(b) => b.position.y,
        }
    }

    /// Plain text of the block; segments are concatenated, images have none
    pub fn text(&self) -> Option<String> {
        match self {
            Block::Text(b) => Some(b.text.clone()),
            Block::Segments(b) => Some(b.segments.iter().map(|s| s.text.as_str()).collect()),
            Block::Image(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_style_constructors() {
        let style = TextStyle::bold(13.0);
        assert_eq!(style.weight, FontWeight::Bold);
        assert_eq!(style.size, 13.0);
        assert_eq!(style.color, body_color());

        let logo = TextStyle::bold(24.0).with_color(brand_green());
        assert_eq!(logo.color, Color::from_rgb(139, 177, 82));
    }

    #[test]
    fn test_segments_text() {
        let block = Block::Segments(SegmentsBlock {
            segments: vec![TextSegment::regular("a "), TextSegment::bold("b")],
            position: Position { x: 80.0, y: 100.0 },
            style: TextStyle::regular(12.0),
        });
        assert_eq!(block.text().as_deref(), Some("a b"));
        assert_eq!(block.y(), 100.0);
    }

    #[test]
    fn test_image_has_no_text() {
        let block = Block::Image(ImageBlock {
            asset: Asset::Footer,
            position: Position { x: 0.0, y: 0.0 },
            size: Size {
                width: 612.0,
                height: 30.0,
            },
            mode: ImageScaleMode::Stretch,
        });
        assert_eq!(block.text(), None);
    }
}
