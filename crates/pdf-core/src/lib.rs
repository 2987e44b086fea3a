//! PDF Core - Low-level PDF writing
//!
//! This crate provides functionality for:
//! - Creating a fresh single-page (or multi-page) PDF document
//! - Drawing text with the built-in Helvetica fonts (no embedding needed)
//! - Measuring text with the standard Helvetica metrics
//! - Inserting images (JPEG, PNG)
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, FontWeight, PageSize, PdfDocument};
//!
//! let mut doc = PdfDocument::new(PageSize::LETTER)?;
//! doc.set_font(FontWeight::Bold, 12.0);
//! doc.insert_text("Hello, World!", 1, 60.0, 700.0, Align::Left)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod image;
mod text;

pub use document::{Color, PageSize, PdfDocument};
pub use font::{encode_win_ansi, FontWeight, StandardFont};
pub use image::{ImageScaleMode, ImageXObject};
pub use text::TextSegment;

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("No font set (call set_font first)")]
    FontNotSet,

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("PDF structure error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment relative to the x anchor passed to `insert_text`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Right,
}
