//! Convenio - hotel rate agreement documents
//!
//! This crate provides:
//! - The agreement data model (client, rates, validity year)
//! - Request JSON parsing and validation
//! - Letterhead image loading with graceful fallback
//! - The fixed one-page layout and its PDF renderer
//!
//! # Example
//!
//! ```ignore
//! use convenio::{parse_request_str, AssetStore, ConvenioRenderer};
//!
//! let request = parse_request_str(body)?;
//! let renderer = ConvenioRenderer::new(AssetStore::new("assets"));
//! let pdf_bytes = renderer.render(&request.input)?;
//! std::fs::write(request.file_name(), pdf_bytes)?;
//! ```

pub mod assets;
pub mod blocks;
pub mod parser;
mod renderer;
mod schema;

pub use assets::{Asset, AssetError, AssetStore};
pub use parser::{parse_request, parse_request_slice, parse_request_str};
pub use renderer::ConvenioRenderer;
pub use schema::*;

use thiserror::Error;

/// Errors that can occur while validating or rendering an agreement
///
/// The display text is what API clients see in the `error` field.
#[derive(Debug, Error)]
pub enum ConvenioError {
    #[error("Faltan datos requeridos")]
    MissingFields,

    #[error("Fecha inválida: {0}")]
    InvalidDate(String),

    #[error("Campo inválido: {0}")]
    InvalidField(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for agreement operations
pub type Result<T> = std::result::Result<T, ConvenioError>;
