//! ES Text - Spanish (Latin-American) text formatting
//!
//! This crate provides:
//! - Number rendering with digit grouping (`1.234,50`)
//! - Peso currency formatting (`$1.234,50`)
//! - Spanish month names and long dates ("15 de marzo de 2026")
//!
//! # Example
//!
//! ```ignore
//! use es_text::{format_currency, format_date_long, parse_iso_date};
//!
//! let rate = format_currency(1040.0);                         // "$1.040,00"
//! let date = format_date_long(parse_iso_date("2026-03-15")?); // "15 de marzo de 2026"
//! ```

mod formatter;

pub use formatter::{
    format_currency, format_date_long, parse_iso_date, render_float, translate_month_names,
    NumberFormat,
};

use thiserror::Error;

/// Errors that can occur during text formatting
#[derive(Debug, Error)]
pub enum EsTextError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for text formatting operations
pub type Result<T> = std::result::Result<T, EsTextError>;
