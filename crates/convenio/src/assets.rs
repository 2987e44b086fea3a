//! Letterhead images loaded from disk
//!
//! A missing or broken image is never fatal: the renderer draws a text
//! fallback for the logo and leaves the footer out.

use pdf_core::ImageXObject;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// An image drawn on every agreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    /// Brand logo at the top left
    Logo,
    /// Full-width strip at the bottom of the page
    Footer,
}

impl Asset {
    /// File names to try, in order (JPEG first, PNG as fallback)
    pub fn file_names(&self) -> &'static [&'static str] {
        match self {
            Asset::Logo => &["logo_avanta_principal.jpg", "logo_avanta_principal.png"],
            Asset::Footer => &["pie_de_pagina.jpg", "pie_de_pagina.png"],
        }
    }

    /// Short name used in log messages
    pub fn name(&self) -> &'static str {
        match self {
            Asset::Logo => "logo",
            Asset::Footer => "footer",
        }
    }
}

/// Why an asset could not be used
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no {asset} image found in {dir}")]
    NotFound { asset: &'static str, dir: PathBuf },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unusable image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: pdf_core::PdfError,
    },
}

/// Directory holding the letterhead images
#[derive(Debug, Clone)]
pub struct AssetStore {
    dir: PathBuf,
}

impl AssetStore {
    /// Create a store reading from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Locate, read and validate an asset
    pub fn try_load(&self, asset: Asset) -> Result<Vec<u8>, AssetError> {
        let path = asset
            .file_names()
            .iter()
            .map(|name| self.dir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| AssetError::NotFound {
                asset: asset.name(),
                dir: self.dir.clone(),
            })?;

        let data = std::fs::read(&path).map_err(|source| AssetError::Read {
            path: path.clone(),
            source,
        })?;

        // Decode once so a broken file is caught here instead of mid-render
        ImageXObject::from_bytes(&data).map_err(|source| AssetError::Decode {
            path: path.clone(),
            source,
        })?;

        debug!(asset = asset.name(), path = %path.display(), bytes = data.len(), "asset loaded");
        Ok(data)
    }

    /// Load an asset, logging and discarding any failure
    pub fn load(&self, asset: Asset) -> Option<Vec<u8>> {
        match self.try_load(asset) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(asset = asset.name(), error = %e, "asset unavailable");
                None
            }
        }
    }
}
