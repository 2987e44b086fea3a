//! Agreement rendering

use crate::assets::{Asset, AssetStore};
use crate::blocks::{layout, Block, ImageBlock, SegmentsBlock, TextBlock, TextStyle};
use crate::schema::AgreementInput;
use crate::Result;
use pdf_core::{PageSize, PdfDocument};
use tracing::info;

/// Page format of every agreement
const PAGE_SIZE: PageSize = PageSize::LETTER;

/// Letterhead images loaded for one render
struct LoadedAssets {
    logo: Option<Vec<u8>>,
    footer: Option<Vec<u8>>,
}

impl LoadedAssets {
    fn load(store: &AssetStore) -> Self {
        Self {
            logo: store.load(Asset::Logo),
            footer: store.load(Asset::Footer),
        }
    }

    fn get(&self, asset: Asset) -> Option<&[u8]> {
        match asset {
            Asset::Logo => self.logo.as_deref(),
            Asset::Footer => self.footer.as_deref(),
        }
    }
}

/// Agreement renderer
///
/// Stateless apart from the asset directory, so one instance can serve
/// any number of renders.
#[derive(Debug, Clone)]
pub struct ConvenioRenderer {
    assets: AssetStore,
}

impl ConvenioRenderer {
    /// Create a renderer reading letterhead images from `assets`
    pub fn new(assets: AssetStore) -> Self {
        Self { assets }
    }

    /// Render one agreement to PDF bytes
    ///
    /// The images are read from disk on every call. Identical input and
    /// images produce identical bytes.
    pub fn render(&self, input: &AgreementInput) -> Result<Vec<u8>> {
        let loaded = LoadedAssets::load(&self.assets);
        let blocks = layout(
            input,
            loaded.logo.is_some(),
            loaded.footer.is_some(),
            PAGE_SIZE,
        );

        let mut doc = PdfDocument::new(PAGE_SIZE)?;
        doc.set_title(&format!("Convenio {}", input.agreement_number));

        for block in &blocks {
            self.render_block(&mut doc, block, &loaded)?;
        }

        let bytes = doc.to_bytes()?;

        info!(
            numero = %input.agreement_number,
            bytes = bytes.len(),
            "agreement rendered"
        );

        Ok(bytes)
    }

    /// Render a single block
    fn render_block(&self, doc: &mut PdfDocument, block: &Block, assets: &LoadedAssets) -> Result<()> {
        match block {
            Block::Text(b) => self.render_text_block(doc, b),
            Block::Segments(b) => self.render_segments_block(doc, b),
            Block::Image(b) => self.render_image_block(doc, b, assets),
        }
    }

    fn apply_style(&self, doc: &mut PdfDocument, style: &TextStyle) {
        doc.set_font(style.weight, style.size);
        doc.set_text_color(style.color);
    }

    fn render_text_block(&self, doc: &mut PdfDocument, block: &TextBlock) -> Result<()> {
        self.apply_style(doc, &block.style);
        doc.insert_text(
            &block.text,
            1,
            block.position.x,
            block.position.y,
            block.align,
        )?;
        Ok(())
    }

    fn render_segments_block(&self, doc: &mut PdfDocument, block: &SegmentsBlock) -> Result<()> {
        self.apply_style(doc, &block.style);
        doc.insert_segments(&block.segments, 1, block.position.x, block.position.y)?;
        Ok(())
    }

    fn render_image_block(
        &self,
        doc: &mut PdfDocument,
        block: &ImageBlock,
        assets: &LoadedAssets,
    ) -> Result<()> {
        // Layout only emits image blocks for assets that loaded
        let Some(data) = assets.get(block.asset) else {
            return Ok(());
        };

        doc.insert_image_scaled(
            data,
            1,
            block.position.x,
            block.position.y,
            block.size.width,
            block.size.height,
            block.mode,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ClientInfo, RateTable};
    use chrono::NaiveDate;

    fn input() -> AgreementInput {
        AgreementInput {
            agreement_number: "CV-1".to_string(),
            client: ClientInfo {
                nombre: Some("Ana".to_string()),
                ..Default::default()
            },
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            rates: RateTable::default(),
            validity_year: Some("2027".to_string()),
        }
    }

    #[test]
    fn test_render_without_assets() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ConvenioRenderer::new(AssetStore::new(dir.path()));

        let bytes = renderer.render(&input()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ConvenioRenderer::new(AssetStore::new(dir.path()));

        assert_eq!(
            renderer.render(&input()).unwrap(),
            renderer.render(&input()).unwrap()
        );
    }

    #[test]
    fn test_loaded_assets_lookup() {
        let loaded = LoadedAssets {
            logo: Some(vec![1, 2, 3]),
            footer: None,
        };
        assert_eq!(loaded.get(Asset::Logo), Some([1u8, 2, 3].as_slice()));
        assert_eq!(loaded.get(Asset::Footer), None);
    }
}
