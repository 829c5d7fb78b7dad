//! Document access - the seam between the extraction pipeline and the
//! PDF-reading collaborator.
//!
//! The pipeline needs exactly four capabilities from a paginated
//! document: a page count, full-page rasterization at a chosen
//! resolution, enumeration of embedded raster images, and per-page text.
//! [`DocumentSource`] captures that contract; [`PdfiumSource`] implements
//! it over the `pdfium-render` crate.

use crate::error::{Error, Result};
use crate::raster::PageRaster;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};

/// PDF points per inch. Page sizes are expressed in points, so a render
/// at `dpi` scales the native size by `dpi / POINTS_PER_INCH`.
const POINTS_PER_INCH: f32 = 72.0;

/// A raster image embedded in a page's content.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    /// Position among the page's image objects, in content order
    pub index: usize,
    /// The decoded image
    pub image: DynamicImage,
}

impl EmbeddedImage {
    /// Pixel width of the embedded image.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Pixel height of the embedded image.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Save the image as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image
            .save(path.as_ref())
            .map_err(|e| Error::Image(e.to_string()))
    }
}

/// A paginated document the pipeline can extract from.
///
/// Implementations are expected to fail fast on unreadable documents and
/// to treat a page render failure as fatal for that page; the pipeline
/// performs no partial-page recovery.
pub trait DocumentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> Result<usize>;

    /// Render the page at `index` to an RGB raster.
    ///
    /// Pixel dimensions are the page's native size scaled by
    /// `dpi / 72`, rounded up.
    fn render_page(&self, index: usize, dpi: f32) -> Result<PageRaster>;

    /// Enumerate the raster images embedded in the page at `index`.
    ///
    /// Images that fail to decode are skipped with a warning rather than
    /// aborting the enumeration.
    fn embedded_images(&self, index: usize) -> Result<Vec<EmbeddedImage>>;

    /// Extract the text content of the page at `index`.
    fn page_text(&self, index: usize) -> Result<String>;
}

/// [`DocumentSource`] backed by the pdfium library.
///
/// The document is re-loaded from disk per operation; pdfium parses
/// lazily, so this keeps the source free of self-referential lifetimes
/// at a small per-call cost.
pub struct PdfiumSource {
    pdfium: Pdfium,
    path: PathBuf,
}

impl PdfiumSource {
    /// Open a PDF file, binding pdfium from the working directory or the
    /// system library path.
    ///
    /// Fails fast when the library cannot be bound or the document is
    /// malformed or unreadable.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|e| Error::Document(format!("failed to bind pdfium: {e}")))?,
        );
        let path = path.as_ref().to_path_buf();

        // Validate the document up front so later per-page calls cannot
        // surprise the caller with open failures.
        pdfium
            .load_pdf_from_file(&path, None)
            .map_err(|e| Error::Document(format!("{}: {e}", path.display())))?;

        Ok(Self { pdfium, path })
    }

    fn load(&self) -> Result<PdfDocument<'_>> {
        self.pdfium
            .load_pdf_from_file(&self.path, None)
            .map_err(|e| Error::Document(format!("{}: {e}", self.path.display())))
    }

    fn page<'a>(&self, document: &PdfDocument<'a>, index: usize) -> Result<PdfPage<'a>> {
        let count = document.pages().len() as usize;
        if index >= count {
            return Err(Error::PageOutOfBounds { index, count });
        }
        document
            .pages()
            .get(index as u16)
            .map_err(|e| Error::Document(format!("page {index}: {e}")))
    }
}

impl DocumentSource for PdfiumSource {
    fn page_count(&self) -> Result<usize> {
        Ok(self.load()?.pages().len() as usize)
    }

    fn render_page(&self, index: usize, dpi: f32) -> Result<PageRaster> {
        let document = self.load()?;
        let page = self.page(&document, index)?;

        let scale = dpi / POINTS_PER_INCH;
        let width = (page.width().value * scale).ceil() as i32;
        let height = (page.height().value * scale).ceil() as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width)
                    .set_target_height(height),
            )
            .map_err(|e| Error::Render {
                page: index,
                reason: e.to_string(),
            })?;

        log::debug!("rendered page {} at {} dpi: {}x{}", index + 1, dpi, width, height);

        Ok(PageRaster::from_dynamic(bitmap.as_image()))
    }

    fn embedded_images(&self, index: usize) -> Result<Vec<EmbeddedImage>> {
        let document = self.load()?;
        let page = self.page(&document, index)?;

        let mut images = Vec::new();
        for object in page.objects().iter() {
            if let Some(image_object) = object.as_image_object() {
                match image_object.get_raw_image() {
                    Ok(image) => images.push(EmbeddedImage {
                        index: images.len(),
                        image,
                    }),
                    Err(e) => {
                        log::warn!("skipping undecodable image on page {}: {e}", index + 1);
                    },
                }
            }
        }

        log::debug!("page {}: {} embedded images", index + 1, images.len());
        Ok(images)
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let document = self.load()?;
        let page = self.page(&document, index)?;
        let text = page
            .text()
            .map_err(|e| Error::Document(format!("page {index} text: {e}")))?;
        Ok(text.all())
    }
}
