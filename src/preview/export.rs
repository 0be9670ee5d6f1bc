use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::InvoicePreview;
use crate::core::InvoiceError;

/// Paper size of the exported document (portrait).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
}

impl PageFormat {
    /// Page width and height in PDF points.
    pub fn size_pt(&self) -> (f32, f32) {
        match self {
            Self::A4 => (595.0, 842.0),
            Self::Letter => (612.0, 792.0),
        }
    }
}

/// Options handed to a [`PdfExporter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Name of the downloaded file, e.g. "INV-20240305-0001.pdf".
    pub filename: String,
    pub page_format: PageFormat,
    /// JPEG quality for rasterizing exporters, 0.0 to 1.0.
    pub image_quality: f32,
    /// Canvas scale factor for rasterizing exporters.
    pub render_scale: f32,
}

impl ExportOptions {
    /// Defaults used by the download button: A4, quality 0.98, scale 2.
    pub fn for_invoice(invoice_id: &str) -> Self {
        Self {
            filename: format!("{invoice_id}.pdf"),
            page_format: PageFormat::A4,
            image_quality: 0.98,
            render_scale: 2.0,
        }
    }
}

/// A finished PDF ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ExportedPdf {
    /// Write the file into `dir` under its filename and return the full path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, InvoiceError> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)
            .map_err(|e| InvoiceError::Export(format!("failed to write {}: {e}", path.display())))?;
        Ok(path)
    }
}

/// Turns a rendered invoice into a PDF.
///
/// Implementations report failure through the returned error; callers do
/// not retry automatically.
pub trait PdfExporter {
    fn export(
        &self,
        preview: &InvoicePreview,
        options: &ExportOptions,
    ) -> Result<ExportedPdf, InvoiceError>;
}

impl<F> PdfExporter for F
where
    F: Fn(&InvoicePreview, &ExportOptions) -> Result<ExportedPdf, InvoiceError>,
{
    fn export(
        &self,
        preview: &InvoicePreview,
        options: &ExportOptions,
    ) -> Result<ExportedPdf, InvoiceError> {
        self(preview, options)
    }
}
