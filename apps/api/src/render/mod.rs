// Report rendering and PDF export.
// Implements: HTML report view, bitmap capture, bitmap pagination into a PDF.
// PDF encoding is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod handlers;
pub mod html;
pub mod pdf;
pub mod rasterizer;

use thiserror::Error;
use tracing::info;

use crate::analysis::ProgressSink;
use crate::layout::{PageSize, PaginationError};
use crate::models::{AnalysisReport, ProgressState};

pub use html::render_report_html;
pub use pdf::write_pdf;
pub use rasterizer::{ChromeRasterizer, Rasterizer};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    #[error("Pagination failed: {0}")]
    Pagination(#[from] PaginationError),

    #[error("Bitmap decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF encoding failed: {0}")]
    Pdf(String),
}

/// HTML → bitmap → paginated PDF bytes. The caller decides the artifact name.
pub async fn export_report(
    report: &AnalysisReport,
    rasterizer: &dyn Rasterizer,
    page: PageSize,
    title: &str,
    progress: &dyn ProgressSink,
) -> Result<Vec<u8>, ExportError> {
    progress.publish(ProgressState::new(10.0, "Rendering report..."));
    let html = render_report_html(report);
    let bitmap = rasterizer.rasterize(&html).await?;
    info!(
        "Report rasterized to {}x{} px",
        bitmap.width(),
        bitmap.height()
    );

    progress.publish(ProgressState::new(60.0, "Paginating report..."));
    let title = title.to_string();
    let pdf = tokio::task::spawn_blocking(move || write_pdf(&bitmap, page, &title))
        .await
        .map_err(|e| ExportError::Pdf(format!("PDF task failed: {e}")))??;

    info!("PDF export produced {} bytes", pdf.len());
    Ok(pdf)
}

/// `<basename>.pdf`
pub fn artifact_file_name(basename: &str) -> String {
    format!("{basename}.pdf")
}

#[cfg(test)]
pub mod testing {
    use async_trait::async_trait;
    use image::{DynamicImage, Rgb, RgbImage};

    use super::{ExportError, Rasterizer};

    /// Rasterizer that returns a solid bitmap of fixed size, or fails when `fail` is set.
    pub struct FixedRasterizer {
        pub width: u32,
        pub height: u32,
        pub fail: bool,
    }

    #[async_trait]
    impl Rasterizer for FixedRasterizer {
        async fn rasterize(&self, html: &str) -> Result<DynamicImage, ExportError> {
            if self.fail {
                return Err(ExportError::Rasterize("browser unavailable".to_string()));
            }
            assert!(html.contains("Analysis Report"));
            Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(
                self.width,
                self.height,
                Rgb([255, 255, 255]),
            )))
        }
    }
}
