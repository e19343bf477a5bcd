//! PDF writer: places the paginated bitmap onto A4 pages with printpdf.
//!
//! printpdf positions images from the page's bottom-left corner, while placements are
//! measured from the top, so each placement's bottom edge is
//! `page.height - offset - scaled_height`.

use image::DynamicImage;
use printpdf::{Image, ImageTransform, Mm, PdfDocument};
use tracing::debug;

use crate::layout::{paginate, PageSize};
use crate::render::ExportError;

const MM_PER_INCH: f64 = 25.4;
const LAYER_NAME: &str = "Report";

/// Paginates `bitmap` to `page` and returns the encoded PDF.
pub fn write_pdf(bitmap: &DynamicImage, page: PageSize, title: &str) -> Result<Vec<u8>, ExportError> {
    let pagination = paginate(bitmap.width(), bitmap.height(), page)?;
    debug!(
        "Paginating {}x{} px bitmap onto {} pages",
        bitmap.width(),
        bitmap.height(),
        pagination.page_count()
    );

    // DPI at which the bitmap is exactly one page wide.
    let dpi = f64::from(bitmap.width()) * MM_PER_INCH / page.width;
    let rgb = DynamicImage::ImageRgb8(bitmap.to_rgb8());

    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(page.width as f32),
        Mm(page.height as f32),
        LAYER_NAME,
    );

    for placement in &pagination.placements {
        let (page_index, layer_index) = if placement.page_index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(page.width as f32), Mm(page.height as f32), LAYER_NAME)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        let bottom = page.height - placement.offset - pagination.scaled_height;

        Image::from_dynamic_image(&rgb).add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(0.0)),
                translate_y: Some(Mm(bottom as f32)),
                dpi: Some(dpi as f32),
                ..Default::default()
            },
        );
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PaginationError;
    use image::{Rgb, RgbImage};

    fn bitmap(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([240, 248, 255])))
    }

    #[test]
    fn test_writes_pdf_bytes() {
        let pdf = write_pdf(&bitmap(210, 297), PageSize::A4_MM, "one page").unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_tall_bitmap_produces_larger_document() {
        let single = write_pdf(&bitmap(210, 290), PageSize::A4_MM, "short").unwrap();
        let triple = write_pdf(&bitmap(210, 850), PageSize::A4_MM, "tall").unwrap();
        assert!(triple.len() > single.len());
    }

    #[test]
    fn test_zero_height_bitmap_is_rejected() {
        let err = write_pdf(&bitmap(210, 0), PageSize::A4_MM, "empty").unwrap_err();
        assert!(matches!(
            err,
            ExportError::Pagination(PaginationError::EmptyBitmap { .. })
        ));
    }
}
