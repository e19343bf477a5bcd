//! Bitmap pagination: slices one tall bitmap into page-height windows.
//!
//! The bitmap is scaled uniformly to the page width. Every page places the *whole*
//! scaled bitmap, shifted upward by the height already shown, so that the page
//! bounds crop exactly the next slice:
//!
//! ```text
//! scaled_height = page.width * (H / W)
//! page 1: offset 0,              remaining = scaled_height - page.height
//! page n: offset = remaining - scaled_height, then remaining -= page.height
//! stop when remaining <= 0
//! ```
//!
//! An exact multiple of the page height ends on a full page with no trailing empty
//! page. Floating-point slivers up to `SLIVER_TOLERANCE * page.height` count as zero.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::page::PageSize;

/// Relative remainder below which no further page is started.
pub const SLIVER_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaginationError {
    #[error("bitmap has zero area ({width}x{height} px)")]
    EmptyBitmap { width: u32, height: u32 },

    #[error("page size must be positive and finite (got {width}x{height})")]
    InvalidPage { width: f64, height: f64 },
}

/// Where the scaled bitmap goes on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagePlacement {
    pub page_index: usize,
    /// Vertical position of the bitmap's top edge relative to the page top (≤ 0).
    pub offset: f64,
    /// Height of the bitmap slice actually visible on this page.
    pub visible_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub scaled_width: f64,
    pub scaled_height: f64,
    pub placements: Vec<PagePlacement>,
}

impl Pagination {
    pub fn page_count(&self) -> usize {
        self.placements.len()
    }
}

/// Computes page placements for a `width_px` × `height_px` bitmap on pages of size `page`.
pub fn paginate(width_px: u32, height_px: u32, page: PageSize) -> Result<Pagination, PaginationError> {
    if width_px == 0 || height_px == 0 {
        return Err(PaginationError::EmptyBitmap {
            width: width_px,
            height: height_px,
        });
    }
    let page_ok = |v: f64| v.is_finite() && v > 0.0;
    if !page_ok(page.width) || !page_ok(page.height) {
        return Err(PaginationError::InvalidPage {
            width: page.width,
            height: page.height,
        });
    }

    let scaled_height = page.width * (f64::from(height_px) / f64::from(width_px));
    let tolerance = SLIVER_TOLERANCE * page.height;

    let mut placements = vec![PagePlacement {
        page_index: 0,
        offset: 0.0,
        visible_height: scaled_height.min(page.height),
    }];

    let mut remaining = scaled_height - page.height;
    while remaining > tolerance {
        placements.push(PagePlacement {
            page_index: placements.len(),
            offset: remaining - scaled_height,
            visible_height: remaining.min(page.height),
        });
        remaining -= page.height;
    }

    Ok(Pagination {
        scaled_width: page.width,
        scaled_height,
        placements,
    })
}
