use serde::{Deserialize, Serialize};

/// Target page dimensions. Units are whatever the caller's document uses (mm for PDF).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 portrait in millimetres.
    pub const A4_MM: PageSize = PageSize::new(210.0, 297.0);

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4_MM
    }
}
