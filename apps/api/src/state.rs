use std::sync::Arc;

use crate::analysis::{AnalysisBackend, Pacer};
use crate::config::Config;
use crate::layout::PageSize;
use crate::render::Rasterizer;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The single in-memory run session (no persistence).
    pub session: SessionStore,
    /// Remote generation seam. Default: GeminiBackend.
    pub backend: Arc<dyn AnalysisBackend>,
    /// Inter-call pacing for the external rate limit.
    pub pacer: Arc<dyn Pacer>,
    /// Report capture for PDF export. Default: ChromeRasterizer.
    pub rasterizer: Arc<dyn Rasterizer>,
    /// Export page size, A4 portrait.
    pub page: PageSize,
}
