pub mod health;

use axum::{routing::get, Router};

use crate::analysis::handlers as analysis;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/viewers", get(analysis::handle_list_viewers))
        .route(
            "/api/v1/analysis",
            get(analysis::handle_get_analysis).post(analysis::handle_submit_analysis),
        )
        .route(
            "/api/v1/analysis/report.pdf",
            get(render::handle_download_pdf),
        )
        .with_state(state)
}
