//! Axum route handler for report export.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::{error, warn};

use crate::errors::AppError;
use crate::render::{artifact_file_name, export_report};
use crate::session::state::{InvalidTransition, EXPORT_FAILED_MESSAGE};
use crate::session::{RunEvent, SessionStore};
use crate::state::AppState;

/// Holds the session in its exporting state. If the handler future is dropped before the
/// export resolves (client disconnect), the drop records a failed export so the session
/// does not stay busy.
struct ExportGuard<'a> {
    session: &'a SessionStore,
    resolved: bool,
}

impl<'a> ExportGuard<'a> {
    fn begin(session: &'a SessionStore) -> Result<Self, InvalidTransition> {
        session.dispatch(RunEvent::ExportStarted)?;
        Ok(Self {
            session,
            resolved: false,
        })
    }

    fn resolve(mut self, event: RunEvent) {
        self.resolved = true;
        if let Err(e) = self.session.dispatch(event) {
            warn!("Export outcome not recorded: {e}");
        }
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        if self.resolved {
            return;
        }
        warn!("PDF export abandoned before completion");
        if let Err(e) = self
            .session
            .dispatch(RunEvent::ExportFailed(EXPORT_FAILED_MESSAGE.to_string()))
        {
            warn!("Abandoned export not recorded: {e}");
        }
    }
}

/// GET /api/v1/analysis/report.pdf
///
/// Exports the current successful report as a paginated PDF download. A failed export
/// is recorded on the session without discarding the report.
pub async fn handle_download_pdf(State(state): State<AppState>) -> Result<Response, AppError> {
    let guard = match ExportGuard::begin(&state.session) {
        Ok(guard) => guard,
        Err(e) => {
            let snapshot = state.session.snapshot();
            return Err(if snapshot.report().is_none() {
                AppError::NotFound("No completed analysis report to export".to_string())
            } else {
                AppError::Conflict(format!("An export is already in progress ({e})"))
            });
        }
    };

    let Some(report) = state.session.snapshot().report().cloned() else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "export started without a report"
        )));
    };

    let basename = &state.config.report_basename;
    let exported = export_report(
        &report,
        state.rasterizer.as_ref(),
        state.page,
        basename,
        &state.session,
    )
    .await;

    match exported {
        Ok(pdf) => {
            guard.resolve(RunEvent::ExportFinished);
            let disposition = format!("attachment; filename=\"{}\"", artifact_file_name(basename));
            Ok((
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                Bytes::from(pdf),
            )
                .into_response())
        }
        Err(e) => {
            error!("PDF export failed: {e}");
            guard.resolve(RunEvent::ExportFailed(EXPORT_FAILED_MESSAGE.to_string()));
            Err(AppError::Export(EXPORT_FAILED_MESSAGE.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::testing::{sample_terms, ScriptedBackend};
    use crate::models::AnalysisReport;
    use crate::render::testing::FixedRasterizer;
    use crate::routes::build_router;
    use crate::session::RunState;
    use crate::state::testing::{default_test_state, test_state};
    use crate::render::{ExportError, Rasterizer};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use image::DynamicImage;
    use std::time::Duration;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn complete_run(state: &AppState) {
        state
            .session
            .dispatch(RunEvent::Started {
                run_id: Uuid::new_v4(),
            })
            .unwrap();
        state
            .session
            .dispatch(RunEvent::Completed(Arc::new(AnalysisReport::new(
                sample_terms(),
                vec![],
            ))))
            .unwrap();
    }

    async fn download(state: AppState) -> Response {
        let request = Request::builder()
            .uri("/api/v1/analysis/report.pdf")
            .body(Body::empty())
            .unwrap();
        build_router(state).oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_download_returns_named_pdf() {
        let state = default_test_state();
        complete_run(&state);

        let response = download(state.clone()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"gene-analysis-report.pdf\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.starts_with(b"%PDF-"));

        let snapshot = state.session.snapshot();
        assert_eq!(snapshot.name(), "succeeded");
        assert_eq!(snapshot.progress().unwrap().message, "PDF generated!");
    }

    #[tokio::test]
    async fn test_download_without_report_is_not_found() {
        let response = download(default_test_state()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_failure_keeps_report() {
        let state = test_state(
            ScriptedBackend::default(),
            FixedRasterizer {
                width: 0,
                height: 0,
                fail: true,
            },
        );
        complete_run(&state);

        let response = download(state.clone()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        match state.session.snapshot() {
            RunState::Succeeded {
                report,
                export_error,
                exporting,
                ..
            } => {
                assert_eq!(report.enrichment_terms.len(), 2);
                assert_eq!(export_error.as_deref(), Some(EXPORT_FAILED_MESSAGE));
                assert!(!exporting);
            }
            other => panic!("expected succeeded state, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_download_during_export_conflicts() {
        let state = default_test_state();
        complete_run(&state);
        state.session.dispatch(RunEvent::ExportStarted).unwrap();

        let response = download(state).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    /// Rasterizer that never finishes, standing in for a capture the client gives up on.
    struct StalledRasterizer;

    #[async_trait]
    impl Rasterizer for StalledRasterizer {
        async fn rasterize(&self, _html: &str) -> Result<DynamicImage, ExportError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_abandoned_download_releases_session() {
        let state = test_state(ScriptedBackend::default(), StalledRasterizer);
        complete_run(&state);

        let outcome = tokio::time::timeout(
            Duration::from_millis(50),
            handle_download_pdf(State(state.clone())),
        )
        .await;
        assert!(outcome.is_err(), "stalled export should not complete");

        match state.session.snapshot() {
            RunState::Succeeded {
                exporting,
                export_error,
                ..
            } => {
                assert!(!exporting);
                assert_eq!(export_error.as_deref(), Some(EXPORT_FAILED_MESSAGE));
            }
            other => panic!("expected succeeded state, got {other}"),
        }

        state
            .session
            .dispatch(RunEvent::Started {
                run_id: Uuid::new_v4(),
            })
            .unwrap();
        assert_eq!(state.session.snapshot().name(), "running");
    }
}
