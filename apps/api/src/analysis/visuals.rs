//! Per-gene visual generation: description, then an image conditioned on it.
//!
//! A failure for one (gene, kind) pair never escapes this module. It is logged and
//! replaced by a placeholder visual tagged with `Provenance::Placeholder`.

use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::backend::AnalysisBackend;
use crate::analysis::pacing::Pacer;
use crate::llm_client::LlmError;
use crate::models::{GeneId, GeneVisual, ViewerKind};

#[derive(Debug, Error)]
pub enum VisualError {
    #[error("generation call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("description was empty")]
    EmptyDescription,
}

/// Generates one visual per kind, in the given order, degrading failures to placeholders.
pub async fn generate_gene_visuals(
    backend: &dyn AnalysisBackend,
    pacer: &dyn Pacer,
    gene: &GeneId,
    kinds: &[ViewerKind],
) -> Vec<GeneVisual> {
    let mut visuals = Vec::with_capacity(kinds.len());

    for &kind in kinds {
        let visual = match generate_visual(backend, pacer, gene, kind).await {
            Ok(visual) => visual,
            Err(e) => {
                warn!("Visual for {gene} / {kind} degraded to placeholder: {e}");
                GeneVisual::placeholder(kind, e.to_string())
            }
        };
        visuals.push(visual);
    }

    visuals
}

async fn generate_visual(
    backend: &dyn AnalysisBackend,
    pacer: &dyn Pacer,
    gene: &GeneId,
    kind: ViewerKind,
) -> Result<GeneVisual, VisualError> {
    pacer.pause().await;
    let description = backend.describe_visual(gene, kind).await?;
    let description = description.trim().to_string();
    if description.is_empty() {
        return Err(VisualError::EmptyDescription);
    }
    debug!("Description for {gene} / {kind}: {description}");

    pacer.pause().await;
    let image = backend.render_visual(gene, kind, &description).await?;

    Ok(GeneVisual::generated(kind, description, image))
}
