//! Analysis run: orchestrates one report from a raw gene list.
//!
//! Flow: parse genes → enrichment (fatal on failure) → per gene, per kind:
//!       description + image (placeholder on failure) → assemble report.
//!
//! Every remote call is awaited before the next one is issued. The only suspension
//! points are the calls themselves and the pacer's inter-call pauses.

use thiserror::Error;
use tracing::{error, info};

use crate::analysis::backend::{AnalysisBackend, MAX_ENRICHMENT_TERMS};
use crate::analysis::pacing::Pacer;
use crate::analysis::visuals::generate_gene_visuals;
use crate::llm_client::LlmError;
use crate::models::{
    parse_gene_list, AnalysisReport, EnrichmentTerm, GeneId, GeneReport, ProgressState, ViewerKind,
};

/// Percent published just before the enrichment call.
const ENRICHMENT_PERCENT: f64 = 5.0;
/// Progress units outside the per-gene steps: one for enrichment, one for export.
const RESERVED_STEPS: usize = 2;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Gene list is empty. Please provide at least one gene identifier.")]
    EmptyInput,

    #[error("Failed to generate GO enrichment data from Gemini API.")]
    Enrichment(#[source] LlmError),
}

/// Receives progress snapshots as the run advances.
pub trait ProgressSink: Send + Sync {
    fn publish(&self, progress: ProgressState);
}

/// Wraps a sink so that published percentages never decrease within a run.
struct MonotonicProgress<'a> {
    sink: &'a dyn ProgressSink,
    last: f64,
}

impl<'a> MonotonicProgress<'a> {
    fn new(sink: &'a dyn ProgressSink) -> Self {
        Self { sink, last: 0.0 }
    }

    fn report(&mut self, percent: f64, message: impl Into<String>) {
        self.last = self.last.max(percent);
        self.sink.publish(ProgressState::new(self.last, message));
    }
}

/// Percent complete after `step` of `total_steps`.
pub fn step_percent(step: usize, total_steps: usize) -> f64 {
    if total_steps == 0 {
        return 100.0;
    }
    (step as f64 / total_steps as f64) * 100.0
}

/// Runs the full analysis and returns the assembled report.
///
/// Only `EmptyInput` (before any remote call) and `Enrichment` (no visual calls issued)
/// end a run early. Visual failures become placeholders and the run completes.
pub async fn run_analysis(
    raw_gene_list: &str,
    requested_kinds: &[ViewerKind],
    backend: &dyn AnalysisBackend,
    pacer: &dyn Pacer,
    sink: &dyn ProgressSink,
) -> Result<AnalysisReport, AnalysisError> {
    let genes = parse_gene_list(raw_gene_list);
    if genes.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    let kinds = ViewerKind::normalize(requested_kinds);

    let mut progress = MonotonicProgress::new(sink);
    progress.report(0.0, "Starting analysis...");
    info!(
        "Analysis started: {} genes x {} viewer kinds",
        genes.len(),
        kinds.len()
    );

    // Step 1: enrichment for the whole gene set
    progress.report(ENRICHMENT_PERCENT, "Generating GO Enrichment summary...");
    let enrichment_terms = generate_enrichment(backend, &genes).await?;
    info!("Enrichment returned {} terms", enrichment_terms.len());

    // Step 2: visuals, one gene at a time
    let total_steps = genes.len() + RESERVED_STEPS;
    let mut gene_reports = Vec::with_capacity(genes.len());

    for (i, gene) in genes.iter().enumerate() {
        progress.report(
            step_percent(i + RESERVED_STEPS, total_steps),
            format!("Analyzing {gene}..."),
        );
        let visuals = generate_gene_visuals(backend, pacer, gene, &kinds).await;
        gene_reports.push(GeneReport {
            gene_id: gene.clone(),
            visuals,
        });
    }

    let report = AnalysisReport::new(enrichment_terms, gene_reports);
    progress.report(100.0, "Analysis complete!");
    info!(
        "Analysis complete: {} gene reports, {} placeholder visuals",
        report.gene_reports.len(),
        report.placeholder_count()
    );

    Ok(report)
}

/// Issues the single enrichment call and validates its output.
async fn generate_enrichment(
    backend: &dyn AnalysisBackend,
    genes: &[GeneId],
) -> Result<Vec<EnrichmentTerm>, AnalysisError> {
    let mut terms = backend.enrichment(genes).await.map_err(|e| {
        error!("Enrichment call failed: {e}");
        AnalysisError::Enrichment(e)
    })?;

    if let Some(bad) = terms.iter().find(|t| !t.has_valid_p_value()) {
        error!("Enrichment term {} has p_value {} outside [0, 1]", bad.go_id, bad.p_value);
        return Err(AnalysisError::Enrichment(LlmError::Invalid(format!(
            "p_value {} for {} is outside [0, 1]",
            bad.p_value, bad.go_id
        ))));
    }

    terms.truncate(MAX_ENRICHMENT_TERMS);
    Ok(terms)
}
