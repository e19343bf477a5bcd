//! In-memory fakes for the analysis seams, shared by unit tests across modules.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::analysis::backend::AnalysisBackend;
use crate::analysis::orchestrator::ProgressSink;
use crate::analysis::pacing::Pacer;
use crate::llm_client::LlmError;
use crate::models::{EnrichmentTerm, GeneId, ImageRef, ProgressState, ViewerKind};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Enrichment { gene_count: usize },
    Describe { gene: String, kind: ViewerKind },
    Render { gene: String, kind: ViewerKind },
}

/// Backend that answers from fixtures and fails on the configured (gene, kind) pairs.
#[derive(Default)]
pub struct ScriptedBackend {
    pub fail_enrichment: bool,
    pub failing_descriptions: Vec<(String, ViewerKind)>,
    pub blank_descriptions: Vec<(String, ViewerKind)>,
    pub failing_images: Vec<(String, ViewerKind)>,
    pub terms: Vec<EnrichmentTerm>,
    pub calls: Mutex<Vec<BackendCall>>,
}

impl ScriptedBackend {
    pub fn with_terms(terms: Vec<EnrichmentTerm>) -> Self {
        Self {
            terms,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn listed(list: &[(String, ViewerKind)], gene: &GeneId, kind: ViewerKind) -> bool {
        list.iter().any(|(g, k)| g == gene.as_str() && *k == kind)
    }
}

#[async_trait]
impl AnalysisBackend for ScriptedBackend {
    async fn enrichment(&self, genes: &[GeneId]) -> Result<Vec<EnrichmentTerm>, LlmError> {
        self.record(BackendCall::Enrichment {
            gene_count: genes.len(),
        });
        if self.fail_enrichment {
            return Err(LlmError::Api {
                status: 503,
                message: "model overloaded".to_string(),
            });
        }
        Ok(self.terms.clone())
    }

    async fn describe_visual(&self, gene: &GeneId, kind: ViewerKind) -> Result<String, LlmError> {
        self.record(BackendCall::Describe {
            gene: gene.to_string(),
            kind,
        });
        if Self::listed(&self.failing_descriptions, gene, kind) {
            return Err(LlmError::EmptyContent);
        }
        if Self::listed(&self.blank_descriptions, gene, kind) {
            return Ok("  \n ".to_string());
        }
        Ok(format!("{gene} shows strong signal in the {} view.", kind.label()))
    }

    async fn render_visual(
        &self,
        gene: &GeneId,
        kind: ViewerKind,
        _description: &str,
    ) -> Result<ImageRef, LlmError> {
        self.record(BackendCall::Render {
            gene: gene.to_string(),
            kind,
        });
        if Self::listed(&self.failing_images, gene, kind) {
            return Err(LlmError::NoImage);
        }
        Ok(ImageRef::png_base64("iVBORw0KGgo="))
    }
}

/// Pacer that returns immediately and counts pauses.
#[derive(Default)]
pub struct CountingPacer {
    pauses: AtomicUsize,
}

impl CountingPacer {
    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

/// Sink that keeps every published progress snapshot.
#[derive(Default)]
pub struct RecordingSink {
    published: Mutex<Vec<ProgressState>>,
}

impl RecordingSink {
    pub fn published(&self) -> Vec<ProgressState> {
        self.published.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn publish(&self, progress: ProgressState) {
        self.published.lock().unwrap().push(progress);
    }
}

pub fn sample_terms() -> Vec<EnrichmentTerm> {
    vec![
        EnrichmentTerm {
            go_id: "GO:0006950".to_string(),
            name: "response to stress".to_string(),
            p_value: 0.0012,
            study_count: 3,
        },
        EnrichmentTerm {
            go_id: "GO:0009733".to_string(),
            name: "response to auxin".to_string(),
            p_value: 0.021,
            study_count: 2,
        },
    ]
}
