//! Analysis backend: the seam between the orchestrator and the generative-AI service.
//!
//! Default: `GeminiBackend` (text via Gemini, images via Imagen).
//! `AppState` carries an `Arc<dyn AnalysisBackend>`; tests inject a scripted backend.

use async_trait::async_trait;

use crate::analysis::prompts::{
    build_description_prompt, build_enrichment_prompt, build_image_prompt,
};
use crate::llm_client::prompts::enrichment_schema;
use crate::llm_client::{GeminiClient, LlmError};
use crate::models::{EnrichmentTerm, GeneId, ImageRef, ViewerKind};

/// Maximum number of enrichment terms requested from and kept per run.
pub const MAX_ENRICHMENT_TERMS: usize = 5;

/// The three remote operations a run is made of.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// One enrichment request for the whole gene set.
    async fn enrichment(&self, genes: &[GeneId]) -> Result<Vec<EnrichmentTerm>, LlmError>;

    /// A single-sentence description of what `kind` would show for `gene`.
    async fn describe_visual(&self, gene: &GeneId, kind: ViewerKind) -> Result<String, LlmError>;

    /// An illustrative image conditioned on the description.
    async fn render_visual(
        &self,
        gene: &GeneId,
        kind: ViewerKind,
        description: &str,
    ) -> Result<ImageRef, LlmError>;
}

/// Production backend over the Gemini client.
pub struct GeminiBackend {
    client: GeminiClient,
}

impl GeminiBackend {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnalysisBackend for GeminiBackend {
    async fn enrichment(&self, genes: &[GeneId]) -> Result<Vec<EnrichmentTerm>, LlmError> {
        let prompt = build_enrichment_prompt(genes, MAX_ENRICHMENT_TERMS);
        self.client
            .generate_json::<Vec<EnrichmentTerm>>(&prompt, &enrichment_schema())
            .await
    }

    async fn describe_visual(&self, gene: &GeneId, kind: ViewerKind) -> Result<String, LlmError> {
        self.client
            .generate_text(&build_description_prompt(gene, kind))
            .await
    }

    async fn render_visual(
        &self,
        gene: &GeneId,
        kind: ViewerKind,
        description: &str,
    ) -> Result<ImageRef, LlmError> {
        let encoded = self
            .client
            .generate_image(&build_image_prompt(gene, kind, description))
            .await?;
        Ok(ImageRef::png_base64(&encoded))
    }
}
