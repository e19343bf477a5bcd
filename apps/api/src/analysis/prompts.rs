// Prompt templates for the analysis pipeline.
// Shared fragments and the enrichment response schema live in llm_client::prompts.

use crate::llm_client::prompts::FIGURE_STYLE_INSTRUCTION;
use crate::models::{GeneId, ViewerKind};

/// Enrichment prompt template. Replace `{gene_list}` and `{max_terms}` before sending.
pub const ENRICHMENT_PROMPT_TEMPLATE: &str = "\
Given the following list of gene identifiers: {gene_list}. \
Perform a mock Gene Ontology (GO) enrichment analysis. \
Return a JSON array of the top {max_terms} most enriched biological process terms. \
Each object in the array must have the following properties: \
\"go_id\" (e.g., \"GO:0006950\"), \
\"name\" (e.g., \"response to stress\"), \
\"p_value\" (a float between 0.0 and 0.05), \
and \"study_count\" (an integer representing how many genes from the list are in this term).";

/// Description prompt template. Replace `{gene_id}` and `{viewer}` before sending.
pub const DESCRIPTION_PROMPT_TEMPLATE: &str = "\
For the gene identifier \"{gene_id}\" and the ePlant viewer \"{viewer}\", \
provide a one-sentence, concise, scientific-sounding description of what the visualization might show. \
Be specific about the results, for example: \
\"This gene shows high expression in root vascular tissue and trichomes.\" or \
\"The protein interacts with key transcription factors involved in stress response.\"";

/// Image prompt template. Replace `{gene_id}`, `{viewer}`, `{description}` and `{style}`.
pub const IMAGE_PROMPT_TEMPLATE: &str = "\
Create a scientific eFP browser visualization for the gene {gene_id}. \
The visualization should be a \"{viewer}\" view. \
Crucially, the image must visually represent the following finding: \"{description}\". \
{style}";

pub fn build_enrichment_prompt(genes: &[GeneId], max_terms: usize) -> String {
    let gene_list = genes
        .iter()
        .map(GeneId::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    ENRICHMENT_PROMPT_TEMPLATE
        .replace("{gene_list}", &gene_list)
        .replace("{max_terms}", &max_terms.to_string())
}

pub fn build_description_prompt(gene: &GeneId, kind: ViewerKind) -> String {
    DESCRIPTION_PROMPT_TEMPLATE
        .replace("{gene_id}", gene.as_str())
        .replace("{viewer}", kind.label())
}

pub fn build_image_prompt(gene: &GeneId, kind: ViewerKind, description: &str) -> String {
    IMAGE_PROMPT_TEMPLATE
        .replace("{gene_id}", gene.as_str())
        .replace("{viewer}", kind.label())
        .replace("{description}", description)
        .replace("{style}", FIGURE_STYLE_INSTRUCTION)
}
