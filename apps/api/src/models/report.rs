use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::gene::GeneId;
use crate::models::viewer::ViewerKind;

/// Fixed image shown in place of a visual that could not be generated.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/600x400.png?text=Error+Generating+Image";

// ────────────────────────────────────────────────────────────────────────────
// Enrichment
// ────────────────────────────────────────────────────────────────────────────

/// A mock GO enrichment association between the gene set and a biological process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentTerm {
    pub go_id: String,
    pub name: String,
    /// Probability in `[0, 1]`.
    pub p_value: f64,
    pub study_count: u32,
}

impl EnrichmentTerm {
    pub fn has_valid_p_value(&self) -> bool {
        self.p_value.is_finite() && (0.0..=1.0).contains(&self.p_value)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Visuals
// ────────────────────────────────────────────────────────────────────────────

/// Where a visual's image lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageRef {
    /// Inline `data:` URL carrying the generated bytes.
    DataUrl(String),
    /// External URL (the placeholder image).
    Url(String),
}

impl ImageRef {
    pub fn png_base64(encoded: &str) -> Self {
        ImageRef::DataUrl(format!("data:image/png;base64,{encoded}"))
    }

    /// Value usable as an `<img src>`.
    pub fn src(&self) -> &str {
        match self {
            ImageRef::DataUrl(url) | ImageRef::Url(url) => url,
        }
    }
}

/// Whether a visual came back from the generator or was substituted after a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Provenance {
    Generated,
    Placeholder { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneVisual {
    pub kind: ViewerKind,
    pub description: String,
    pub image: ImageRef,
    pub provenance: Provenance,
}

impl GeneVisual {
    pub fn generated(kind: ViewerKind, description: String, image: ImageRef) -> Self {
        Self {
            kind,
            description,
            image,
            provenance: Provenance::Generated,
        }
    }

    /// Same shape as a generated visual, carrying the fixed fallback description and image.
    pub fn placeholder(kind: ViewerKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            description: placeholder_description(kind),
            image: ImageRef::Url(PLACEHOLDER_IMAGE_URL.to_string()),
            provenance: Provenance::Placeholder {
                reason: reason.into(),
            },
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.provenance, Provenance::Placeholder { .. })
    }
}

pub fn placeholder_description(kind: ViewerKind) -> String {
    format!(
        "Could not generate description or visualization for {}.",
        kind.label()
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Reports
// ────────────────────────────────────────────────────────────────────────────

/// All visuals for one gene, one per requested viewer kind, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneReport {
    pub gene_id: GeneId,
    pub visuals: Vec<GeneVisual>,
}

impl GeneReport {
    pub fn placeholder_count(&self) -> usize {
        self.visuals.iter().filter(|v| v.is_placeholder()).count()
    }
}

/// The result of one successful run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub enrichment_terms: Vec<EnrichmentTerm>,
    pub gene_reports: Vec<GeneReport>,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn new(enrichment_terms: Vec<EnrichmentTerm>, gene_reports: Vec<GeneReport>) -> Self {
        Self {
            enrichment_terms,
            gene_reports,
            generated_at: Utc::now(),
        }
    }

    pub fn placeholder_count(&self) -> usize {
        self.gene_reports.iter().map(GeneReport::placeholder_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_visual_has_fixed_content() {
        let visual = GeneVisual::placeholder(ViewerKind::WorldMap, "timeout");
        assert_eq!(
            visual.description,
            "Could not generate description or visualization for World eFP."
        );
        assert_eq!(visual.image.src(), PLACEHOLDER_IMAGE_URL);
        assert!(visual.is_placeholder());
    }

    #[test]
    fn test_enrichment_term_uses_go_field_names() {
        let json = r#"{"go_id":"GO:0006950","name":"response to stress","p_value":0.001,"study_count":3}"#;
        let term: EnrichmentTerm = serde_json::from_str(json).unwrap();
        assert_eq!(term.go_id, "GO:0006950");
        assert_eq!(term.study_count, 3);
        assert!(term.has_valid_p_value());
    }

    #[test]
    fn test_negative_study_count_is_rejected() {
        let json = r#"{"go_id":"GO:1","name":"x","p_value":0.01,"study_count":-1}"#;
        assert!(serde_json::from_str::<EnrichmentTerm>(json).is_err());
    }

    #[test]
    fn test_p_value_outside_unit_interval_is_invalid() {
        let term = EnrichmentTerm {
            go_id: "GO:1".to_string(),
            name: "x".to_string(),
            p_value: 1.5,
            study_count: 1,
        };
        assert!(!term.has_valid_p_value());
    }

    #[test]
    fn test_png_data_url() {
        assert_eq!(ImageRef::png_base64("AAAA").src(), "data:image/png;base64,AAAA");
    }
}
