use std::fmt;

use serde::{Deserialize, Serialize};

/// Sample list offered to clients that want to try the service without their own data.
pub const SAMPLE_GENE_LIST: &str = "AT1G01010\nAT1G01020\nAT1G01030\nAT1G22840\nAT1G22850";

/// An opaque, non-empty gene identifier token (e.g. `AT1G01010`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneId(String);

impl GeneId {
    /// Returns `None` for empty or whitespace-only tokens.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Splits a raw gene list on commas and any whitespace, dropping empty tokens.
///
/// Input order is preserved and duplicates are kept.
pub fn parse_gene_list(raw: &str) -> Vec<GeneId> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(GeneId::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(genes: &[GeneId]) -> Vec<&str> {
        genes.iter().map(GeneId::as_str).collect()
    }

    #[test]
    fn test_parse_mixed_separators() {
        let genes = parse_gene_list("AT1G01010, AT1G01020\nAT1G01030\t AT1G22840,,AT1G22850");
        assert_eq!(
            ids(&genes),
            vec!["AT1G01010", "AT1G01020", "AT1G01030", "AT1G22840", "AT1G22850"]
        );
    }

    #[test]
    fn test_parse_separators_only_is_empty() {
        assert!(parse_gene_list("").is_empty());
        assert!(parse_gene_list(" ,\n\t, ,\r\n").is_empty());
    }

    #[test]
    fn test_parse_keeps_duplicates_in_order() {
        let genes = parse_gene_list("B A B");
        assert_eq!(ids(&genes), vec!["B", "A", "B"]);
    }

    #[test]
    fn test_sample_list_parses_to_five_genes() {
        assert_eq!(parse_gene_list(SAMPLE_GENE_LIST).len(), 5);
    }

    #[test]
    fn test_gene_id_rejects_blank() {
        assert!(GeneId::new("   ").is_none());
        assert_eq!(GeneId::new(" AT1G01010 ").unwrap().as_str(), "AT1G01010");
    }
}
