// Shared prompt fragments and the JSON schema for structured enrichment output.
// Per-call prompt templates live next to their callers in analysis::prompts.

use serde_json::{json, Value};

/// Style clause appended to every image prompt.
pub const FIGURE_STYLE_INSTRUCTION: &str =
    "The style should be clean, scientific, and resemble a figure from a research paper.";

/// Response schema for GO enrichment: an array of objects with all four fields required.
pub fn enrichment_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "go_id": { "type": "STRING" },
                "name": { "type": "STRING" },
                "p_value": { "type": "NUMBER" },
                "study_count": { "type": "INTEGER" }
            },
            "required": ["go_id", "name", "p_value", "study_count"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrichment_schema_requires_all_fields() {
        let schema = enrichment_schema();
        let required = schema["items"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert_eq!(schema["items"]["properties"]["study_count"]["type"], "INTEGER");
    }
}
