//! The structured summary returned to callers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Three-field repository summary produced by the model.
///
/// Unknown fields are denied so the derived JSON schema carries
/// `additionalProperties: false`, which is what the completion service is
/// asked to conform to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SummaryResult {
    /// Human-readable description of what the project does.
    pub summary: String,
    /// Main languages, frameworks and libraries used.
    #[schemars(length(min = 1))]
    pub technologies: Vec<String>,
    /// How the project is organized.
    pub structure: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_all_three_fields() {
        let schema = serde_json::to_value(schemars::schema_for!(SummaryResult)).unwrap();

        let mut required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        required.sort();
        assert_eq!(required, vec!["structure", "summary", "technologies"]);

        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 3);
        for field in ["summary", "technologies", "structure"] {
            assert!(properties.contains_key(field), "missing property {field}");
        }
    }

    #[test]
    fn schema_rejects_additional_properties() {
        let schema = serde_json::to_value(schemars::schema_for!(SummaryResult)).unwrap();
        assert_eq!(schema["additionalProperties"], serde_json::json!(false));
    }

    #[test]
    fn schema_technologies_is_non_empty_string_array() {
        let schema = serde_json::to_value(schemars::schema_for!(SummaryResult)).unwrap();
        let technologies = &schema["properties"]["technologies"];
        assert_eq!(technologies["type"], "array");
        assert_eq!(technologies["items"]["type"], "string");
        assert_eq!(technologies["minItems"], 1);
    }
}
