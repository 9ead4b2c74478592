use serde_json::json;

use crate::models::chat::ToolDefinition;
use crate::models::workers::WorkersTool;

/// Flatten OpenAI function-tool declarations into the Workers AI shape.
///
/// Pure structural change; no validation beyond what the typed request model
/// already enforced. Missing descriptions become empty strings and missing
/// parameter schemas become an empty object schema.
pub fn convert_tools(tools: &[ToolDefinition]) -> Vec<WorkersTool> {
    tools
        .iter()
        .map(|tool| {
            let ToolDefinition::Function { function } = tool;
            WorkersTool {
                name: function.name.clone(),
                description: function.description.clone().unwrap_or_default(),
                parameters: function
                    .parameters
                    .clone()
                    .unwrap_or_else(|| json!({"type": "object", "properties": {}})),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::FunctionDef;

    #[test]
    fn flattens_function_declarations() {
        let tools = vec![ToolDefinition::Function {
            function: FunctionDef {
                name: "lookup".into(),
                description: Some("Lookup a value".into()),
                parameters: Some(json!({
                    "type": "object",
                    "properties": {"q": {"type": "string"}},
                    "required": ["q"]
                })),
            },
        }];

        let out = convert_tools(&tools);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "lookup");
        assert_eq!(out[0].description, "Lookup a value");
        assert_eq!(
            out[0].parameters.get("required"),
            Some(&json!(["q"]))
        );
    }

    #[test]
    fn missing_description_and_parameters_get_defaults() {
        let tools = vec![ToolDefinition::Function {
            function: FunctionDef {
                name: "bare".into(),
                description: None,
                parameters: None,
            },
        }];

        let out = convert_tools(&tools);
        assert_eq!(out[0].description, "");
        assert_eq!(out[0].parameters, json!({"type": "object", "properties": {}}));
    }
}
