use crate::error::ValidationError;
use crate::openapi::OpenApiDocument;

/// Structural core of the OpenAPI 3.1 meta-schema, embedded so validation
/// needs no network access.
const META_SCHEMA: &str = include_str!("../../schemas/openapi-3.1.schema.json");

/// Validate an emitted document against the embedded OpenAPI meta-schema.
///
/// A violation is a build-blocking defect: the caller aborts the run while
/// leaving already-written artifacts on disk.
pub fn validate_document(document: &OpenApiDocument) -> Result<(), ValidationError> {
    let instance = serde_json::to_value(document)?;
    validate_value(&instance)
}

/// Validate an arbitrary JSON value, e.g. an artifact re-read from disk.
pub fn validate_value(instance: &serde_json::Value) -> Result<(), ValidationError> {
    let schema: serde_json::Value = serde_json::from_str(META_SCHEMA)
        .map_err(|error| ValidationError::MetaSchema(error.to_string()))?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|error| ValidationError::MetaSchema(error.to_string()))?;

    let details: Vec<String> = validator
        .iter_errors(instance)
        .map(|error| format!("{}: {}", error.instance_path(), error))
        .collect();

    if details.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Document {
            details: details.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_document_missing_info() {
        let instance = serde_json::json!({
            "openapi": "3.1.0",
            "paths": {}
        });
        assert!(matches!(
            validate_value(&instance),
            Err(ValidationError::Document { .. })
        ));
    }

    #[test]
    fn test_rejects_operation_without_responses() {
        let instance = serde_json::json!({
            "openapi": "3.1.0",
            "info": { "title": "t", "version": "v" },
            "paths": {
                "/access": {
                    "get": { "operationId": "get-access" }
                }
            }
        });
        assert!(matches!(
            validate_value(&instance),
            Err(ValidationError::Document { .. })
        ));
    }

    #[test]
    fn test_rejects_optional_path_parameter() {
        let instance = serde_json::json!({
            "openapi": "3.1.0",
            "info": { "title": "t", "version": "v" },
            "paths": {
                "/nodes/{node}": {
                    "get": {
                        "parameters": [
                            { "name": "node", "in": "path", "required": false }
                        ],
                        "responses": { "200": { "description": "ok" } }
                    }
                }
            }
        });
        assert!(matches!(
            validate_value(&instance),
            Err(ValidationError::Document { .. })
        ));
    }

    #[test]
    fn test_accepts_minimal_document() {
        let instance = serde_json::json!({
            "openapi": "3.1.0",
            "info": { "title": "t", "version": "v" },
            "paths": {
                "/access": {
                    "get": {
                        "operationId": "get-access",
                        "responses": { "200": { "description": "ok" } },
                        "security": []
                    }
                }
            }
        });
        assert!(validate_value(&instance).is_ok());
    }
}
