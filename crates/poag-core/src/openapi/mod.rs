pub mod document;

pub use document::{
    BoolOrSchema, Components, Info, MediaType, OpenApiDocument, Operation, Parameter, PathItem,
    Provenance, RequestBody, ResponseObject, SchemaObject, SecurityRequirement, SecurityScheme,
    Server, ServerVariable, Tag, TagGroup,
};

/// Serialize a document as newline-terminated pretty JSON.
pub fn to_json_pretty(document: &OpenApiDocument) -> Result<String, serde_json::Error> {
    let mut payload = serde_json::to_string_pretty(document)?;
    payload.push('\n');
    Ok(payload)
}

/// Serialize a document as newline-terminated YAML.
pub fn to_yaml(document: &OpenApiDocument) -> Result<String, serde_yaml_ng::Error> {
    let mut payload = serde_yaml_ng::to_string(document)?;
    if !payload.ends_with('\n') {
        payload.push('\n');
    }
    Ok(payload)
}