use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ir::{FeatureFlags, HttpMethod, PermissionSet, SourceMetadata, Summary};

/// An OpenAPI 3.1 document as emitted by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    pub openapi: String,

    pub info: Info,

    pub servers: Vec<Server>,

    pub tags: Vec<Tag>,

    #[serde(rename = "x-tagGroups")]
    pub tag_groups: Vec<TagGroup>,

    pub paths: IndexMap<String, PathItem>,

    pub components: Components,

    #[serde(rename = "x-proxmox")]
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, ServerVariable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerVariable {
    pub default: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "x-displayName")]
    pub display_name: String,
}

/// One cluster of tags in the `x-tagGroups` navigation extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagGroup {
    pub name: String,

    pub tags: Vec<String>,
}

/// Operations for one path, keyed by lower-case verb. Field order is the
/// serialization order of the verbs within a path item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Insert an operation at its verb slot. `Unknown` verbs have no slot
    /// and are rejected by the generator before this point.
    pub fn insert(&mut self, method: HttpMethod, operation: Operation) {
        match method {
            HttpMethod::Delete => self.delete = Some(operation),
            HttpMethod::Get => self.get = Some(operation),
            HttpMethod::Head => self.head = Some(operation),
            HttpMethod::Options => self.options = Some(operation),
            HttpMethod::Patch => self.patch = Some(operation),
            HttpMethod::Post => self.post = Some(operation),
            HttpMethod::Put => self.put = Some(operation),
            HttpMethod::Trace => self.trace = Some(operation),
            HttpMethod::Unknown => {}
        }
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        [
            self.delete.as_ref(),
            self.get.as_ref(),
            self.head.as_ref(),
            self.options.as_ref(),
            self.patch.as_ref(),
            self.post.as_ref(),
            self.put.as_ref(),
            self.trace.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}

pub type SecurityRequirement = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,

    pub responses: IndexMap<String, ResponseObject>,

    /// Always serialized; an empty list marks a public operation.
    pub security: Vec<SecurityRequirement>,

    #[serde(rename = "x-proxmox-endpoint-id")]
    pub endpoint_id: String,

    #[serde(rename = "x-proxmox-features")]
    pub features: FeatureFlags,

    #[serde(rename = "x-proxmox-status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(
        rename = "x-proxmox-permissions",
        skip_serializing_if = "Option::is_none"
    )]
    pub permissions: Option<PermissionSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: String,

    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub schema: SchemaObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub required: bool,

    pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: SchemaObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseObject {
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(rename = "securitySchemes")]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,

    #[serde(rename = "in")]
    pub location: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// IR provenance carried on the document as the `x-proxmox` extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    #[serde(rename = "irVersion")]
    pub ir_version: String,

    #[serde(rename = "normalizedAt")]
    pub normalized_at: String,

    pub source: SourceMetadata,

    pub summary: Summary,
}

/// A target-dialect schema object, extensions included.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaObject {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaObject>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaObject>>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<BoolOrSchema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(
        rename = "x-proxmox-format-description",
        skip_serializing_if = "Option::is_none"
    )]
    pub format_description: Option<String>,

    #[serde(rename = "x-proxmox-requires", skip_serializing_if = "Option::is_none")]
    pub requires: Option<Vec<String>>,

    #[serde(rename = "x-proxmox-typetext", skip_serializing_if = "Option::is_none")]
    pub typetext: Option<String>,

    #[serde(rename = "x-proxmox-optional", skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,

    #[serde(rename = "x-proxmox-metadata", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<crate::ir::SchemaMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoolOrSchema {
    Bool(bool),
    Schema(Box<SchemaObject>),
}
