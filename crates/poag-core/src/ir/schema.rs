use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Canonical recursive schema node shared by requests and responses.
///
/// Absence is first-class: a node with no populated field is represented as
/// `None` by the converter, never as an empty object. The one exception is a
/// property-map entry, which stays present even when empty so that "the
/// property exists" and "the property has constraints" remain distinct.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaNode {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub typetext: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "verboseDescription", skip_serializing_if = "Option::is_none")]
    pub verbose_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,

    #[serde(rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SchemaMetadata>,
}

impl SchemaNode {
    /// True when no field is populated.
    pub fn is_empty(&self) -> bool {
        self == &SchemaNode::default()
    }

    /// True when the node is marked optional.
    pub fn is_optional(&self) -> bool {
        self.optional.unwrap_or(false)
    }
}

/// `additionalProperties` is either a permission boolean or a nested node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaNode>),
}

/// Numeric and string constraints carried alongside a node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Constraints {
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

    #[serde(rename = "formatDescription", skip_serializing_if = "Option::is_none")]
    pub format_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<Vec<String>>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        self == &Constraints::default()
    }
}

/// Vendor presentation metadata. A closed set of known keys rather than an
/// open dictionary so downstream consumers stay testable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdir: Option<String>,

    #[serde(rename = "defaultKey", skip_serializing_if = "Option::is_none")]
    pub default_key: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallow: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<serde_json::Value>,

    #[serde(rename = "instanceTypes", skip_serializing_if = "Option::is_none")]
    pub instance_types: Option<serde_json::Value>,
}

impl SchemaMetadata {
    pub fn is_empty(&self) -> bool {
        self == &SchemaMetadata::default()
    }
}
