use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A raw API documentation snapshot as produced by the external scraper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(rename = "scrapedAt")]
    pub scraped_at: String,

    #[serde(rename = "sourceUrl")]
    pub source_url: String,

    #[serde(rename = "documentTitle", skip_serializing_if = "Option::is_none")]
    pub document_title: Option<String>,

    pub stats: RawStats,

    pub schema: Vec<RawTreeNode>,
}

/// Counters recorded by the scraper while walking the viewer tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStats {
    #[serde(rename = "rootGroupCount")]
    pub root_group_count: u64,

    #[serde(rename = "endpointCount")]
    pub endpoint_count: u64,
}

/// One node of the scraped documentation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTreeNode {
    pub path: String,

    /// Display label shown in the API viewer.
    pub text: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<RawMethod>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawTreeNode>,
}

/// One HTTP method observed at a tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMethod {
    #[serde(rename = "httpMethod")]
    pub http_method: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "allowToken", skip_serializing_if = "Option::is_none")]
    pub allow_token: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<RawPermissions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<RawSchema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<RawSchema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// The permission descriptor is a single object ("all of") or an array
/// ("any of").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPermissions {
    Any(Vec<RawPermission>),
    One(RawPermission),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPermission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<serde_json::Value>,
}

impl RawPermission {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.user.is_none() && self.check.is_none()
    }
}

/// A loosely-typed vendor schema node. Parameters, returns, nested
/// properties, and array items all share this shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSchema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub typetext: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose_description: Option<String>,

    /// The vendor records this as 0/1 in most places and a boolean in a few.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<BoolOrNumber>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,

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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<StringOrList>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, RawSchema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<RawSchema>>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<RawAdditionalProperties>,

    // Vendor metadata keys carried through to the IR metadata bag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdir: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_key: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallow: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<serde_json::Value>,

    #[serde(rename = "instance-types", skip_serializing_if = "Option::is_none")]
    pub instance_types: Option<serde_json::Value>,
}

/// `additionalProperties` arrives as a boolean, a vendor 0/1 numeric, or a
/// nested schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAdditionalProperties {
    Bool(bool),
    Number(i64),
    Schema(Box<RawSchema>),
}

/// A flag the vendor serializes as either a boolean or a 0/1 numeric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoolOrNumber {
    Bool(bool),
    Number(i64),
}

impl BoolOrNumber {
    pub fn as_bool(self) -> bool {
        match self {
            BoolOrNumber::Bool(value) => value,
            BoolOrNumber::Number(value) => value != 0,
        }
    }
}

/// `requires` is a single property name or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            StringOrList::One(value) => vec![value.clone()],
            StringOrList::Many(values) => values.clone(),
        }
    }
}
