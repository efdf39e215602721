use serde::{Deserialize, Serialize};

use super::schema::SchemaNode;
use crate::snapshot::RawStats;

/// Version tag stamped into every normalized document.
pub const IR_VERSION: &str = "1.0.0";

/// The normalized, strictly-typed intermediate representation of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    #[serde(rename = "irVersion")]
    pub ir_version: String,

    #[serde(rename = "normalizedAt")]
    pub normalized_at: String,

    pub source: SourceMetadata,

    pub summary: Summary,

    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    #[serde(rename = "snapshotChecksum")]
    pub snapshot_checksum: String,

    #[serde(rename = "scrapedAt")]
    pub scraped_at: String,

    #[serde(rename = "sourceUrl")]
    pub source_url: String,

    #[serde(rename = "documentTitle", skip_serializing_if = "Option::is_none")]
    pub document_title: Option<String>,

    #[serde(rename = "rawStats")]
    pub raw_stats: RawStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "groupCount")]
    pub group_count: u64,

    #[serde(rename = "endpointCount")]
    pub endpoint_count: u64,

    #[serde(rename = "methodCount")]
    pub method_count: u64,
}

/// A group of endpoints derived from one node of the raw tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,

    pub path: String,

    pub slug: String,

    pub label: String,

    pub endpoints: Vec<Endpoint>,

    pub children: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,

    #[serde(rename = "operationId")]
    pub operation_id: String,

    pub path: String,

    #[serde(rename = "httpMethod")]
    pub http_method: HttpMethod,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    pub security: Security,

    pub features: FeatureFlags,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<Response>,
}

/// HTTP verbs the normalizer recognizes. Anything else becomes `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
    Unknown,
}

impl HttpMethod {
    /// Normalize a raw verb string. Unrecognized verbs map to `Unknown`
    /// rather than failing.
    pub fn from_raw(verb: &str) -> Self {
        match verb.to_ascii_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "PATCH" => HttpMethod::Patch,
            "OPTIONS" => HttpMethod::Options,
            "HEAD" => HttpMethod::Head,
            "TRACE" => HttpMethod::Trace,
            _ => HttpMethod::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Unknown => "UNKNOWN",
        }
    }

    pub fn as_lower(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Trace => "trace",
            HttpMethod::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Security {
    #[serde(rename = "allowToken")]
    pub allow_token: bool,

    #[serde(rename = "requiresAuthentication")]
    pub requires_authentication: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionSet>,
}

/// Permission alternatives: `all` entries must all hold, `any` entries are
/// alternatives of which one suffices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionSet {
    All(Vec<Permission>),
    Any(Vec<Permission>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub proxy: bool,

    pub download: bool,

    pub upload: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub schema: SchemaNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,
}
