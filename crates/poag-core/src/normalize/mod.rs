pub mod schema;
pub mod slug;

use chrono::{SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::ir::{
    Endpoint, FeatureFlags, Group, HttpMethod, IR_VERSION, NormalizedDocument, Permission,
    PermissionSet, Request, Response, Security, SourceMetadata, Summary,
};
use crate::snapshot::{RawMethod, RawPermission, RawPermissions, RawSchema, RawSnapshot, RawTreeNode};
pub use schema::normalize_schema;
pub use slug::{operation_id, slug};

/// Options for pinning normalization metadata, used by the orchestrator when
/// replaying a cached snapshot.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    pub normalized_at: Option<String>,
    pub checksum: Option<String>,
}

/// Normalize a raw snapshot into the intermediate representation.
///
/// Always returns a complete document; malformed input is rejected earlier,
/// at deserialization time.
pub fn normalize(snapshot: &RawSnapshot, options: &NormalizeOptions) -> NormalizedDocument {
    let groups: Vec<Group> = snapshot.schema.iter().map(normalize_group).collect();
    let (group_count, method_count) = summarize(&groups);

    let checksum = options
        .checksum
        .clone()
        .unwrap_or_else(|| snapshot_checksum(snapshot));
    let normalized_at = options
        .normalized_at
        .clone()
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    NormalizedDocument {
        ir_version: IR_VERSION.to_string(),
        normalized_at,
        source: SourceMetadata {
            snapshot_checksum: checksum,
            scraped_at: snapshot.scraped_at.clone(),
            source_url: snapshot.source_url.clone(),
            document_title: snapshot.document_title.clone(),
            raw_stats: snapshot.stats,
        },
        summary: Summary {
            group_count,
            endpoint_count: snapshot.stats.endpoint_count,
            method_count,
        },
        groups,
    }
}

/// SHA-256 of the canonical JSON serialization of a snapshot.
pub fn snapshot_checksum(snapshot: &RawSnapshot) -> String {
    let serialized =
        serde_json::to_vec(snapshot).expect("a well-typed snapshot serializes to JSON");
    let mut hasher = Sha256::new();
    hasher.update(&serialized);
    hex_digest(hasher.finalize().as_slice())
}

fn hex_digest(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

fn normalize_group(node: &RawTreeNode) -> Group {
    let slug = slug::slug(&node.path);
    Group {
        id: slug.clone(),
        path: node.path.clone(),
        slug,
        label: node.text.clone(),
        endpoints: node
            .methods
            .iter()
            .map(|method| normalize_endpoint(&node.path, method))
            .collect(),
        children: node.children.iter().map(normalize_group).collect(),
    }
}

fn normalize_endpoint(path: &str, method: &RawMethod) -> Endpoint {
    let http_method = HttpMethod::from_raw(&method.http_method);
    let operation_id = slug::operation_id(http_method, path);

    Endpoint {
        id: operation_id.clone(),
        operation_id,
        path: path.to_string(),
        http_method,
        name: method.name.clone(),
        description: method.description.clone(),
        status: method.status.clone(),
        security: normalize_security(method),
        features: FeatureFlags {
            proxy: method.proxy.unwrap_or(false),
            download: method.download.unwrap_or(false),
            upload: method.upload.unwrap_or(false),
        },
        request: normalize_request(method.parameters.as_ref()),
        responses: normalize_responses(method.returns.as_ref()),
    }
}

fn normalize_security(method: &RawMethod) -> Security {
    Security {
        allow_token: method.allow_token.unwrap_or(false),
        requires_authentication: method.protected.unwrap_or(false),
        permissions: method.permissions.as_ref().and_then(normalize_permissions),
    }
}

/// An array of raw permissions becomes an `any` set, a single object an
/// `all` set with one entry. Empty descriptors yield an absent set.
fn normalize_permissions(permissions: &RawPermissions) -> Option<PermissionSet> {
    match permissions {
        RawPermissions::Any(entries) => {
            let any: Vec<Permission> =
                entries.iter().filter_map(normalize_permission).collect();
            if any.is_empty() {
                None
            } else {
                Some(PermissionSet::Any(any))
            }
        }
        RawPermissions::One(entry) => {
            normalize_permission(entry).map(|permission| PermissionSet::All(vec![permission]))
        }
    }
}

fn normalize_permission(permission: &RawPermission) -> Option<Permission> {
    if permission.is_empty() {
        return None;
    }
    Some(Permission {
        description: permission.description.clone(),
        user: permission.user.clone(),
        check: permission.check.clone(),
    })
}

fn normalize_request(parameters: Option<&RawSchema>) -> Option<Request> {
    let schema = normalize_schema(parameters)?;
    let description = parameters
        .and_then(|raw| raw.description.clone())
        .filter(|text| !text.trim().is_empty());
    Some(Request { description, schema })
}

fn normalize_responses(returns: Option<&RawSchema>) -> Vec<Response> {
    let schema = normalize_schema(returns);
    let description = returns
        .and_then(|raw| raw.description.clone())
        .filter(|text| !text.trim().is_empty());

    if schema.is_none() && description.is_none() {
        return Vec::new();
    }
    vec![Response {
        description,
        schema,
    }]
}

/// Count groups and endpoints by walking the just-built forest.
fn summarize(groups: &[Group]) -> (u64, u64) {
    let mut group_count = 0;
    let mut method_count = 0;

    let mut stack: Vec<&Group> = groups.iter().collect();
    while let Some(group) = stack.pop() {
        group_count += 1;
        method_count += group.endpoints.len() as u64;
        stack.extend(group.children.iter());
    }

    (group_count, method_count)
}
