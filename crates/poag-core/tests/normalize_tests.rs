use poag_core::ir::{
    AdditionalProperties, Group, HttpMethod, IR_VERSION, NormalizedDocument, PermissionSet,
};
use poag_core::normalize::{NormalizeOptions, normalize, snapshot_checksum};
use poag_core::snapshot;

const SAMPLE: &str = include_str!("fixtures/sample-snapshot.json");

fn sample_document() -> NormalizedDocument {
    let snapshot = snapshot::from_json(SAMPLE).unwrap();
    normalize(&snapshot, &NormalizeOptions::default())
}

fn walk_groups(groups: &[Group]) -> (u64, u64) {
    let mut group_count = 0;
    let mut method_count = 0;
    for group in groups {
        group_count += 1;
        method_count += group.endpoints.len() as u64;
        let (child_groups, child_methods) = walk_groups(&group.children);
        group_count += child_groups;
        method_count += child_methods;
    }
    (group_count, method_count)
}

#[test]
fn counts_match_raw_stats_and_tree_walk() {
    let snapshot = snapshot::from_json(SAMPLE).unwrap();
    let document = normalize(&snapshot, &NormalizeOptions::default());

    assert_eq!(
        document.summary.endpoint_count,
        snapshot.stats.endpoint_count
    );

    let (group_count, method_count) = walk_groups(&document.groups);
    assert_eq!(document.summary.group_count, group_count);
    assert_eq!(document.summary.method_count, method_count);

    // The raw endpoint count and the normalized method total measure the
    // same thing and must agree.
    assert_eq!(document.summary.method_count, document.summary.endpoint_count);
}

#[test]
fn operation_ids_are_derived_and_unique() {
    let document = sample_document();

    let mut ids = Vec::new();
    let mut stack: Vec<&Group> = document.groups.iter().collect();
    while let Some(group) = stack.pop() {
        for endpoint in &group.endpoints {
            ids.push(endpoint.operation_id.clone());
        }
        stack.extend(group.children.iter());
    }

    ids.sort();
    assert_eq!(ids, ["get-access", "post-nodes-node-storage"]);

    let mut deduped = ids.clone();
    deduped.dedup();
    assert_eq!(ids, deduped);
}

#[test]
fn groups_carry_slugs_and_labels() {
    let document = sample_document();

    let access = &document.groups[0];
    assert_eq!(access.slug, "access");
    assert_eq!(access.id, access.slug);
    assert_eq!(access.label, "Access");
    assert_eq!(access.children[0].slug, "access-ticket");

    let storage = &document.groups[1].children[0];
    assert_eq!(storage.slug, "nodes-node-storage");
    assert_eq!(storage.path, "/nodes/{node}/storage");
}

#[test]
fn security_blocks_are_normalized() {
    let document = sample_document();

    let get_access = &document.groups[0].endpoints[0];
    assert!(get_access.security.allow_token);
    assert!(!get_access.security.requires_authentication);
    match get_access.security.permissions.as_ref().unwrap() {
        PermissionSet::All(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].user.as_deref(), Some("all"));
            assert_eq!(entries[0].description.as_deref(), Some("Global access"));
        }
        PermissionSet::Any(_) => panic!("single raw permission must become an all set"),
    }

    let create_storage = &document.groups[1].children[0].endpoints[0];
    assert!(!create_storage.security.allow_token);
    assert!(create_storage.security.requires_authentication);
    match create_storage.security.permissions.as_ref().unwrap() {
        PermissionSet::Any(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].user.as_deref(), Some("root@pam"));
        }
        PermissionSet::All(_) => panic!("raw permission array must become an any set"),
    }
}

#[test]
fn request_schemas_convert_recursively() {
    let document = sample_document();

    let request = document.groups[0].endpoints[0].request.as_ref().unwrap();
    assert_eq!(request.description.as_deref(), Some("Optional filters"));
    assert_eq!(
        request.schema.additional_properties,
        Some(AdditionalProperties::Bool(false))
    );

    let properties = request.schema.properties.as_ref().unwrap();
    assert_eq!(
        properties["realm"].schema_type.as_deref(),
        Some("string")
    );

    let storage_request = document.groups[1].children[0].endpoints[0]
        .request
        .as_ref()
        .unwrap();
    let storage_properties = storage_request.schema.properties.as_ref().unwrap();
    assert_eq!(storage_properties["shared"].optional, Some(true));
    assert_eq!(
        storage_properties["shared"].default_value,
        Some(serde_json::json!(0))
    );
    assert_eq!(
        storage_properties["content"]
            .constraints
            .as_ref()
            .unwrap()
            .requires,
        Some(vec!["storage".to_string()])
    );
    assert_eq!(
        storage_properties["nodes"]
            .constraints
            .as_ref()
            .unwrap()
            .format_description
            .as_deref(),
        Some("node list")
    );
}

#[test]
fn responses_keep_description_and_schema() {
    let document = sample_document();

    let responses = &document.groups[0].endpoints[0].responses;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].description.as_deref(), Some("Access entries"));

    let schema = responses[0].schema.as_ref().unwrap();
    assert_eq!(schema.schema_type.as_deref(), Some("array"));

    let items = schema.items.as_ref().unwrap();
    assert!(items.properties.as_ref().unwrap().contains_key("roleid"));
    assert!(items.metadata.as_ref().unwrap().links.is_some());
}

#[test]
fn unrecognized_verbs_become_unknown() {
    let payload = serde_json::json!({
        "scrapedAt": "2025-09-30T00:00:00.000Z",
        "sourceUrl": "https://pve.example",
        "stats": { "rootGroupCount": 1, "endpointCount": 1 },
        "schema": [
            {
                "path": "/odd",
                "text": "Odd",
                "methods": [ { "httpMethod": "PURGE" } ],
                "children": []
            }
        ]
    });
    let snapshot = snapshot::from_json(&payload.to_string()).unwrap();
    let document = normalize(&snapshot, &NormalizeOptions::default());

    let endpoint = &document.groups[0].endpoints[0];
    assert_eq!(endpoint.http_method, HttpMethod::Unknown);
    assert_eq!(endpoint.operation_id, "unknown-odd");
    assert!(endpoint.request.is_none());
    assert!(endpoint.responses.is_empty());
    assert!(endpoint.security.permissions.is_none());
}

#[test]
fn pinned_metadata_is_reused() {
    let snapshot = snapshot::from_json(SAMPLE).unwrap();
    let options = NormalizeOptions {
        normalized_at: Some("2025-10-30T00:00:00.000Z".to_string()),
        checksum: Some("feedface".to_string()),
    };
    let document = normalize(&snapshot, &options);

    assert_eq!(document.normalized_at, "2025-10-30T00:00:00.000Z");
    assert_eq!(document.source.snapshot_checksum, "feedface");
    assert_eq!(document.ir_version, IR_VERSION);
}

#[test]
fn checksum_is_deterministic() {
    let snapshot = snapshot::from_json(SAMPLE).unwrap();

    let first = snapshot_checksum(&snapshot);
    let second = snapshot_checksum(&snapshot);
    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));

    let mut changed = snapshot.clone();
    changed.source_url = "https://other.example".to_string();
    assert_ne!(snapshot_checksum(&changed), first);

    let fresh = normalize(&snapshot, &NormalizeOptions::default());
    assert_eq!(fresh.source.snapshot_checksum, first);
}

#[test]
fn document_round_trips_through_json() {
    let document = sample_document();
    let payload = serde_json::to_string_pretty(&document).unwrap();
    let parsed: NormalizedDocument = serde_json::from_str(&payload).unwrap();
    assert_eq!(parsed, document);
}
