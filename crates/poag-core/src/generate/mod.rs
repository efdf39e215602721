pub mod operation;
pub mod schema;
pub mod tags;

use indexmap::IndexMap;

use crate::ir::{Endpoint, Group, HttpMethod, NormalizedDocument};
use crate::openapi::{
    Components, Info, OpenApiDocument, PathItem, Provenance, SecurityScheme, Server,
    ServerVariable,
};
use operation::{COOKIE_SCHEME, TOKEN_SCHEME, to_operation};
use tags::{TagInfo, TagRegistry, derive_tag};

const OPENAPI_VERSION: &str = "3.1.0";

const DEFAULT_TITLE: &str = "Proxmox VE API";

const DEFAULT_SERVER_URL: &str = "https://{host}:{port}/api2/json";

/// Options controlling document generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Overrides the default templated server URL.
    pub server_url: Option<String>,
}

struct EndpointContext<'a> {
    endpoint: &'a Endpoint,
    tag: TagInfo,
}

/// Project a normalized document into a fresh OpenAPI 3.1 document.
pub fn generate(ir: &NormalizedDocument, options: &GenerateOptions) -> OpenApiDocument {
    let mut contexts = collect_contexts(&ir.groups);

    // Deterministic output: operations sort by (path, verb).
    contexts.sort_by(|a, b| {
        a.endpoint
            .path
            .cmp(&b.endpoint.path)
            .then_with(|| a.endpoint.http_method.as_str().cmp(b.endpoint.http_method.as_str()))
    });

    let mut registry = TagRegistry::default();
    let mut paths: IndexMap<String, PathItem> = IndexMap::new();

    for context in contexts {
        if context.endpoint.http_method == HttpMethod::Unknown {
            log::warn!(
                "skipping endpoint {} with unrecognized HTTP method",
                context.endpoint.operation_id
            );
            continue;
        }

        registry.register(&context.tag);

        let item = paths.entry(context.endpoint.path.clone()).or_default();
        item.insert(
            context.endpoint.http_method,
            to_operation(context.endpoint, &context.tag),
        );
    }

    let (tags, tag_groups) = registry.into_parts();

    OpenApiDocument {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title: ir
                .source
                .document_title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            version: ir.source.scraped_at.clone(),
            description: Some(top_level_description(ir)),
        },
        servers: vec![default_server(options.server_url.as_deref())],
        tags,
        tag_groups,
        paths,
        components: Components {
            security_schemes: security_schemes(),
        },
        provenance: Provenance {
            ir_version: ir.ir_version.clone(),
            normalized_at: ir.normalized_at.clone(),
            source: ir.source.clone(),
            summary: ir.summary,
        },
    }
}

fn collect_contexts(groups: &[Group]) -> Vec<EndpointContext<'_>> {
    let mut contexts = Vec::new();
    collect_into(groups, &mut contexts);
    contexts
}

fn collect_into<'a>(groups: &'a [Group], out: &mut Vec<EndpointContext<'a>>) {
    for group in groups {
        for endpoint in &group.endpoints {
            out.push(EndpointContext {
                endpoint,
                tag: derive_tag(&endpoint.path),
            });
        }
        collect_into(&group.children, out);
    }
}

fn default_server(override_url: Option<&str>) -> Server {
    let mut variables = IndexMap::new();
    variables.insert(
        "host".to_string(),
        ServerVariable {
            default: "localhost".to_string(),
        },
    );
    variables.insert(
        "port".to_string(),
        ServerVariable {
            default: "8006".to_string(),
        },
    );

    Server {
        url: override_url.unwrap_or(DEFAULT_SERVER_URL).to_string(),
        description: Some("Proxmox VE API base URL".to_string()),
        variables,
    }
}

fn security_schemes() -> IndexMap<String, SecurityScheme> {
    let mut schemes = IndexMap::new();
    schemes.insert(
        COOKIE_SCHEME.to_string(),
        SecurityScheme {
            scheme_type: "apiKey".to_string(),
            location: "cookie".to_string(),
            name: COOKIE_SCHEME.to_string(),
            description: Some(
                "Proxmox VE authentication cookie. Obtained via the access ticket endpoint."
                    .to_string(),
            ),
        },
    );
    schemes.insert(
        TOKEN_SCHEME.to_string(),
        SecurityScheme {
            scheme_type: "apiKey".to_string(),
            location: "header".to_string(),
            name: "Authorization".to_string(),
            description: Some(
                "API token authentication using the `Authorization: PVEAPIToken=TOKEN` header."
                    .to_string(),
            ),
        },
    );
    schemes
}

fn top_level_description(ir: &NormalizedDocument) -> String {
    [
        "Generated from the normalized Proxmox VE API intermediate representation.".to_string(),
        format!("Source: {}", ir.source.source_url),
        format!("Scraped at: {}", ir.source.scraped_at),
        format!("Normalized at: {}", ir.normalized_at),
        format!("Operations: {}", ir.summary.method_count),
    ]
    .join("\n")
}
