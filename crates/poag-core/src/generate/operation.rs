use std::collections::HashSet;

use indexmap::IndexMap;

use super::schema::{join_description, to_schema_object};
use super::tags::TagInfo;
use crate::ir::{Endpoint, HttpMethod, Response, SchemaNode};
use crate::openapi::{
    MediaType, Operation, Parameter, RequestBody, ResponseObject, SecurityRequirement,
};

pub const COOKIE_SCHEME: &str = "PVEAuthCookie";
pub const TOKEN_SCHEME: &str = "PVEAPIToken";

const JSON_MEDIA_TYPE: &str = "application/json";

/// Assemble the OpenAPI operation for one IR endpoint.
pub fn to_operation(endpoint: &Endpoint, tag: &TagInfo) -> Operation {
    let (parameters, request_body) = split_request(endpoint);

    Operation {
        operation_id: endpoint.operation_id.clone(),
        summary: endpoint.name.clone(),
        description: endpoint.description.clone(),
        tags: vec![tag.name.clone()],
        parameters,
        request_body,
        responses: convert_responses(&endpoint.responses),
        security: convert_security(endpoint),
        endpoint_id: endpoint.id.clone(),
        features: endpoint.features,
        status: endpoint.status.clone(),
        permissions: endpoint.security.permissions.clone(),
    }
}

/// Public operations get an empty requirement list; authenticated ones get
/// the cookie scheme, plus the token scheme when tokens are allowed.
fn convert_security(endpoint: &Endpoint) -> Vec<SecurityRequirement> {
    if !endpoint.security.requires_authentication {
        return Vec::new();
    }

    let mut requirements = vec![requirement(COOKIE_SCHEME)];
    if endpoint.security.allow_token {
        requirements.push(requirement(TOKEN_SCHEME));
    }
    requirements
}

fn requirement(scheme: &str) -> SecurityRequirement {
    let mut entry = SecurityRequirement::new();
    entry.insert(scheme.to_string(), Vec::new());
    entry
}

/// Classify the request descriptor into parameters and a residual body.
///
/// Properties matching a `{name}` placeholder become required path
/// parameters. For GET/DELETE every other property becomes a query
/// parameter; for all other verbs the remainder stays in the request body.
fn split_request(endpoint: &Endpoint) -> (Vec<Parameter>, Option<RequestBody>) {
    let path_params = path_param_names(&endpoint.path);
    let method = endpoint.http_method;
    let query_verbs = matches!(method, HttpMethod::Get | HttpMethod::Delete);

    let mut parameters = Vec::new();

    let residual = endpoint.request.as_ref().map(|request| {
        let mut schema = request.schema.clone();

        if let Some(properties) = schema.properties.take() {
            let mut retained = IndexMap::new();

            for (name, property) in properties {
                if path_params.contains(&name) {
                    parameters.push(to_parameter(&name, &property, "path"));
                } else if query_verbs {
                    parameters.push(to_parameter(&name, &property, "query"));
                } else {
                    retained.insert(name, property);
                }
            }

            if !retained.is_empty() {
                schema.properties = Some(retained);
            }
        }

        schema
    });

    let request_body = residual.and_then(|schema| build_request_body(&schema, method));

    (parameters, request_body)
}

fn build_request_body(schema: &SchemaNode, method: HttpMethod) -> Option<RequestBody> {
    if matches!(method, HttpMethod::Get | HttpMethod::Delete) {
        return None;
    }
    if !schema_has_content(schema) {
        return None;
    }

    let required = match &schema.properties {
        Some(properties) => properties.values().any(|property| !property.is_optional()),
        // A scalar/non-object body is required unless marked optional.
        None => !schema.is_optional(),
    };

    let mut content = IndexMap::new();
    content.insert(
        JSON_MEDIA_TYPE.to_string(),
        MediaType {
            schema: to_schema_object(schema),
        },
    );

    Some(RequestBody { required, content })
}

/// A residual schema carries content when it still describes anything a
/// request body could transport.
fn schema_has_content(schema: &SchemaNode) -> bool {
    if let Some(schema_type) = &schema.schema_type {
        if schema_type != "object" && schema_type != "any" {
            return true;
        }
    }

    if schema
        .enum_values
        .as_ref()
        .is_some_and(|values| !values.is_empty())
    {
        return true;
    }

    if schema.items.is_some() {
        return true;
    }

    if schema
        .properties
        .as_ref()
        .is_some_and(|properties| !properties.is_empty())
    {
        return true;
    }

    match &schema.additional_properties {
        Some(crate::ir::AdditionalProperties::Bool(true)) => true,
        Some(crate::ir::AdditionalProperties::Schema(_)) => true,
        _ => false,
    }
}

fn to_parameter(name: &str, schema: &SchemaNode, location: &str) -> Parameter {
    Parameter {
        name: name.to_string(),
        location: location.to_string(),
        required: location == "path" || !schema.is_optional(),
        description: join_description(&[
            schema.description.as_deref(),
            schema.verbose_description.as_deref(),
        ]),
        schema: to_schema_object(schema),
    }
}

/// The first IR response maps to `200`, any further ones to `default`.
/// No responses at all yield a generic `200`.
fn convert_responses(responses: &[Response]) -> IndexMap<String, ResponseObject> {
    let mut result = IndexMap::new();

    if responses.is_empty() {
        result.insert(
            "200".to_string(),
            ResponseObject {
                description: "Successful response".to_string(),
                content: None,
            },
        );
        return result;
    }

    for (index, response) in responses.iter().enumerate() {
        let status = if index == 0 { "200" } else { "default" };
        let description = response
            .description
            .clone()
            .unwrap_or_else(|| "Successful response".to_string());

        let content = response.schema.as_ref().map(|schema| {
            let mut media = IndexMap::new();
            media.insert(
                JSON_MEDIA_TYPE.to_string(),
                MediaType {
                    schema: to_schema_object(schema),
                },
            );
            media
        });

        result.insert(status.to_string(), ResponseObject {
            description,
            content,
        });
    }

    result
}

/// Collect the `{name}` placeholders of a URL template.
fn path_param_names(path: &str) -> HashSet<String> {
    let mut names = HashSet::new();
    let mut rest = path;

    while let Some(start) = rest.find('{') {
        let Some(end) = rest[start + 1..].find('}') else {
            break;
        };
        names.insert(rest[start + 1..start + 1 + end].to_string());
        rest = &rest[start + 1 + end + 1..];
    }

    names
}
