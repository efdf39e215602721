use indexmap::IndexMap;

use crate::ir::{AdditionalProperties, Constraints, SchemaMetadata, SchemaNode};
use crate::snapshot::{RawAdditionalProperties, RawSchema};

/// Convert a loosely-typed vendor schema into a canonical node.
///
/// Returns `None` when the input is absent or carries no detail at all, so
/// absence stays first-class downstream. Recursion depth is bounded only by
/// the input's own nesting.
pub fn normalize_schema(raw: Option<&RawSchema>) -> Option<SchemaNode> {
    let raw = raw?;
    let node = normalize_node(raw);
    if node.is_empty() { None } else { Some(node) }
}

/// Total conversion of one vendor node. Property-map entries use this
/// directly so a property with no detail stays present as an empty node.
fn normalize_node(raw: &RawSchema) -> SchemaNode {
    let properties = if raw.properties.is_empty() {
        None
    } else {
        let converted: IndexMap<String, SchemaNode> = raw
            .properties
            .iter()
            .map(|(name, child)| (name.clone(), normalize_node(child)))
            .collect();
        Some(converted)
    };

    let items = raw.items.as_deref().map(normalize_node).and_then(|node| {
        if node.is_empty() {
            None
        } else {
            Some(Box::new(node))
        }
    });

    SchemaNode {
        schema_type: raw.schema_type.clone(),
        typetext: raw.typetext.clone(),
        description: raw.description.clone(),
        verbose_description: raw.verbose_description.clone(),
        optional: raw.optional.map(|flag| flag.as_bool()),
        default_value: raw.default_value.clone(),
        enum_values: raw.enum_values.clone(),
        constraints: extract_constraints(raw),
        properties,
        items,
        additional_properties: raw
            .additional_properties
            .as_ref()
            .and_then(normalize_additional_properties),
        metadata: extract_metadata(raw),
    }
}

/// Numeric 0/1 values normalize to booleans; nested schemas convert
/// recursively and collapse to absent when empty.
fn normalize_additional_properties(
    raw: &RawAdditionalProperties,
) -> Option<AdditionalProperties> {
    match raw {
        RawAdditionalProperties::Bool(value) => Some(AdditionalProperties::Bool(*value)),
        RawAdditionalProperties::Number(value) => Some(AdditionalProperties::Bool(*value != 0)),
        RawAdditionalProperties::Schema(schema) => {
            let node = normalize_node(schema);
            if node.is_empty() {
                None
            } else {
                Some(AdditionalProperties::Schema(Box::new(node)))
            }
        }
    }
}

fn extract_constraints(raw: &RawSchema) -> Option<Constraints> {
    let constraints = Constraints {
        minimum: raw.minimum,
        maximum: raw.maximum,
        min_length: raw.min_length,
        max_length: raw.max_length,
        pattern: raw.pattern.clone(),
        format: raw.format.clone(),
        format_description: raw.format_description.clone(),
        requires: raw.requires.as_ref().map(|requires| requires.to_vec()),
    };

    if constraints.is_empty() {
        None
    } else {
        Some(constraints)
    }
}

fn extract_metadata(raw: &RawSchema) -> Option<SchemaMetadata> {
    let metadata = SchemaMetadata {
        title: raw.title.clone(),
        renderer: raw.renderer.clone(),
        alias: raw.alias.clone(),
        subdir: raw.subdir.clone(),
        default_key: raw.default_key.clone(),
        disallow: raw.disallow.clone(),
        extends: raw.extends.clone(),
        links: raw.links.clone(),
        instance_types: raw.instance_types.clone(),
    };

    if metadata.is_empty() { None } else { Some(metadata) }
}
