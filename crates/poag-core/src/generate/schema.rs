use indexmap::IndexMap;

use crate::ir::{AdditionalProperties, SchemaNode};
use crate::openapi::{BoolOrSchema, SchemaObject};

/// Convert a canonical schema node into the target OpenAPI schema dialect.
pub fn to_schema_object(node: &SchemaNode) -> SchemaObject {
    let mut result = SchemaObject::default();

    // `any` is the vendor's untyped marker; OpenAPI expresses it as the
    // absence of a type keyword.
    if let Some(schema_type) = &node.schema_type {
        if schema_type != "any" {
            result.schema_type = Some(schema_type.clone());
        }
    }

    result.description = join_description(&[
        node.description.as_deref(),
        node.verbose_description.as_deref(),
    ]);

    result.enum_values = node.enum_values.clone();

    if node.default_value.is_some() {
        result.default_value = coerce_default(node);
    }

    if let Some(properties) = &node.properties {
        let mut converted: IndexMap<String, SchemaObject> = IndexMap::new();
        let mut required = Vec::new();

        for (name, property) in properties {
            converted.insert(name.clone(), to_schema_object(property));
            if !property.is_optional() {
                required.push(name.clone());
            }
        }

        result.properties = converted;
        result.required = required;
    }

    if let Some(items) = &node.items {
        result.items = Some(Box::new(to_schema_object(items)));
    }

    result.additional_properties = node.additional_properties.as_ref().map(|extra| match extra {
        AdditionalProperties::Bool(value) => BoolOrSchema::Bool(*value),
        AdditionalProperties::Schema(schema) => {
            BoolOrSchema::Schema(Box::new(to_schema_object(schema)))
        }
    });

    if let Some(constraints) = &node.constraints {
        result.minimum = constraints.minimum;
        result.maximum = constraints.maximum;
        result.min_length = constraints.min_length;
        result.max_length = constraints.max_length;
        result.pattern = constraints.pattern.clone();
        result.format = constraints.format.clone();
        result.format_description = constraints.format_description.clone();
        result.requires = constraints
            .requires
            .clone()
            .filter(|requires| !requires.is_empty());
    }

    result.typetext = node.typetext.clone();
    result.optional = node.optional;
    result.metadata = node.metadata.clone();

    result
}

/// Boolean-typed numeric defaults coerce to booleans (0 → false, nonzero →
/// true); everything else passes through unchanged.
pub fn coerce_default(node: &SchemaNode) -> Option<serde_json::Value> {
    let default_value = node.default_value.as_ref()?;

    if node.schema_type.as_deref() == Some("boolean") {
        if let Some(number) = default_value.as_f64() {
            return Some(serde_json::Value::Bool(number != 0.0));
        }
    }

    Some(default_value.clone())
}

/// Join description parts with a blank line, skipping blank entries.
pub fn join_description(parts: &[Option<&str>]) -> Option<String> {
    let joined: Vec<&str> = parts
        .iter()
        .flatten()
        .copied()
        .filter(|part| !part.trim().is_empty())
        .collect();

    if joined.is_empty() {
        None
    } else {
        Some(joined.join("\n\n"))
    }
}
