// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError(pub String);

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SchemaError {}

/// A schema description decoded into a tagged tree. The validator walks
/// this tree instead of hard-coding field checks, so the document
/// contract can grow without touching validator logic.
///
/// Recognized keywords: `type`, `required`, `properties`,
/// `additionalProperties`, `items`, `anyOf`. Annotation keywords such as
/// `$schema`, `$id`, `title`, `description`, `default`, `examples` and
/// `additionalItems` are ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Object {
        required: Vec<String>,
        properties: BTreeMap<String, SchemaNode>,
        additional_properties: bool,
    },
    Array {
        items: Option<Box<SchemaNode>>,
    },
    AnyOf(Vec<SchemaNode>),
    Integer,
    Number,
    String,
    Boolean,
    Null,
    Any,
}

impl SchemaNode {
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let map = value
            .as_object()
            .ok_or_else(|| SchemaError("schema node must be a JSON object".to_string()))?;

        if let Some(branches) = map.get("anyOf") {
            let branches = branches
                .as_array()
                .ok_or_else(|| SchemaError("anyOf must be an array of schemas".to_string()))?;
            let decoded = branches
                .iter()
                .map(Self::from_value)
                .collect::<Result<Vec<_>, _>>()?;
            if decoded.is_empty() {
                return Err(SchemaError("anyOf must not be empty".to_string()));
            }
            return Ok(Self::AnyOf(decoded));
        }

        let Some(type_name) = map.get("type") else {
            return Ok(Self::Any);
        };
        let type_name = type_name
            .as_str()
            .ok_or_else(|| SchemaError("type must be a string".to_string()))?;

        match type_name {
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "string" => Ok(Self::String),
            "boolean" => Ok(Self::Boolean),
            "null" => Ok(Self::Null),
            "object" => Self::decode_object(map),
            "array" => Self::decode_array(map),
            other => Err(SchemaError(format!("unrecognized schema type: {other}"))),
        }
    }

    fn decode_object(map: &serde_json::Map<String, Value>) -> Result<Self, SchemaError> {
        let required = match map.get("required") {
            None => Vec::new(),
            Some(value) => value
                .as_array()
                .ok_or_else(|| SchemaError("required must be an array".to_string()))?
                .iter()
                .map(|v| {
                    v.as_str()
                        .map(ToString::to_string)
                        .ok_or_else(|| SchemaError("required entries must be strings".to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        let mut properties = BTreeMap::new();
        if let Some(value) = map.get("properties") {
            let decls = value
                .as_object()
                .ok_or_else(|| SchemaError("properties must be an object".to_string()))?;
            for (key, decl) in decls {
                properties.insert(key.clone(), Self::from_value(decl)?);
            }
        }

        let additional_properties = match map.get("additionalProperties") {
            None => true,
            Some(Value::Bool(allowed)) => *allowed,
            Some(_) => {
                return Err(SchemaError(
                    "additionalProperties must be a boolean".to_string(),
                ))
            }
        };

        Ok(Self::Object {
            required,
            properties,
            additional_properties,
        })
    }

    fn decode_array(map: &serde_json::Map<String, Value>) -> Result<Self, SchemaError> {
        let items = match map.get("items") {
            None => None,
            Some(value) => Some(Box::new(Self::from_value(value)?)),
        };
        Ok(Self::Array { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_scalar_types_and_ignores_annotations() {
        let node = SchemaNode::from_value(&json!({
            "$id": "#/properties/id",
            "type": "integer",
            "title": "The id schema",
            "default": 0,
            "examples": [123]
        }))
        .expect("scalar schema");
        assert_eq!(node, SchemaNode::Integer);
    }

    #[test]
    fn decodes_object_with_required_and_closed_properties() {
        let node = SchemaNode::from_value(&json!({
            "type": "object",
            "required": ["id", "name"],
            "additionalProperties": false,
            "properties": {
                "id": {"type": "integer"},
                "name": {"type": "string"}
            }
        }))
        .expect("object schema");

        let SchemaNode::Object {
            required,
            properties,
            additional_properties,
        } = node
        else {
            panic!("expected object node");
        };
        assert_eq!(required, vec!["id".to_string(), "name".to_string()]);
        assert_eq!(properties.len(), 2);
        assert!(!additional_properties);
    }

    #[test]
    fn decodes_array_items_with_any_of_branches() {
        let node = SchemaNode::from_value(&json!({
            "type": "array",
            "additionalItems": true,
            "items": {
                "anyOf": [
                    {"type": "object", "required": ["location"], "properties": {}}
                ]
            }
        }))
        .expect("array schema");

        let SchemaNode::Array { items: Some(items) } = node else {
            panic!("expected array node with items");
        };
        assert!(matches!(*items, SchemaNode::AnyOf(ref b) if b.len() == 1));
    }

    #[test]
    fn missing_type_decodes_to_any() {
        let node = SchemaNode::from_value(&json!({"description": "free-form"})).expect("any");
        assert_eq!(node, SchemaNode::Any);
    }

    #[test]
    fn rejects_unrecognized_type_name() {
        let err = SchemaNode::from_value(&json!({"type": "decimal"})).expect_err("unknown type");
        assert!(err.0.contains("decimal"), "unexpected error: {err}");
    }
}
