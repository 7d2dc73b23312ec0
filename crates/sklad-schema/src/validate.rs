// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;
use std::fmt::{Display, Formatter};

use crate::node::SchemaNode;

/// First schema violation encountered while walking a document.
/// Rendered as one human-readable diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub expected: String,
    pub actual: String,
}

impl Violation {
    fn new(path: &str, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: expected {}, found {}",
            self.path, self.expected, self.actual
        )
    }
}

impl std::error::Error for Violation {}

impl SchemaNode {
    /// Validates `value` against this schema tree. Pure; short-circuits
    /// on the first violation.
    pub fn validate(&self, value: &Value) -> Result<(), Violation> {
        self.validate_at(value, "$")
    }

    fn validate_at(&self, value: &Value, path: &str) -> Result<(), Violation> {
        match self {
            Self::Any => Ok(()),
            Self::Integer => {
                // JSON has one number type; `integer` must still reject
                // fractional values such as 1.4.
                if value.as_i64().is_some() || value.as_u64().is_some() {
                    Ok(())
                } else {
                    Err(Violation::new(path, "integer", describe(value)))
                }
            }
            Self::Number => {
                if value.is_number() {
                    Ok(())
                } else {
                    Err(Violation::new(path, "number", describe(value)))
                }
            }
            Self::String => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(Violation::new(path, "string", describe(value)))
                }
            }
            Self::Boolean => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(Violation::new(path, "boolean", describe(value)))
                }
            }
            Self::Null => {
                if value.is_null() {
                    Ok(())
                } else {
                    Err(Violation::new(path, "null", describe(value)))
                }
            }
            Self::Object {
                required,
                properties,
                additional_properties,
            } => {
                let Some(map) = value.as_object() else {
                    return Err(Violation::new(path, "object", describe(value)));
                };
                for key in required {
                    if !map.contains_key(key) {
                        return Err(Violation::new(
                            path,
                            format!("required property \"{key}\""),
                            "nothing",
                        ));
                    }
                }
                if !additional_properties {
                    for key in map.keys() {
                        if !properties.contains_key(key) {
                            return Err(Violation::new(
                                path,
                                "declared properties only",
                                format!("unexpected property \"{key}\""),
                            ));
                        }
                    }
                }
                for (key, schema) in properties {
                    if let Some(child) = map.get(key) {
                        schema.validate_at(child, &format!("{path}.{key}"))?;
                    }
                }
                Ok(())
            }
            Self::Array { items } => {
                let Some(elements) = value.as_array() else {
                    return Err(Violation::new(path, "array", describe(value)));
                };
                if let Some(items) = items {
                    for (index, element) in elements.iter().enumerate() {
                        items.validate_at(element, &format!("{path}[{index}]"))?;
                    }
                }
                Ok(())
            }
            Self::AnyOf(branches) => {
                let mut last = None;
                for branch in branches {
                    match branch.validate_at(value, path) {
                        Ok(()) => return Ok(()),
                        Err(violation) => last = Some(violation),
                    }
                }
                // Non-empty by construction, see SchemaNode::from_value.
                Err(last.unwrap_or_else(|| Violation::new(path, "anyOf branch", describe(value))))
            }
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(n) => format!("number {n}"),
        Value::String(_) => "string".to_string(),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}
