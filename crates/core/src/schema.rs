//! Classified schema nodes.
//!
//! A raw [`Schema`] is duck-typed: what it means depends on which fields are
//! present. [`SchemaNode::classify`] settles that once, in a fixed priority
//! order, so the resolver can dispatch with a single exhaustive `match`:
//!
//! 1. a non-empty `enum` constraint
//! 2. `$ref`
//! 3. a `schema` wrapper (parameters and responses), unwrapped in place
//! 4. `type: array`
//! 5. `type: object`
//! 6. everything else is a primitive

use tracing::debug;

use crate::spec::{AdditionalProperties, EnumValue, Schema};

/// One unit of type information, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Pointer to a named type elsewhere in the document.
    Reference {
        /// Path-like identifier, e.g. `#/definitions/Pet`.
        path: String,
    },
    /// Scalar or otherwise unstructured type.
    Primitive(Primitive),
    /// List of items.
    Array {
        /// Item node; `None` when the item schema has neither `type` nor `$ref`.
        items: Option<Box<SchemaNode>>,
    },
    /// Opaque object or string-keyed map.
    Object {
        /// Map value node; `None` for an opaque object.
        additional: Option<Box<SchemaNode>>,
    },
    /// Value constrained to a fixed literal set.
    Enum(EnumNode),
}

/// Primitive classification of a declared `type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    Integer,
    Number,
    String {
        /// Format qualifier such as `date` or `uuid`.
        format: Option<String>,
    },
    Boolean,
    /// Any other declared type token, passed through as-is.
    Other(String),
    /// No `type` at all.
    Untyped,
}

/// How the literals of an enum are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    /// Quoted literals. Used when the type is `string`, absent, or not numeric/boolean.
    String,
    /// Bare numeric literals.
    Number,
    /// Bare `true` / `false`.
    Boolean,
}

/// An enum-constrained node.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumNode {
    pub kind: EnumKind,
    /// Ordered, non-empty literal list.
    pub literals: Vec<EnumValue>,
    /// The primitive the enum constrains, used for documentation types.
    pub primitive: Primitive,
}

impl Primitive {
    /// Classify a declared type token and its optional format.
    pub fn from_type(schema_type: Option<&str>, format: Option<&str>) -> Self {
        match schema_type {
            Some("integer") => Self::Integer,
            Some("number") => Self::Number,
            Some("string") => Self::String {
                format: format.map(str::to_string),
            },
            Some("boolean") => Self::Boolean,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Untyped,
        }
    }

    /// Whether this is a string carrying a `date` or `date-time` format.
    pub fn is_date(&self) -> bool {
        matches!(self, Self::String { format: Some(f) } if f == "date" || f == "date-time")
    }
}

impl EnumKind {
    /// Rendering kind implied by the constrained primitive.
    pub fn of(primitive: &Primitive) -> Self {
        match primitive {
            Primitive::Integer | Primitive::Number => Self::Number,
            Primitive::Boolean => Self::Boolean,
            Primitive::String { .. } | Primitive::Other(_) | Primitive::Untyped => Self::String,
        }
    }

    /// Whether literals of this kind are written with quotes.
    pub fn is_quoted(self) -> bool {
        matches!(self, Self::String)
    }
}

impl SchemaNode {
    /// Classify a raw schema, recursively.
    pub fn classify(schema: &Schema) -> Self {
        if let Some(literals) = schema.enum_values.as_ref().filter(|v| !v.is_empty()) {
            let primitive = Primitive::from_type(schema.primary_type(), schema.format.as_deref());
            return Self::Enum(EnumNode {
                kind: EnumKind::of(&primitive),
                literals: literals.clone(),
                primitive,
            });
        }

        if let Some(path) = &schema.ref_path {
            return Self::Reference { path: path.clone() };
        }

        if let Some(inner) = &schema.schema {
            return Self::classify(inner);
        }

        match schema.primary_type() {
            Some("array") => Self::Array {
                items: classify_items(schema.items.as_deref()),
            },
            Some("object") => Self::Object {
                additional: classify_additional(schema.additional_properties.as_ref()),
            },
            other => Self::Primitive(Primitive::from_type(other, schema.format.as_deref())),
        }
    }

    /// Classify an optional site, e.g. a response that may lack a schema.
    pub fn classify_opt(schema: Option<&Schema>) -> Option<Self> {
        schema.map(Self::classify)
    }
}

fn classify_items(items: Option<&Schema>) -> Option<Box<SchemaNode>> {
    match items {
        Some(items) if items.is_specified() => Some(Box::new(SchemaNode::classify(items))),
        Some(_) => {
            debug!("Array items declare neither type nor $ref, falling back to Object[].");
            None
        }
        None => {
            debug!("Array schema has no items, falling back to Object[].");
            None
        }
    }
}

fn classify_additional(additional: Option<&AdditionalProperties>) -> Option<Box<SchemaNode>> {
    match additional {
        Some(AdditionalProperties::Schema(value)) => Some(Box::new(SchemaNode::classify(value))),
        Some(AdditionalProperties::Bool(true)) => {
            Some(Box::new(SchemaNode::Primitive(Primitive::Untyped)))
        }
        Some(AdditionalProperties::Bool(false)) | None => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn classify(json: &str) -> SchemaNode {
        let schema: Schema = serde_json::from_str(json).expect("valid schema");
        SchemaNode::classify(&schema)
    }

    #[test]
    fn test_enum_takes_precedence() {
        let node = classify(r##"{ "type": "string", "enum": ["a"], "$ref": "#/definitions/X" }"##);
        let SchemaNode::Enum(e) = &node else {
            panic!("expected enum, got {node:?}");
        };
        assert_eq!(e.kind, EnumKind::String);
        assert_eq!(e.primitive, Primitive::String { format: None });
    }

    #[test]
    fn test_enum_kind_follows_type() {
        for (json, kind) in [
            (r#"{ "enum": ["a"] }"#, EnumKind::String),
            (r#"{ "type": "integer", "enum": [1] }"#, EnumKind::Number),
            (r#"{ "type": "number", "enum": [1.5] }"#, EnumKind::Number),
            (r#"{ "type": "boolean", "enum": [true] }"#, EnumKind::Boolean),
        ] {
            match classify(json) {
                SchemaNode::Enum(e) => assert_eq!(e.kind, kind, "{json}"),
                other => panic!("expected enum for {json}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_enum_is_ignored() {
        assert_eq!(
            classify(r#"{ "type": "string", "enum": [] }"#),
            SchemaNode::Primitive(Primitive::String { format: None })
        );
    }

    #[test]
    fn test_schema_wrapper_is_unwrapped() {
        assert_eq!(
            classify(r##"{ "name": "body", "schema": { "$ref": "#/definitions/Pet" } }"##),
            SchemaNode::Reference {
                path: "#/definitions/Pet".into()
            }
        );
    }

    #[test]
    fn test_array_items() {
        assert_eq!(
            classify(r#"{ "type": "array", "items": { "type": "boolean" } }"#),
            SchemaNode::Array {
                items: Some(Box::new(SchemaNode::Primitive(Primitive::Boolean)))
            }
        );
        assert_eq!(
            classify(r#"{ "type": "array", "items": { "enum": ["x"] } }"#),
            SchemaNode::Array { items: None }
        );
        assert_eq!(
            classify(r#"{ "type": "array" }"#),
            SchemaNode::Array { items: None }
        );
    }

    #[test]
    fn test_object_variants() {
        assert_eq!(
            classify(r#"{ "type": "object" }"#),
            SchemaNode::Object { additional: None }
        );
        assert_eq!(
            classify(r#"{ "type": "object", "additionalProperties": false }"#),
            SchemaNode::Object { additional: None }
        );
        assert_eq!(
            classify(r#"{ "type": "object", "additionalProperties": true }"#),
            SchemaNode::Object {
                additional: Some(Box::new(SchemaNode::Primitive(Primitive::Untyped)))
            }
        );
        assert_eq!(
            classify(r#"{ "additionalProperties": { "type": "integer" } }"#),
            SchemaNode::Primitive(Primitive::Untyped)
        );
    }

    #[test]
    fn test_primitives() {
        assert_eq!(classify("{}"), SchemaNode::Primitive(Primitive::Untyped));
        assert_eq!(
            classify(r#"{ "type": "file" }"#),
            SchemaNode::Primitive(Primitive::Other("file".into()))
        );
        let SchemaNode::Primitive(date) = classify(r#"{ "type": "string", "format": "date" }"#)
        else {
            panic!("expected primitive");
        };
        assert!(date.is_date());
        assert!(!Primitive::String { format: Some("uuid".into()) }.is_date());
    }
}
