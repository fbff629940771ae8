//! Swagger 2.0 document structs for serde deserialization.
//!
//! Only the subset the generator reads is modelled: definitions, paths with
//! their operations, parameters and responses, and the gateway fields that end
//! up in the runtime spec view.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::GenerateError;

/// Root Swagger document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocument {
    /// Declared Swagger version (`"2.0"`).
    pub swagger: Option<String>,
    /// Default host for requests.
    pub host: Option<String>,
    /// Base path prepended to every operation path.
    pub base_path: Option<String>,
    /// Transfer protocols (`http`, `https`, ...).
    #[serde(default)]
    pub schemes: Vec<String>,
    /// MIME types the API consumes.
    #[serde(default)]
    pub consumes: Vec<String>,
    /// MIME types the API produces.
    #[serde(default)]
    pub produces: Vec<String>,
    /// Operations keyed by path template.
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    /// Named schema definitions, the targets of `#/definitions/...` references.
    #[serde(default)]
    pub definitions: BTreeMap<String, Schema>,
    /// Security scheme definitions, passed through to the spec view untouched.
    pub security_definitions: Option<serde_json::Value>,
    /// OpenAPI 3 components, read only for `securitySchemes`.
    pub components: Option<Components>,
}

/// OpenAPI 3 components section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    /// Security schemes, used when `securityDefinitions` is absent.
    pub security_schemes: Option<serde_json::Value>,
}

/// A path item containing operations for different HTTP methods.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    /// Path-level parameters shared by all operations.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// Operations in emission order, paired with their lowercase method name.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("get", self.get.as_ref()),
            ("put", self.put.as_ref()),
            ("post", self.post.as_ref()),
            ("delete", self.delete.as_ref()),
            ("options", self.options.as_ref()),
            ("head", self.head.as_ref()),
            ("patch", self.patch.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
}

/// A parameter (query, path, header, formData or body).
///
/// Non-body parameters carry their type inline; body parameters wrap it in
/// `schema`. Both shapes land in the flattened [`Schema`].
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    pub description: Option<String>,
    #[serde(flatten)]
    pub schema: Schema,
}

/// A response definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    pub description: Option<String>,
    pub schema: Option<Schema>,
}

/// Schema object as found in definitions, parameters and responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Reference to another schema.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// The type of the schema (string, number, integer, boolean, object, array).
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Format hint (e.g., date, date-time, int64).
    pub format: Option<String>,

    /// Item schema for array types.
    pub items: Option<Box<Schema>>,

    /// Value schema for string-keyed maps.
    pub additional_properties: Option<AdditionalProperties>,

    /// Enum values (can be strings, integers, floats, booleans, or null).
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<EnumValue>>,

    /// Wrapped body schema (parameters and responses).
    pub schema: Option<Box<Schema>>,

    /// Properties for object types.
    #[serde(default)]
    pub properties: BTreeMap<String, Schema>,

    /// Required property names for object types.
    #[serde(default)]
    pub required: Vec<String>,

    pub description: Option<String>,
}

/// Enum value can be string, integer, float, boolean, or null.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// Schema type can be a single type or an array of types (for nullable).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

impl ApiDocument {
    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GenerateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a document from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, GenerateError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a document from disk, picking the parser by file extension.
    pub fn from_path(path: &Path) -> Result<Self, GenerateError> {
        let contents = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&contents),
            _ => Self::from_json(&contents),
        }
    }

    /// Security definitions, falling back to OpenAPI 3 `components.securitySchemes`.
    pub fn security(&self) -> Option<&serde_json::Value> {
        self.security_definitions.as_ref().or_else(|| {
            self.components
                .as_ref()
                .and_then(|c| c.security_schemes.as_ref())
        })
    }
}

impl Schema {
    /// The first non-null declared type, if any.
    pub fn primary_type(&self) -> Option<&str> {
        match &self.schema_type {
            Some(SchemaType::Single(t)) => Some(t.as_str()),
            Some(SchemaType::Multiple(types)) => types
                .iter()
                .map(String::as_str)
                .find(|t| *t != "null"),
            None => None,
        }
    }

    /// Whether an array item schema says enough to resolve: a type or a `$ref`.
    pub fn is_specified(&self) -> bool {
        self.schema_type.is_some() || self.ref_path.is_some()
    }
}
