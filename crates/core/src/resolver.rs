//! Schema-to-type resolution.
//!
//! [`TypeResolver::resolve`] turns a classified [`SchemaNode`] into a
//! TypeScript type expression. It is total over well-formed input: every
//! underspecified node degrades to a generic fallback (`Object`, `Object[]`,
//! `any`). The only side effect is registering synthesized enums in the
//! borrowed [`EnumRegistry`].
//!
//! [`doc_type`] walks the same dispatch with coarser, documentation-oriented
//! names and no side effects.

use std::collections::BTreeSet;
use tracing::debug;

use crate::error::ResolveError;
use crate::naming::ref_type_name;
use crate::registry::{EnumDeclaration, EnumRegistry};
use crate::schema::{EnumNode, Primitive, SchemaNode};
use crate::spec::Schema;

/// Generic object type, used for absent and opaque object schemas.
pub const OBJECT_TYPE: &str = "Object";
/// Fallback for arrays whose items cannot be resolved.
pub const OBJECT_ARRAY_TYPE: &str = "Object[]";
/// Fallback for schemas without a declared type.
pub const ANY_TYPE: &str = "any";
/// Suffix appended to an item type to form an array type.
pub const ARRAY_SUFFIX: &str = "[]";

/// Default namespace for referenced types outside the types module.
pub const DEFAULT_TYPES_NAMESPACE: &str = "api";
/// Default namespace for synthesized enums outside the types module.
pub const DEFAULT_ENUM_NAMESPACE: &str = "enums";
/// Default nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Rendering context of a resolution call.
///
/// The mode only decides how type and enum names are prefixed; it never
/// changes which branch a node takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode {
    /// Names are qualified: `api.Pet`, `enums.REDGREEN`.
    #[default]
    Default,
    /// Names are bare, for code emitted inside the types module itself.
    TypesModule,
}

/// Namespaces and limits used while resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    pub types_namespace: String,
    pub enum_namespace: String,
    /// Deepest nesting level resolved before giving up.
    pub max_depth: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            types_namespace: DEFAULT_TYPES_NAMESPACE.to_string(),
            enum_namespace: DEFAULT_ENUM_NAMESPACE.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Resolves schema sites against one run's enum registry.
#[derive(Debug)]
pub struct TypeResolver<'a> {
    registry: &'a mut EnumRegistry,
    options: &'a ResolverOptions,
    referenced_enums: BTreeSet<String>,
    referenced_types: BTreeSet<String>,
}

impl<'a> TypeResolver<'a> {
    /// Create a resolver writing synthesized enums into `registry`.
    pub fn new(registry: &'a mut EnumRegistry, options: &'a ResolverOptions) -> Self {
        Self {
            registry,
            options,
            referenced_enums: BTreeSet::new(),
            referenced_types: BTreeSet::new(),
        }
    }

    /// Resolve one site to a type expression.
    ///
    /// `None` stands for an absent schema and resolves to `Object`.
    pub fn resolve(
        &mut self,
        node: Option<&SchemaNode>,
        mode: ResolutionMode,
    ) -> Result<String, ResolveError> {
        self.resolve_at(node, mode, 0)
    }

    /// Classify a raw schema and resolve it.
    pub fn resolve_schema(
        &mut self,
        schema: Option<&Schema>,
        mode: ResolutionMode,
    ) -> Result<String, ResolveError> {
        let node = SchemaNode::classify_opt(schema);
        self.resolve(node.as_ref(), mode)
    }

    /// Enum names handed out since the last call, sorted.
    ///
    /// A module that refers to enums by bare name imports exactly these.
    pub fn take_referenced_enums(&mut self) -> BTreeSet<String> {
        std::mem::take(&mut self.referenced_enums)
    }

    /// Referenced type names handed out since the last call, sorted.
    pub fn take_referenced_types(&mut self) -> BTreeSet<String> {
        std::mem::take(&mut self.referenced_types)
    }

    fn resolve_at(
        &mut self,
        node: Option<&SchemaNode>,
        mode: ResolutionMode,
        depth: usize,
    ) -> Result<String, ResolveError> {
        if depth > self.options.max_depth {
            return Err(ResolveError::DepthExceeded {
                depth,
                limit: self.options.max_depth,
            });
        }

        let Some(node) = node else {
            return Ok(OBJECT_TYPE.to_string());
        };

        match node {
            SchemaNode::Enum(node) => self.resolve_enum(node, mode),
            SchemaNode::Reference { path } => {
                let name = ref_type_name(path);
                self.referenced_types.insert(name.to_string());
                Ok(qualify(&self.options.types_namespace, name, mode))
            }
            SchemaNode::Array { items: Some(items) } => {
                let item = self.resolve_at(Some(items.as_ref()), mode, depth + 1)?;
                Ok(format!("{item}{ARRAY_SUFFIX}"))
            }
            SchemaNode::Array { items: None } => Ok(OBJECT_ARRAY_TYPE.to_string()),
            SchemaNode::Object {
                additional: Some(value),
            } => {
                let value = self.resolve_at(Some(value.as_ref()), mode, depth + 1)?;
                Ok(format!("{{[key: string]: {value}}}"))
            }
            SchemaNode::Object { additional: None } => Ok(OBJECT_TYPE.to_string()),
            SchemaNode::Primitive(primitive) => Ok(primitive_type(primitive).to_string()),
        }
    }

    fn resolve_enum(&mut self, node: &EnumNode, mode: ResolutionMode) -> Result<String, ResolveError> {
        let declaration = EnumDeclaration::from_node(node);
        let name = declaration.name.clone();

        if self.registry.lookup(&name).is_none() {
            debug!(enum_name = %name, literals = node.literals.len(), "Registering enum.");
        }
        self.registry.insert(declaration)?;

        let qualified = qualify(&self.options.enum_namespace, &name, mode);
        self.referenced_enums.insert(name);
        Ok(qualified)
    }
}

fn qualify(namespace: &str, name: &str, mode: ResolutionMode) -> String {
    match mode {
        ResolutionMode::TypesModule => name.to_string(),
        ResolutionMode::Default if namespace.is_empty() => name.to_string(),
        ResolutionMode::Default => format!("{namespace}.{name}"),
    }
}

fn primitive_type(primitive: &Primitive) -> &str {
    match primitive {
        Primitive::Integer | Primitive::Number => "Number",
        Primitive::String { .. } if primitive.is_date() => "Date",
        Primitive::String { .. } => "String",
        Primitive::Boolean => "Boolean",
        Primitive::Other(token) => token.as_str(),
        Primitive::Untyped => ANY_TYPE,
    }
}

/// Documentation type of a site, for `@param {...}` style annotations.
///
/// Enums document as their underlying primitive and references point into
/// `module:types`.
pub fn doc_type(node: Option<&SchemaNode>) -> String {
    let Some(node) = node else {
        return OBJECT_TYPE.to_string();
    };

    match node {
        SchemaNode::Reference { path } => format!("module:types.{}", ref_type_name(path)),
        SchemaNode::Array { items: Some(items) } => {
            format!("{}{ARRAY_SUFFIX}", doc_type(Some(items.as_ref())))
        }
        SchemaNode::Array { items: None } => "object[]".to_string(),
        SchemaNode::Object { .. } => "object".to_string(),
        SchemaNode::Enum(node) => primitive_doc_type(&node.primitive).to_string(),
        SchemaNode::Primitive(primitive) => primitive_doc_type(primitive).to_string(),
    }
}

fn primitive_doc_type(primitive: &Primitive) -> &str {
    match primitive {
        Primitive::Integer => "Number",
        Primitive::Number => "number",
        Primitive::String { .. } if primitive.is_date() => "Date",
        Primitive::String { .. } => "String",
        Primitive::Boolean => "boolean",
        Primitive::Other(token) => token.as_str(),
        Primitive::Untyped => "object",
    }
}
