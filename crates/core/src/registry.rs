//! Per-run registry of enum declarations synthesized from inline enum constraints.
//!
//! The registry starts empty, grows only while schema sites are resolved, is
//! read once at the end of a run to emit the enums module, and is reset before
//! the next independent run. Entries are keyed by the derived enum name and
//! kept in insertion order, so replaying a traversal reproduces the output
//! byte for byte.

use indexmap::IndexMap;
use indexmap::map::Entry;
use std::fmt;

use crate::error::ResolveError;
use crate::naming::{enum_name, escape_single_quoted, literal_text};
use crate::schema::{EnumKind, EnumNode};
use crate::spec::EnumValue;

/// A named enum declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDeclaration {
    pub name: String,
    pub kind: EnumKind,
    pub literals: Vec<EnumValue>,
}

impl EnumDeclaration {
    /// Build the declaration for an enum node, deriving its name from the literals.
    pub fn from_node(node: &EnumNode) -> Self {
        Self {
            name: enum_name(&node.literals),
            kind: node.kind,
            literals: node.literals.clone(),
        }
    }

    /// Comma-separated literal list: quoted for string enums, bare otherwise.
    /// A `null` literal stays `null` in a bare list.
    pub fn body(&self) -> String {
        self.literals
            .iter()
            .map(|v| match v {
                _ if self.kind.is_quoted() => {
                    format!("'{}'", escape_single_quoted(&literal_text(v)))
                }
                EnumValue::Null => "null".to_string(),
                _ => literal_text(v),
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Two declarations agree when they would render the same line.
    fn same_values(&self, other: &Self) -> bool {
        self.kind.is_quoted() == other.kind.is_quoted() && self.body() == other.body()
    }
}

impl fmt::Display for EnumDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "export enum {} {{ {} }}", self.name, self.body())
    }
}

/// Deduplicating store of enum declarations for one generation run.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    entries: IndexMap<String, EnumDeclaration>,
}

impl EnumRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a declaration by enum name.
    pub fn lookup(&self, name: &str) -> Option<&EnumDeclaration> {
        self.entries.get(name)
    }

    /// Register a declaration.
    ///
    /// Inserting a name that is already present with the same rendered body is
    /// a no-op and returns the existing entry. The same name with a different
    /// body is a collision: the first entry is kept and the error reports
    /// both declarations.
    pub fn insert(
        &mut self,
        declaration: EnumDeclaration,
    ) -> Result<&EnumDeclaration, ResolveError> {
        match self.entries.entry(declaration.name.clone()) {
            Entry::Occupied(existing) => {
                let existing = existing.into_mut();
                if existing.same_values(&declaration) {
                    Ok(existing)
                } else {
                    Err(ResolveError::EnumCollision {
                        name: declaration.name.clone(),
                        existing: existing.to_string(),
                        incoming: declaration.to_string(),
                    })
                }
            }
            Entry::Vacant(slot) => Ok(slot.insert(declaration)),
        }
    }

    /// Drop every entry, ready for an independent run.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Declarations in insertion order.
    pub fn declarations(&self) -> impl Iterator<Item = &EnumDeclaration> {
        self.entries.values()
    }

    /// Number of registered declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The enums module: one declaration per line, in insertion order.
    pub fn render(&self) -> String {
        self.declarations()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
