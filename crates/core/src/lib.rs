//! Swagger document to TypeScript declaration generator.
//!
//! The centre of the crate is [`TypeResolver`]: it maps a schema site to a
//! TypeScript type expression and records every inline enum it meets in an
//! [`EnumRegistry`], which is emitted once at the end of a run.
//!
//! ```
//! use swagen_core::{EnumRegistry, ResolutionMode, ResolverOptions, Schema, TypeResolver};
//!
//! let schema: Schema = serde_json::from_str(r#"{ "type": "string", "enum": ["RED", "GREEN"] }"#)?;
//! let mut registry = EnumRegistry::new();
//! let options = ResolverOptions::default();
//! let mut resolver = TypeResolver::new(&mut registry, &options);
//!
//! assert_eq!(resolver.resolve_schema(Some(&schema), ResolutionMode::Default)?, "enums.REDGREEN");
//! assert_eq!(registry.render(), "export enum REDGREEN { 'RED','GREEN' }");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

pub mod config;
pub mod decorators;
pub mod error;
pub mod format;
pub mod gateway;
pub mod generator;
pub mod naming;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod spec;

pub use config::{ClientOptions, Language};
pub use decorators::{log_parameter, render_utils};
pub use error::{GenerateError, ResolveError};
pub use format::{Format, Indent};
pub use generator::{GeneratedFile, Generator, write_files};
pub use registry::{EnumDeclaration, EnumRegistry};
pub use resolver::{ResolutionMode, ResolverOptions, TypeResolver, doc_type};
pub use schema::{EnumKind, EnumNode, Primitive, SchemaNode};
pub use spec::{ApiDocument, Schema};
