//! Client declaration generator.
//!
//! One [`Generator::generate`] call is one run: the enum registry is reset,
//! operations are resolved, then definitions, and the registry is read once
//! at the end to emit the enums module. Definitions and paths are visited in
//! sorted order and methods in a fixed order, so the same document always
//! yields the same files.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{ClientOptions, Language};
use crate::decorators::{render_utils, utils_path};
use crate::error::GenerateError;
use crate::format::{DOC, Format};
use crate::gateway::{render_spec_view, spec_view_path};
use crate::naming::{operation_name, quote_if_needed, sanitize_ts_identifier};
use crate::registry::EnumRegistry;
use crate::resolver::{ResolutionMode, TypeResolver, doc_type};
use crate::schema::SchemaNode;
use crate::spec::{ApiDocument, Operation, Parameter, PathItem, Schema};

const HEADER: &str = "// Auto-generated, edits will be overwritten\n";

/// A file produced by a run, with a path relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }
}

/// Owns the options and enum registry of a sequence of runs.
#[derive(Debug)]
pub struct Generator {
    options: ClientOptions,
    registry: EnumRegistry,
}

impl Generator {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            options,
            registry: EnumRegistry::new(),
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Registry state left by the last run.
    pub fn registry(&self) -> &EnumRegistry {
        &self.registry
    }

    /// Generate every file for `document`.
    pub fn generate(&mut self, document: &ApiDocument) -> Result<Vec<GeneratedFile>, GenerateError> {
        self.registry.reset();

        let options = &self.options;
        let ext = options.language.extension();
        let resolver_options = options.resolver_options();

        let (operations, types) = {
            let mut resolver = TypeResolver::new(&mut self.registry, &resolver_options);
            let operations = render_operations(document, &mut resolver, options)?;
            let types = render_types(document, &mut resolver, options)?;
            (operations, types)
        };

        let mut enums = self.registry.render();
        if !enums.is_empty() {
            enums.push('\n');
        }

        info!(
            definitions = document.definitions.len(),
            paths = document.paths.len(),
            enums = self.registry.len(),
            "Generated client declarations."
        );

        Ok(vec![
            GeneratedFile::new(format!("operations.{ext}"), operations),
            GeneratedFile::new(format!("types.{ext}"), types),
            GeneratedFile::new(format!("enums.{ext}"), enums),
            GeneratedFile::new(
                spec_view_path(options.language),
                render_spec_view(document, options)?,
            ),
            GeneratedFile::new(
                utils_path(options.language),
                render_utils(options.language, options.format()),
            ),
        ])
    }

    /// Generate and write the files under the configured output directory.
    pub fn generate_to_disk(&mut self, document: &ApiDocument) -> Result<Vec<PathBuf>, GenerateError> {
        let files = self.generate(document)?;
        write_files(&self.options.out_dir, &files)
    }
}

/// Write generated files below `out_dir`, creating directories as needed.
pub fn write_files(out_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, GenerateError> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.contents)?;
        debug!(path = %path.display(), bytes = file.contents.len(), "Wrote file.");
        written.push(path);
    }
    Ok(written)
}

/// Both renderings of one schema site.
struct SiteType {
    resolved: String,
    doc: String,
}

fn site_type(
    resolver: &mut TypeResolver<'_>,
    schema: Option<&Schema>,
    mode: ResolutionMode,
    site: impl FnOnce() -> String,
) -> Result<SiteType, GenerateError> {
    let node = SchemaNode::classify_opt(schema);
    let resolved = resolver
        .resolve(node.as_ref(), mode)
        .map_err(|err| GenerateError::at(site(), err))?;
    Ok(SiteType {
        resolved,
        doc: doc_type(node.as_ref()),
    })
}

fn doc_block(indent: &str, lines: &[String]) -> String {
    let mut out = format!("{indent}/**\n");
    for line in lines {
        if line.is_empty() {
            out.push_str(&format!("{indent} *\n"));
        } else {
            out.push_str(&format!("{indent}{DOC}{}\n", line.replace("*/", "*\\/")));
        }
    }
    out.push_str(&format!("{indent} */\n"));
    out
}

fn description_lines(text: &str) -> Vec<String> {
    text.trim().lines().map(|l| l.trim().to_string()).collect()
}

// ---------------------------------------------------------------------------
// operations
// ---------------------------------------------------------------------------

fn render_operations(
    document: &ApiDocument,
    resolver: &mut TypeResolver<'_>,
    options: &ClientOptions,
) -> Result<String, GenerateError> {
    let format = options.format();
    let mut seen = HashSet::new();
    let mut body = String::new();

    for (path, item) in &document.paths {
        for (method, operation) in item.operations() {
            let name = operation_id(method, path, operation);
            if !seen.insert(name.clone()) {
                return Err(GenerateError::DuplicateOperation(name));
            }
            debug!(operation = %name, method, path = %path, "Rendering operation.");
            body.push('\n');
            body.push_str(&render_operation(&name, item, operation, resolver, options.language, format)?);
        }
    }

    let mut out = String::from(HEADER);
    if options.language == Language::Ts {
        let st = format.st();
        let types = resolver.take_referenced_types();
        let enums = resolver.take_referenced_enums();
        out.push_str(&module_import(&options.types_namespace, types, "./types", st));
        out.push_str(&module_import(&options.enum_namespace, enums, "./enums", st));
    }
    out.push_str(&body);
    Ok(out)
}

/// `import * as ns from 'module'`, or a named import of `names` when the
/// namespace is empty. Nothing is imported when no name is used.
fn module_import(namespace: &str, names: BTreeSet<String>, module: &str, st: &str) -> String {
    if names.is_empty() {
        String::new()
    } else if namespace.is_empty() {
        let names = names.into_iter().collect::<Vec<_>>().join(", ");
        format!("import {{ {names} }} from '{module}'{st}\n")
    } else {
        format!("import * as {namespace} from '{module}'{st}\n")
    }
}

fn operation_id(method: &str, path: &str, operation: &Operation) -> String {
    match &operation.operation_id {
        Some(id) => sanitize_ts_identifier(id),
        None => operation_name(method, path),
    }
}

/// Path-level parameters overridden by operation parameters with the same
/// name and location, required ones first.
fn merged_parameters<'d>(item: &'d PathItem, operation: &'d Operation) -> Vec<&'d Parameter> {
    let mut params: Vec<&Parameter> = item
        .parameters
        .iter()
        .filter(|shared| {
            !operation
                .parameters
                .iter()
                .any(|p| p.name == shared.name && p.location == shared.location)
        })
        .chain(&operation.parameters)
        .collect();
    params.sort_by_key(|p| !is_required(p));
    params
}

fn is_required(param: &Parameter) -> bool {
    param.required || param.location == "path"
}

fn render_operation(
    name: &str,
    item: &PathItem,
    operation: &Operation,
    resolver: &mut TypeResolver<'_>,
    language: Language,
    format: Format,
) -> Result<String, GenerateError> {
    let mut doc = Vec::new();
    if let Some(summary) = &operation.summary {
        doc.push(format.doc_description(summary));
    }
    if let Some(description) = &operation.description
        && operation.summary.as_ref() != Some(description)
    {
        doc.push(format.doc_description(description));
    }
    if !doc.is_empty() {
        doc.push(String::new());
    }
    if language == Language::Js {
        doc.push(format!("@callback {name}"));
    }

    let mut signature = Vec::new();
    for param in merged_parameters(item, operation) {
        let ty = site_type(resolver, Some(&param.schema), ResolutionMode::Default, || {
            format!("operation {name} parameter {}", param.name)
        })?;
        let ident = sanitize_ts_identifier(&param.name);
        let required = is_required(param);

        let doc_name = if required {
            ident.clone()
        } else {
            format!("[{ident}]")
        };
        let mut line = format!("@param {{{}}} {doc_name}", ty.doc);
        if let Some(description) = &param.description {
            line.push(' ');
            line.push_str(&format.doc_description(description));
        }
        doc.push(line);

        let optional = if required { "" } else { "?" };
        signature.push(format!("{ident}{optional}: {}", ty.resolved));
    }

    let success = operation
        .responses
        .iter()
        .find(|(code, _)| code.starts_with('2'));
    let ret = match success {
        Some((code, response)) if response.schema.is_some() => site_type(
            resolver,
            response.schema.as_ref(),
            ResolutionMode::Default,
            || format!("operation {name} response {code}"),
        )?,
        _ => SiteType {
            resolved: "void".to_string(),
            doc: "void".to_string(),
        },
    };
    let mut line = format!("@return {{Promise<{}>}}", ret.doc);
    if let Some(description) = success.and_then(|(_, r)| r.description.as_ref()) {
        line.push(' ');
        line.push_str(&format.doc_description(description));
    }
    doc.push(line);

    let mut out = doc_block("", &doc);
    if language == Language::Ts {
        out.push_str(&format!(
            "export declare function {name}({}): Promise<{}>{}\n",
            signature.join(", "),
            ret.resolved,
            format.st()
        ));
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// types
// ---------------------------------------------------------------------------

fn render_types(
    document: &ApiDocument,
    resolver: &mut TypeResolver<'_>,
    options: &ClientOptions,
) -> Result<String, GenerateError> {
    let format = options.format();
    let mut body = String::new();

    for (name, schema) in &document.definitions {
        debug!(definition = %name, "Rendering definition.");
        body.push('\n');
        let rendered = if is_interface(schema) {
            render_interface(name, schema, resolver, options.language, format)?
        } else {
            render_alias(name, schema, resolver, options.language, format)?
        };
        body.push_str(&rendered);
    }

    let mut out = String::from(HEADER);
    match options.language {
        Language::Ts => {
            out.push_str(&module_import(
                "",
                resolver.take_referenced_enums(),
                "./enums",
                format.st(),
            ));
        }
        Language::Js => out.push_str("/** @module types */\n"),
    }
    out.push_str(&body);
    Ok(out)
}

fn is_interface(schema: &Schema) -> bool {
    if schema.enum_values.is_some() || schema.ref_path.is_some() {
        return false;
    }
    !schema.properties.is_empty()
        || (schema.primary_type() == Some("object") && schema.additional_properties.is_none())
}

fn render_interface(
    name: &str,
    schema: &Schema,
    resolver: &mut TypeResolver<'_>,
    language: Language,
    format: Format,
) -> Result<String, GenerateError> {
    let sp = format.sp();
    let mut doc = schema
        .description
        .as_deref()
        .map(description_lines)
        .unwrap_or_default();
    let mut members = String::new();

    if language == Language::Js {
        if !doc.is_empty() {
            doc.push(String::new());
        }
        doc.push(format!("@typedef {{Object}} {name}"));
        doc.push("@memberof module:types".to_string());
    }

    for (prop, prop_schema) in &schema.properties {
        let ty = site_type(resolver, Some(prop_schema), ResolutionMode::TypesModule, || {
            format!("definition {name} property {prop}")
        })?;
        let required = schema.required.iter().any(|r| r == prop);

        match language {
            Language::Ts => {
                if let Some(description) = &prop_schema.description {
                    members.push_str(&doc_block(sp, &description_lines(description)));
                }
                let optional = if required { "" } else { "?" };
                members.push_str(&format!(
                    "{sp}{}{optional}: {}{}\n",
                    quote_if_needed(prop),
                    ty.resolved,
                    format.st()
                ));
            }
            Language::Js => {
                let prop_name = if required {
                    prop.clone()
                } else {
                    format!("[{prop}]")
                };
                let mut line = format!("@property {{{}}} {prop_name}", ty.doc);
                if let Some(description) = &prop_schema.description {
                    line.push(' ');
                    line.push_str(&format.doc_description(description));
                }
                doc.push(line);
            }
        }
    }

    let mut out = if doc.is_empty() {
        String::new()
    } else {
        doc_block("", &doc)
    };
    if language == Language::Ts {
        out.push_str(&format!("export interface {name} {{\n{members}}}\n"));
    }
    Ok(out)
}

fn render_alias(
    name: &str,
    schema: &Schema,
    resolver: &mut TypeResolver<'_>,
    language: Language,
    format: Format,
) -> Result<String, GenerateError> {
    let ty = site_type(resolver, Some(schema), ResolutionMode::TypesModule, || {
        format!("definition {name}")
    })?;
    let mut doc = schema
        .description
        .as_deref()
        .map(description_lines)
        .unwrap_or_default();

    match language {
        Language::Ts => {
            let mut out = if doc.is_empty() {
                String::new()
            } else {
                doc_block("", &doc)
            };
            out.push_str(&format!("export type {name} = {}{}\n", ty.resolved, format.st()));
            Ok(out)
        }
        Language::Js => {
            if !doc.is_empty() {
                doc.push(String::new());
            }
            doc.push(format!("@typedef {{{}}} {name}", ty.doc));
            doc.push("@memberof module:types".to_string());
            Ok(doc_block("", &doc))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::format::Indent;

    const DOCUMENT: &str = r##"{
  "swagger": "2.0",
  "paths": {
    "/pets/{petId}": {
      "parameters": [{ "name": "petId", "in": "path", "type": "integer" }],
      "get": {
        "operationId": "getPet",
        "summary": "Find a pet",
        "parameters": [
          { "name": "fields", "in": "query", "type": "array", "items": { "type": "string", "enum": ["name", "tag"] } }
        ],
        "responses": { "200": { "description": "The pet", "schema": { "$ref": "#/definitions/Pet" } } }
      },
      "delete": {
        "responses": { "204": { "description": "Deleted" } }
      }
    }
  },
  "definitions": {
    "Pet": {
      "type": "object",
      "description": "A pet",
      "required": ["name"],
      "properties": {
        "name": { "type": "string", "description": "Pet name" },
        "status": { "type": "string", "enum": ["available", "sold"] },
        "born-at": { "type": "string", "format": "date" }
      }
    },
    "Tags": { "type": "array", "items": { "type": "string" } }
  }
}"##;

    fn generate(options: ClientOptions) -> Vec<GeneratedFile> {
        let document = ApiDocument::from_json(DOCUMENT).unwrap();
        Generator::new(options).generate(&document).unwrap()
    }

    fn contents<'f>(files: &'f [GeneratedFile], path: &str) -> &'f str {
        files
            .iter()
            .find(|f| f.path == Path::new(path))
            .map(|f| f.contents.as_str())
            .unwrap_or_else(|| panic!("missing {path}"))
    }

    #[test]
    fn test_ts_operations() {
        let files = generate(ClientOptions::default());
        let ops = contents(&files, "operations.ts");

        assert!(ops.starts_with(HEADER));
        assert!(ops.contains("import * as api from './types'\nimport * as enums from './enums'\n"));
        assert!(ops.contains(" * @param {Number} petId\n"));
        assert!(ops.contains(" * @param {String[]} [fields]\n"));
        assert!(ops.contains(" * @return {Promise<module:types.Pet>} The pet\n"));
        assert!(ops.contains(
            "export declare function getPet(petId: Number, fields?: enums.nametag[]): Promise<api.Pet>\n"
        ));
        assert!(ops.contains(
            "export declare function deletePetsPetId(petId: Number): Promise<void>\n"
        ));
    }

    #[test]
    fn test_ts_types() {
        let files = generate(ClientOptions {
            indent: Indent::Four,
            semicolon: true,
            ..ClientOptions::default()
        });
        let types = contents(&files, "types.ts");

        assert!(types.contains("import { availablesold } from './enums';\n"));
        assert!(types.contains(
            "/**
 * A pet
 */
export interface Pet {
    'born-at'?: Date;
    /**
     * Pet name
     */
    name: String;
    status?: availablesold;
}
"
        ));
        assert!(types.contains("export type Tags = String[];\n"));
    }

    #[test]
    fn test_enums_module_in_first_use_order() {
        let files = generate(ClientOptions::default());
        assert_eq!(
            contents(&files, "enums.ts"),
            "export enum nametag { 'name','tag' }\nexport enum availablesold { 'available','sold' }\n"
        );
        assert!(contents(&files, "gateway/spec.ts").contains("let spec: api.OpenApiSpec = {"));
    }

    #[test]
    fn test_js_output_is_jsdoc() {
        let files = generate(ClientOptions {
            language: Language::Js,
            ..ClientOptions::default()
        });
        let ops = contents(&files, "operations.js");
        let types = contents(&files, "types.js");

        assert!(!ops.contains("import"));
        assert!(ops.contains(" * @callback getPet\n"));
        assert!(!ops.contains("export declare"));
        assert!(types.contains("/** @module types */\n"));
        assert!(types.contains(" * @typedef {Object} Pet\n"));
        assert!(types.contains(" * @property {String} name Pet name\n"));
        assert!(types.contains(" * @property {Date} [born-at]\n"));
        assert!(types.contains(" * @typedef {String[]} Tags\n"));
        assert!(contents(&files, "enums.js").contains("export enum availablesold"));
    }

    #[test]
    fn test_runs_are_independent_and_repeatable() {
        let document = ApiDocument::from_json(DOCUMENT).unwrap();
        let mut generator = Generator::new(ClientOptions::default());

        let first = generator.generate(&document).unwrap();
        let second = generator.generate(&document).unwrap();
        assert_eq!(first, second);
        assert_eq!(generator.registry().len(), 2);

        generator.generate(&ApiDocument::default()).unwrap();
        assert!(generator.registry().is_empty());
    }

    #[test]
    fn test_empty_namespaces_import_names() {
        let files = generate(ClientOptions {
            types_namespace: String::new(),
            enum_namespace: String::new(),
            ..ClientOptions::default()
        });
        let ops = contents(&files, "operations.ts");

        assert!(ops.contains("import { Pet } from './types'\nimport { nametag } from './enums'\n"));
        assert!(!ops.contains("import * as"));
        assert!(ops.contains(
            "export declare function getPet(petId: Number, fields?: nametag[]): Promise<Pet>\n"
        ));
        assert!(contents(&files, "gateway/spec.ts").contains("let spec: OpenApiSpec = {"));
    }

    #[test]
    fn test_unused_modules_are_not_imported() {
        let document = ApiDocument::from_json(
            r#"{ "paths": { "/ping": { "get": { "operationId": "ping", "responses": {} } } } }"#,
        )
        .unwrap();
        let files = Generator::new(ClientOptions::default())
            .generate(&document)
            .unwrap();

        assert!(!contents(&files, "operations.ts").contains("import"));
    }

    #[test]
    fn test_comment_terminators_are_escaped() {
        let document = ApiDocument::from_json(
            r#"{
  "paths": { "/a": { "get": { "operationId": "a", "summary": "ends */ here", "responses": {} } } },
  "definitions": { "B": { "type": "string", "description": "glob **/*.ts" } }
}"#,
        )
        .unwrap();
        let files = Generator::new(ClientOptions::default())
            .generate(&document)
            .unwrap();

        assert!(contents(&files, "operations.ts").contains(" * ends *\\/ here\n"));
        assert!(contents(&files, "types.ts").contains(" * glob **\\/*.ts\n"));
        assert_eq!(contents(&files, "operations.ts").matches("*/").count(), 1);
    }

    #[test]
    fn test_utils_module() {
        let files = generate(ClientOptions::default());
        let utils = contents(&files, "utils.ts");
        assert!(utils.contains("import 'reflect-metadata'\n"));
        assert!(utils.contains("export function logParameter(type: Object, isArray: boolean = false) {\n"));

        let files = generate(ClientOptions {
            language: Language::Js,
            ..ClientOptions::default()
        });
        assert!(contents(&files, "utils.js").contains("export function operations(target) {\n"));
    }

    #[test]
    fn test_duplicate_operation_id() {
        let document = ApiDocument::from_json(
            r#"{
  "paths": {
    "/a": { "get": { "operationId": "list", "responses": {} } },
    "/b": { "get": { "operationId": "list", "responses": {} } }
  }
}"#,
        )
        .unwrap();

        let err = Generator::new(ClientOptions::default())
            .generate(&document)
            .unwrap_err();
        assert!(matches!(err, GenerateError::DuplicateOperation(ref id) if id == "list"));
    }

    #[test]
    fn test_resolution_errors_carry_the_site() {
        let document = ApiDocument::from_json(
            r#"{
  "definitions": {
    "A": { "type": "object", "properties": { "x": { "enum": ["a.b"] }, "y": { "enum": ["ab"] } } }
  }
}"#,
        )
        .unwrap();

        let err = Generator::new(ClientOptions::default())
            .generate(&document)
            .unwrap_err();
        let GenerateError::Resolve { site, source } = &err else {
            panic!("expected resolve error, got {err:?}");
        };
        assert_eq!(site, "definition A property y");
        assert!(matches!(source, ResolveError::EnumCollision { .. }));
    }

    #[test]
    fn test_operation_parameter_overrides_path_parameter() {
        let document = ApiDocument::from_json(
            r#"{
  "paths": {
    "/items/{id}": {
      "parameters": [{ "name": "id", "in": "path", "type": "integer" }],
      "put": {
        "operationId": "putItem",
        "parameters": [{ "name": "id", "in": "path", "required": true, "type": "string" }],
        "responses": {}
      }
    }
  }
}"#,
        )
        .unwrap();

        let files = Generator::new(ClientOptions::default())
            .generate(&document)
            .unwrap();
        assert!(contents(&files, "operations.ts")
            .contains("export declare function putItem(id: String): Promise<void>\n"));
    }

    #[test]
    fn test_write_files_creates_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let files = generate(ClientOptions::default());

        let written = write_files(dir.path(), &files).unwrap();
        assert_eq!(written.len(), 5);
        assert!(dir.path().join("utils.ts").is_file());
        assert!(dir.path().join("gateway/spec.ts").is_file());
        assert_eq!(
            fs::read_to_string(dir.path().join("enums.ts")).unwrap(),
            contents(&files, "enums.ts")
        );
    }
}
