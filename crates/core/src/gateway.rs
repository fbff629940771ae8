//! Runtime spec view: the gateway fields of a document, as a JS object literal.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::{ClientOptions, Language};
use crate::error::GenerateError;
use crate::format::Format;
use crate::spec::ApiDocument;

/// Path of the spec view, relative to the output directory.
pub fn spec_view_path(language: Language) -> String {
    format!("gateway/spec.{}", language.extension())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpecView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<&'a str>,
    schemes: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    base_path: Option<&'a str>,
    content_types: &'a [String],
    accepts: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    security_definitions: Option<&'a serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,
}

impl<'a> SpecView<'a> {
    fn new(document: &'a ApiDocument, options: &'a ClientOptions) -> Self {
        Self {
            host: options.host.as_deref().or(document.host.as_deref()),
            schemes: options.schemes.as_deref().unwrap_or(&document.schemes),
            base_path: document.base_path.as_deref(),
            content_types: &document.consumes,
            accepts: &document.produces,
            security_definitions: document.security(),
            timeout: options.timeout,
        }
    }
}

/// Render `gateway/spec.<lang>` for a document.
pub fn render_spec_view(
    document: &ApiDocument,
    options: &ClientOptions,
) -> Result<String, GenerateError> {
    let format = options.format();
    let st = format.st();
    let view = object_literal(&SpecView::new(document, options), &format)?;

    let mut out = String::new();
    if options.language == Language::Ts {
        out.push_str("/// <reference path=\"../types.ts\"/>\n");
    }
    out.push_str("// Auto-generated, edits will be overwritten\n");
    match options.language {
        Language::Ts => {
            let ty = match options.types_namespace.as_str() {
                "" => "OpenApiSpec".to_string(),
                namespace => format!("{namespace}.OpenApiSpec"),
            };
            out.push_str(&format!("let spec: {ty} = {view}{st}\n"));
        }
        Language::Js => out.push_str(&format!("let spec = {view}{st}\n")),
    }
    if let Some(source) = &options.get_authorization {
        out.push_str(&format!("spec.getAuthorization = {source}{st}\n"));
    }
    if let Some(source) = &options.apply_authorization {
        out.push_str(&format!("spec.applyAuthorization = {source}{st}\n"));
    }
    out.push_str(&format!("export default spec{st}\n"));
    Ok(out)
}

/// Pretty-print `value` as JSON indented by the format unit, then switch to
/// single-quoted strings.
fn object_literal<T: Serialize>(value: &T, format: &Format) -> Result<String, GenerateError> {
    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(format.sp().as_bytes()));
    value.serialize(&mut serializer)?;
    let json = String::from_utf8_lossy(&buf);
    Ok(json.replace('\'', "\\'").replace('"', "'"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::format::Indent;

    fn document() -> ApiDocument {
        ApiDocument::from_json(
            r#"{
  "swagger": "2.0",
  "host": "petstore.swagger.io",
  "basePath": "/v2",
  "schemes": ["http"],
  "consumes": ["application/json"],
  "produces": ["application/json"],
  "securityDefinitions": { "api_key": { "type": "apiKey", "name": "api_key", "in": "header" } }
}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_ts_spec_view() {
        let out = render_spec_view(&document(), &ClientOptions::default()).unwrap();
        assert_eq!(
            out,
            "/// <reference path=\"../types.ts\"/>
// Auto-generated, edits will be overwritten
let spec: api.OpenApiSpec = {
  'host': 'petstore.swagger.io',
  'schemes': [
    'http'
  ],
  'basePath': '/v2',
  'contentTypes': [
    'application/json'
  ],
  'accepts': [
    'application/json'
  ],
  'securityDefinitions': {
    'api_key': {
      'type': 'apiKey',
      'name': 'api_key',
      'in': 'header'
    }
  }
}
export default spec
"
        );
    }

    #[test]
    fn test_options_override_document() {
        let options = ClientOptions {
            language: Language::Js,
            indent: Indent::Tab,
            semicolon: true,
            host: Some("localhost:8080".to_string()),
            schemes: Some(vec!["https".to_string()]),
            timeout: Some(3000),
            get_authorization: Some("function () { return 'x' }".to_string()),
            ..ClientOptions::default()
        };
        let out = render_spec_view(&document(), &options).unwrap();

        assert!(out.starts_with("// Auto-generated"));
        assert!(out.contains("let spec = {\n\t'host': 'localhost:8080',"));
        assert!(out.contains("\t'schemes': [\n\t\t'https'\n\t],"));
        assert!(out.contains("\t'timeout': 3000\n};"));
        assert!(out.contains("spec.getAuthorization = function () { return 'x' };"));
        assert!(!out.contains("applyAuthorization"));
        assert!(out.ends_with("export default spec;\n"));
    }

    #[test]
    fn test_quotes_in_values_are_escaped() {
        let mut doc = document();
        doc.base_path = Some("/it's".to_string());
        let out = render_spec_view(&doc, &ClientOptions::default()).unwrap();
        assert!(out.contains(r"'basePath': '/it\'s',"));
    }

    #[test]
    fn test_empty_namespace_leaves_spec_type_bare() {
        let options = ClientOptions {
            types_namespace: String::new(),
            ..ClientOptions::default()
        };
        let out = render_spec_view(&document(), &options).unwrap();
        assert!(out.contains("\nlet spec: OpenApiSpec = {\n"));
    }

    #[test]
    fn test_path() {
        assert_eq!(spec_view_path(Language::Js), "gateway/spec.js");
    }
}
