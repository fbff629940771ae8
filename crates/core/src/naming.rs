//! Name derivation for referenced types, synthesized enums and identifiers.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::spec::EnumValue;

/// TypeScript reserved words that cannot be used as identifiers.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Type name of a reference: the trailing segment of its path.
///
/// `#/definitions/Widget` becomes `Widget`.
pub fn ref_type_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// Text of a single enum literal, as it appears in names and bare declarations.
///
/// `null` contributes nothing, matching how a joined literal list reads.
pub fn literal_text(value: &EnumValue) -> String {
    match value {
        EnumValue::String(s) => s.clone(),
        EnumValue::Integer(n) => n.to_string(),
        EnumValue::Float(f) => f.to_string(),
        EnumValue::Bool(b) => b.to_string(),
        EnumValue::Null => String::new(),
    }
}

/// Derive the identity of an inline enum from its literal values.
///
/// Literals are concatenated in order and every character that is not an
/// ASCII letter, digit or `_` is dropped. Identical literal sequences always
/// produce the same name; distinct sequences can collide (`["a-b"]` and
/// `["ab"]`), which the registry reports.
pub fn enum_name(literals: &[EnumValue]) -> String {
    let joined: String = literals
        .iter()
        .map(literal_text)
        .collect::<String>()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    if joined.is_empty() {
        return "_empty".to_string();
    }
    if joined.starts_with(|c: char| c.is_ascii_digit()) || TS_RESERVED_WORDS.contains(joined.as_str())
    {
        return format!("_{joined}");
    }
    joined
}

/// Check if an identifier needs quoting when used as a property key.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use inside a single-quoted JavaScript string literal.
pub fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Quote a property key if it is not a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        format!("'{}'", escape_single_quoted(name))
    } else {
        name.to_string()
    }
}

/// Sanitize an identifier to be a valid TypeScript identifier.
/// - Splits on `-`, `.`, ` `, `/`, `{`, `}`, `_` and converts to camelCase
/// - Prepends `_` if starts with digit
/// - Escapes reserved words with `_` prefix
pub fn sanitize_ts_identifier(name: &str) -> String {
    let mut result = String::new();
    for part in name
        .split(['-', '.', ' ', '/', '{', '}', '_'])
        .filter(|p| !p.is_empty())
    {
        let part: String = part
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '$')
            .collect();
        if result.is_empty() {
            result.push_str(&part);
        } else {
            result.push_str(&capitalize_first(&part));
        }
    }

    if result.is_empty() {
        return "_empty".to_string();
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result = format!("_{result}");
    }

    if TS_RESERVED_WORDS.contains(result.as_str()) {
        result = format!("_{result}");
    }

    result
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Derive an operation name from its method and path template.
///
/// `get /pets/{petId}` becomes `getPetsPetId`.
pub fn operation_name(method: &str, path: &str) -> String {
    sanitize_ts_identifier(&format!("{method} {path}"))
}
