//! Generation options, loaded from `swagen.toml` and overridden from the command line.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::GenerateError;
use crate::format::{Format, Indent};
use crate::resolver::{
    DEFAULT_ENUM_NAMESPACE, DEFAULT_MAX_DEPTH, DEFAULT_TYPES_NAMESPACE, ResolverOptions,
};

/// Config file looked up in the working directory when none is given.
pub const FILE_NAME: &str = "swagen.toml";

/// Target language of the generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ts,
    Js,
}

impl Language {
    /// File extension of generated modules.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Ts => "ts",
            Self::Js => "js",
        }
    }
}

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct ClientOptions {
    pub language: Language,
    pub out_dir: PathBuf,
    pub indent: Indent,
    pub semicolon: bool,
    /// Overrides the document's `host` in the gateway spec view.
    pub host: Option<String>,
    /// Overrides the document's `schemes` in the gateway spec view.
    pub schemes: Option<Vec<String>>,
    /// Request timeout in milliseconds, passed through to the spec view.
    pub timeout: Option<u64>,
    pub types_namespace: String,
    pub enum_namespace: String,
    pub max_depth: usize,
    /// Source of a `getAuthorization` function attached to the spec view.
    pub get_authorization: Option<String>,
    /// Source of an `applyAuthorization` function attached to the spec view.
    pub apply_authorization: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            language: Language::default(),
            out_dir: PathBuf::from("generated"),
            indent: Indent::default(),
            semicolon: false,
            host: None,
            schemes: None,
            timeout: None,
            types_namespace: DEFAULT_TYPES_NAMESPACE.to_string(),
            enum_namespace: DEFAULT_ENUM_NAMESPACE.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            get_authorization: None,
            apply_authorization: None,
        }
    }
}

impl ClientOptions {
    /// Load options from a TOML file.
    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        debug!(path = %path.display(), "Loading options.");
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load options from `path` if given, else from `swagen.toml` in `dir` when
    /// it exists, else defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self, GenerateError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let candidate = dir.join(FILE_NAME);
                if candidate.is_file() {
                    Self::load(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn format(&self) -> Format {
        Format::new(self.indent, self.semicolon)
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            types_namespace: self.types_namespace.clone(),
            enum_namespace: self.enum_namespace.clone(),
            max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let options = ClientOptions::default();
        assert_eq!(options.language.extension(), "ts");
        assert_eq!(options.format().sp(), "  ");
        assert_eq!(options.format().st(), "");
        assert_eq!(options.resolver_options(), ResolverOptions::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(
            &path,
            r#"
language = "js"
out_dir = "client"
indent = "tab"
semicolon = true
schemes = ["https"]
timeout = 5000
"#,
        )
        .unwrap();

        let options = ClientOptions::load(&path).unwrap();
        assert_eq!(options.language, Language::Js);
        assert_eq!(options.out_dir, PathBuf::from("client"));
        assert_eq!(options.format().sp(), "\t");
        assert_eq!(options.format().st(), ";");
        assert_eq!(options.schemes, Some(vec!["https".to_string()]));
        assert_eq!(options.timeout, Some(5000));
        assert_eq!(options.types_namespace, "api");
        assert_eq!(options.max_depth, 64);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "redux = true\n").unwrap();

        assert!(matches!(
            ClientOptions::load(&path),
            Err(GenerateError::Config(_))
        ));
    }

    #[test]
    fn test_discover() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            ClientOptions::discover(None, dir.path()).unwrap(),
            ClientOptions::default()
        );

        fs::write(dir.path().join(FILE_NAME), "indent = 4\n").unwrap();
        let options = ClientOptions::discover(None, dir.path()).unwrap();
        assert_eq!(options.indent, Indent::Four);
    }
}
