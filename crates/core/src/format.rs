//! Output formatting options: indentation unit and statement terminator.

use serde::Deserialize;

/// Prefix of a continuation line inside a `/** ... */` doc comment.
pub const DOC: &str = " * ";

/// Indentation unit of generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RawIndent")]
pub enum Indent {
    #[default]
    Two,
    Four,
    Tab,
}

/// Accepts `indent = 4`, `indent = "4"` and `indent = "tab"` alike.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndent {
    Number(i64),
    Text(String),
}

impl From<RawIndent> for Indent {
    fn from(raw: RawIndent) -> Self {
        match raw {
            RawIndent::Number(n) => Self::parse(&n.to_string()),
            RawIndent::Text(s) => Self::parse(&s),
        }
    }
}

impl Indent {
    /// Parse an indentation setting. Unknown values fall back to two spaces.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "4" => Self::Four,
            "tab" | "\t" => Self::Tab,
            _ => Self::Two,
        }
    }

    /// The whitespace of one indentation level.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Two => "  ",
            Self::Four => "    ",
            Self::Tab => "\t",
        }
    }
}

/// Formatting settings shared by every emitted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Format {
    pub indent: Indent,
    pub semicolon: bool,
}

impl Format {
    pub fn new(indent: Indent, semicolon: bool) -> Self {
        Self { indent, semicolon }
    }

    /// One indentation level.
    pub fn sp(self) -> &'static str {
        self.indent.unit()
    }

    /// Statement terminator.
    pub fn st(self) -> &'static str {
        if self.semicolon { ";" } else { "" }
    }

    /// Re-indent a free-form description for a doc comment body.
    ///
    /// Continuation lines get the ` * ` prefix plus one indentation level, so
    /// the text lines up under the first line of a `/** ... */` block.
    pub fn doc_description(self, text: &str) -> String {
        text.trim()
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join(&format!("\n{DOC}{}", self.sp()))
    }
}
