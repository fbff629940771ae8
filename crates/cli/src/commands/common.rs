//! Value types shared across commands

use clap::ValueEnum;
use swagen_core::{Indent, Language};

/// Target language of generated files
#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
#[value(rename_all = "lower")]
pub enum LanguageArg {
    /// TypeScript declarations
    Ts,
    /// JavaScript with JSDoc comments
    Js,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Ts => Language::Ts,
            LanguageArg::Js => Language::Js,
        }
    }
}

/// Indentation unit of generated files
#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
#[value(rename_all = "lower")]
pub enum IndentArg {
    /// Two spaces
    #[value(name = "2")]
    Two,
    /// Four spaces
    #[value(name = "4")]
    Four,
    /// A tab character
    Tab,
    /// Two spaces
    Spaces,
}

impl From<IndentArg> for Indent {
    fn from(arg: IndentArg) -> Self {
        match arg {
            IndentArg::Two | IndentArg::Spaces => Indent::Two,
            IndentArg::Four => Indent::Four,
            IndentArg::Tab => Indent::Tab,
        }
    }
}
