//! placeholder syntax
//!
//! A [VariableSyntax] turns a variable name into the text that stands in for it (`${name}`) and recognizes such text
//! when reading. Recognition is anchored to the whole string: `"hello ${name}"` is a plain string.
//!
//! Variable names consist of ASCII letters, digits, `_` and `-`. There is no escaping; a literal string that matches
//! the active grammar is read back as a variable.
use crate::document::Variable;
use regex::Regex;
use std::sync::LazyLock;

/// Formats and recognizes placeholder text
pub trait VariableSyntax: std::fmt::Debug + Send + Sync {
    /// Placeholder text for `name`
    fn format(&self, name: &str) -> String;

    /// Returns the named variable if `text` is a placeholder, `None` if it is a plain string
    fn parse(&self, text: &str) -> Option<Variable>;
}

static DOLLAR_BRACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\{([a-zA-Z0-9_-]+)\}$").expect("valid regex"));

static DOLLAR_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$([a-zA-Z0-9_-]+)$").expect("valid regex"));

static DOLLAR_OPTIONAL_BRACES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$(\{([a-zA-Z0-9_-]+)\}|([a-zA-Z0-9_-]+))$").expect("valid regex")
});

/// `${name}`, the default
#[derive(Debug, Default, Clone, Copy)]
pub struct DollarBraces;

impl VariableSyntax for DollarBraces {
    fn format(&self, name: &str) -> String {
        format!("${{{name}}}")
    }

    fn parse(&self, text: &str) -> Option<Variable> {
        let captures = DOLLAR_BRACES.captures(text)?;
        Some(Variable::Named(captures[1].to_string()))
    }
}

/// `$name`
#[derive(Debug, Default, Clone, Copy)]
pub struct DollarOnly;

impl VariableSyntax for DollarOnly {
    fn format(&self, name: &str) -> String {
        format!("${name}")
    }

    fn parse(&self, text: &str) -> Option<Variable> {
        let captures = DOLLAR_ONLY.captures(text)?;
        Some(Variable::Named(captures[1].to_string()))
    }
}

/// Reads both `${name}` and `$name`, always writes `${name}`
#[derive(Debug, Default, Clone, Copy)]
pub struct DollarOptionalBraces;

impl VariableSyntax for DollarOptionalBraces {
    fn format(&self, name: &str) -> String {
        DollarBraces.format(name)
    }

    fn parse(&self, text: &str) -> Option<Variable> {
        let captures = DOLLAR_OPTIONAL_BRACES.captures(text)?;
        let name = captures.get(2).or_else(|| captures.get(3))?;
        Some(Variable::Named(name.as_str().to_string()))
    }
}
