//! Wikitext tokenizer.

pub use config::{Configuration, EntitySet};
pub use context::Context;
pub use inspectors::{Inspector, inspect};
use core::fmt::{self, Write as _};
use serde::Serialize;
pub use tokenizer::Tokenizer;

mod config;
mod context;
mod cursor;
pub mod entities;
mod inspectors;
mod stack;
#[cfg(test)]
mod tests;
mod tokenizer;

/// A tokenizer error.
///
/// Malformed markup is never an error; it is emitted as plain text instead.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Constructs were nested more deeply than
    /// [`Configuration::max_depth`] allows.
    #[error("nesting depth limit of {limit} exceeded at {position}")]
    DepthLimit {
        /// The configured limit.
        limit: usize,
        /// The location of the construct which would have exceeded the limit.
        position: LineCol,
    },
}

/// A human-readable location in the input text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LineCol {
    /// The 1-based line number.
    pub line: usize,
    /// The 1-based column number, in characters.
    pub column: usize,
    /// The 0-based character offset.
    pub offset: usize,
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A Wikitext token.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Token {
    /// A run of plain text.
    Text {
        /// The text content.
        text: String,
    },
    /// The `{{` opening a template.
    TemplateOpen,
    /// The `}}` closing a template.
    TemplateClose,
    /// The `|` before a template parameter.
    TemplateParamSeparator,
    /// The `=` between a template parameter name and its value.
    TemplateParamEquals,
    /// The `&` opening an HTML entity.
    HtmlEntityStart,
    /// The `#` marking a numeric HTML entity.
    HtmlEntityNumeric,
    /// The `x` marking a hexadecimal HTML entity.
    HtmlEntityHex {
        /// The marker exactly as written (`x` or `X`).
        marker: char,
    },
    /// The `;` closing an HTML entity.
    HtmlEntityEnd,
}

impl Token {
    /// Creates a new [`Token::Text`].
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Returns true if this is a [`Token::Text`].
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}

/// Writes the markup the token was read from.
///
/// Concatenating this for every token of a tokenizer's output reproduces its
/// input exactly.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { text } => f.write_str(text),
            Self::TemplateOpen => f.write_str("{{"),
            Self::TemplateClose => f.write_str("}}"),
            Self::TemplateParamSeparator => f.write_str("|"),
            Self::TemplateParamEquals => f.write_str("="),
            Self::HtmlEntityStart => f.write_str("&"),
            Self::HtmlEntityNumeric => f.write_str("#"),
            Self::HtmlEntityHex { marker } => f.write_char(*marker),
            Self::HtmlEntityEnd => f.write_str(";"),
        }
    }
}

/// Tokenizes `text` with the default [`Configuration`].
pub fn tokenize(text: &str) -> Result<Vec<Token>, Error> {
    Tokenizer::new(&Configuration::default(), text).tokenize()
}
