//! Helpers for readable formatting of token lists.

use super::Token;
use core::fmt;

/// Returns an inspector for a token list.
pub fn inspect(tokens: &[Token]) -> Inspector<'_> {
    Inspector(tokens)
}

/// A formatter which writes one token per line, indenting the contents of
/// templates and entities.
///
/// ```text
/// TemplateOpen
///   Text "a"
///   TemplateParamSeparator
///   HtmlEntityStart
///     Text "amp"
///   HtmlEntityEnd
/// TemplateClose
/// ```
pub struct Inspector<'a>(&'a [Token]);

impl fmt::Display for Inspector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0_usize;
        for token in self.0 {
            if matches!(token, Token::TemplateClose | Token::HtmlEntityEnd) {
                depth = depth.saturating_sub(1);
            }

            write!(f, "{:width$}", "", width = depth * 2)?;
            match token {
                Token::Text { text } => writeln!(f, "Text {text:?}")?,
                Token::HtmlEntityHex { marker } => writeln!(f, "HtmlEntityHex {marker:?}")?,
                _ => writeln!(f, "{token:?}")?,
            }

            if matches!(token, Token::TemplateOpen | Token::HtmlEntityStart) {
                depth += 1;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Inspector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
