//! A backtracking tokenizer for Wikitext templates and HTML entities.
//!
//! ```
//! use wiki_tokenizer::wikitext::{Token, tokenize};
//!
//! let tokens = tokenize("{{a|b=c}}").unwrap();
//! assert_eq!(tokens.first(), Some(&Token::TemplateOpen));
//! ```

pub mod wikitext;
