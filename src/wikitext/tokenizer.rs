//! A backtracking Wikitext tokenizer.
//!
//! The tokenizer makes a single pass over the input, but constructs which may
//! or may not turn out to be markup (templates and entities) are parsed
//! speculatively into their own frame. If the construct turns out to be
//! malformed, its frame is thrown away, the read head goes back to where the
//! construct started, and the opening character is emitted as plain text.

use super::{
    Configuration, Context, Error, Token,
    cursor::{Cursor, Lookahead},
    stack::Stack,
};
use std::collections::HashMap;

/// Why a route could not be completed.
#[derive(Debug)]
enum Route {
    /// The construct being parsed is not valid markup and should be treated as
    /// text instead.
    Bad,
    /// Tokenization cannot continue at all.
    Fatal(Error),
}

/// The condition which successfully ends a call to
/// [`Tokenizer::parse_until`].
#[derive(Clone, Copy, Debug)]
enum Stop {
    /// The end of the input.
    End,
    /// The given literal text, or the end of the input.
    Literal(&'static str),
}

/// The alphabet of an HTML entity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum EntityKind {
    /// `&name;`
    Named,
    /// `&#123;`
    Decimal,
    /// `&#x7b;`
    Hexadecimal,
}

impl EntityKind {
    /// Returns true if `c` may appear in the body of this kind of entity.
    fn accepts(self, c: char) -> bool {
        match self {
            Self::Named => c.is_ascii_alphanumeric(),
            Self::Decimal => c.is_ascii_digit(),
            Self::Hexadecimal => c.is_ascii_hexdigit(),
        }
    }
}

/// A Wikitext tokenizer for one input.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    /// The tokenizer configuration.
    config: &'a Configuration,
    /// The input and read head.
    cursor: Cursor,
    /// The scanning frames.
    stack: Stack,
    /// Start positions of templates which are known not to tokenize, with the
    /// deepest frame depth at which each one failed. A route which fails at
    /// some depth fails the same way at any shallower depth.
    bad_routes: HashMap<usize, usize>,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for `text`.
    pub fn new(config: &'a Configuration, text: &str) -> Self {
        Self {
            config,
            cursor: Cursor::new(text),
            stack: Stack::default(),
            bad_routes: HashMap::new(),
        }
    }

    /// Tokenizes the whole input.
    ///
    /// Malformed templates and entities are emitted as text, so the only
    /// possible failure is exceeding the nesting limit.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        log::debug!("Tokenizing {} characters", self.cursor.len());
        match self.parse_until(Stop::End, Context::empty()) {
            Ok(tokens) => {
                log::debug!(
                    "Produced {} tokens ({} failed template routes)",
                    tokens.len(),
                    self.bad_routes.len()
                );
                Ok(tokens)
            }
            Err(Route::Fatal(err)) => {
                log::warn!("{err}");
                Err(err)
            }
            Err(Route::Bad) => unreachable!("the top-level route can never fail"),
        }
    }

    /// Pushes a new frame, unless that would exceed the nesting limit.
    fn push(&mut self, context: Context) -> Result<(), Route> {
        let limit = self.config.depth_limit();
        if self.stack.depth() >= limit {
            return Err(Route::Fatal(Error::DepthLimit {
                limit,
                position: self.cursor.line_col(self.cursor.head()),
            }));
        }
        self.stack.push(context);
        Ok(())
    }

    /// Discards the current frame and signals that its route is bad.
    fn fail_route(&mut self) -> Route {
        let discarded = self.stack.pop();
        log::trace!(
            "Bad route at {} ({} tokens discarded)",
            self.cursor.head(),
            discarded.len()
        );
        Route::Bad
    }

    /// Writes the character at the head as text.
    fn write_head(&mut self) {
        if let Lookahead::Char(c) = self.cursor.current() {
            self.stack.write(Token::text(c));
        }
    }

    /// Fails an unterminated template.
    fn verify_context_pre_stop(&mut self) -> Result<(), Route> {
        if self.cursor.current() == Lookahead::AfterEnd && self.stack.context().in_template() {
            return Err(self.fail_route());
        }
        Ok(())
    }

    /// Returns true, and moves the head to the last character of the stop
    /// sequence, if scanning should stop.
    fn catch_stop(&mut self, stop: Stop) -> bool {
        if self.cursor.current() == Lookahead::AfterEnd {
            return true;
        }
        match stop {
            Stop::End => false,
            Stop::Literal(literal) => {
                let found = self.cursor.at_head(literal);
                if found {
                    self.cursor.advance(literal.chars().count() - 1);
                }
                found
            }
        }
    }

    /// Fails a template name which contains a line break followed by more
    /// text, since it was probably never meant to be a template.
    fn verify_context_post_stop(&mut self) -> Result<(), Route> {
        if self.stack.context().contains(Context::TEMPLATE_NAME)
            && let Some(Token::Text { text }) = self.stack.last()
            && !text.trim().is_empty()
            && text.ends_with('\n')
            && !matches!(self.cursor.current(), Lookahead::Char('|' | '=' | '\n'))
        {
            return Err(self.fail_route());
        }
        Ok(())
    }

    /// Parses a template at the head.
    fn parse_template(&mut self) -> Result<(), Route> {
        let reset = self.cursor.head();
        let depth = self.stack.depth();
        if self.bad_routes.get(&reset).is_some_and(|&failed| depth <= failed) {
            log::trace!("Skipping known bad template at {reset}");
            self.write_head();
            return Ok(());
        }

        self.cursor.advance(2);
        match self.parse_until(Stop::Literal("}}"), Context::TEMPLATE_NAME) {
            Ok(template) => {
                self.stack.write(Token::TemplateOpen);
                self.stack.write_all(template);
                self.stack.write(Token::TemplateClose);
                Ok(())
            }
            Err(Route::Bad) => {
                if self.config.memoize_bad_routes {
                    let failed = self.bad_routes.entry(reset).or_default();
                    *failed = (*failed).max(depth);
                }
                self.cursor.reset(reset);
                self.write_head();
                Ok(())
            }
            Err(fatal) => Err(fatal),
        }
    }

    /// Handles a template parameter separator.
    fn handle_template_param(&mut self) {
        let context = self.stack.context_mut();
        context.remove(Context::TEMPLATE_NAME | Context::TEMPLATE_PARAM_VALUE);
        context.insert(Context::TEMPLATE_PARAM_KEY);
        self.stack.write(Token::TemplateParamSeparator);
    }

    /// Handles the separator between a template parameter name and value.
    fn handle_template_param_value(&mut self) {
        let context = self.stack.context_mut();
        context.remove(Context::TEMPLATE_PARAM_KEY);
        context.insert(Context::TEMPLATE_PARAM_VALUE);
        self.stack.write(Token::TemplateParamEquals);
    }

    /// Parses an HTML entity at the head.
    fn parse_entity(&mut self) -> Result<(), Route> {
        let reset = self.cursor.head();
        self.cursor.advance(1);
        // An entity body is flat, so it is exempt from the nesting limit.
        self.stack.push(Context::empty());
        match self.really_parse_entity() {
            Ok(()) => {
                let entity = self.stack.pop();
                self.stack.write_all(entity);
                Ok(())
            }
            Err(Route::Bad) => {
                self.cursor.reset(reset);
                self.write_head();
                Ok(())
            }
            Err(fatal) => Err(fatal),
        }
    }

    /// Parses the body of an HTML entity into the current frame. The head must
    /// be immediately after the `&`.
    fn really_parse_entity(&mut self) -> Result<(), Route> {
        self.stack.write(Token::HtmlEntityStart);

        let mut kind = EntityKind::Named;
        if self.cursor.at_head("#") {
            self.stack.write(Token::HtmlEntityNumeric);
            if let Lookahead::Char(marker @ ('x' | 'X')) = self.cursor.read(1, false) {
                kind = EntityKind::Hexadecimal;
                self.stack.write(Token::HtmlEntityHex { marker });
                self.cursor.advance(2);
            } else {
                kind = EntityKind::Decimal;
                self.cursor.advance(1);
            }
        }

        let mut text = String::new();
        loop {
            match self.cursor.current() {
                Lookahead::Char(';') => break,
                Lookahead::Char(c) if kind.accepts(c) => {
                    text.push(c);
                    self.cursor.advance(1);
                }
                _ => return Err(self.fail_route()),
            }
        }

        let valid = match kind {
            EntityKind::Named => self.config.entities.contains(&text),
            EntityKind::Decimal => is_valid_code_point(&text, 10),
            EntityKind::Hexadecimal => is_valid_code_point(&text, 16),
        };
        if !valid {
            return Err(self.fail_route());
        }

        self.stack.write(Token::Text { text });
        self.stack.write(Token::HtmlEntityEnd);
        Ok(())
    }

    /// Tokenizes from the head into a new frame with the given context until
    /// `stop` is reached, returning the tokens of the frame.
    fn parse_until(&mut self, stop: Stop, context: Context) -> Result<Vec<Token>, Route> {
        self.push(context)?;
        loop {
            self.verify_context_pre_stop()?;
            if self.catch_stop(stop) {
                return Ok(self.stack.pop());
            }
            self.verify_context_post_stop()?;

            if self.cursor.at_head("{{") {
                self.parse_template()?;
            } else if self.cursor.at_head("|") && self.stack.context().in_template() {
                self.handle_template_param();
            } else if self.cursor.at_head("=")
                && self.stack.context().contains(Context::TEMPLATE_PARAM_KEY)
            {
                self.handle_template_param_value();
            } else if self.cursor.at_head("&") {
                self.parse_entity()?;
            } else {
                self.write_head();
            }

            self.cursor.advance(1);
        }
    }
}

/// Returns true if `digits` is a number in the given radix which is an allowed
/// numeric entity value.
fn is_valid_code_point(digits: &str, radix: u32) -> bool {
    u32::from_str_radix(digits, radix).is_ok_and(|value| (1..=0x10_ffff).contains(&value))
}
