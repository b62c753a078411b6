//! Tokenizer frame stack management.

use super::{Context, Token};

/// A scanning frame.
#[derive(Debug)]
struct Frame {
    /// The tokens produced so far.
    tokens: Vec<Token>,
    /// The scanning context.
    context: Context,
}

/// The stack of scanning frames. Only the topmost frame is writable.
#[derive(Debug, Default)]
pub(super) struct Stack {
    /// The frames, innermost last.
    frames: Vec<Frame>,
}

impl Stack {
    /// The number of live frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Pushes a new empty frame with the given context.
    pub fn push(&mut self, context: Context) {
        self.frames.push(Frame {
            tokens: Vec::new(),
            context,
        });
    }

    /// Removes the current frame and returns its tokens.
    ///
    /// # Panics
    ///
    /// If the stack is empty.
    pub fn pop(&mut self) -> Vec<Token> {
        self.frames
            .pop()
            .map(|frame| frame.tokens)
            .unwrap_or_else(|| underflow("pop"))
    }

    /// The context of the current frame.
    #[inline]
    pub fn context(&self) -> Context {
        self.top_frame("context").context
    }

    /// The context of the current frame, for modification.
    #[inline]
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.top_frame_mut("context_mut").context
    }

    /// The most recently written token of the current frame.
    #[inline]
    pub fn last(&self) -> Option<&Token> {
        self.top_frame("last").tokens.last()
    }

    /// Writes a token to the current frame, merging it into the previous
    /// token if both are text.
    pub fn write(&mut self, token: Token) {
        write_to(&mut self.top_frame_mut("write").tokens, token);
    }

    /// Writes a list of tokens to the current frame as-is.
    pub fn write_all(&mut self, tokens: Vec<Token>) {
        self.top_frame_mut("write_all").tokens.extend(tokens);
    }

    /// The current frame.
    fn top_frame(&self, op: &str) -> &Frame {
        self.frames.last().unwrap_or_else(|| underflow(op))
    }

    /// The current frame, for modification.
    fn top_frame_mut(&mut self, op: &str) -> &mut Frame {
        self.frames.last_mut().unwrap_or_else(|| underflow(op))
    }
}

/// Writes a token to the end of `tokens`, merging it into the previous token if
/// both are text.
fn write_to(tokens: &mut Vec<Token>, token: Token) {
    if let Token::Text { text } = &token
        && let Some(Token::Text { text: last }) = tokens.last_mut()
    {
        last.push_str(text);
        return;
    }

    tokens.push(token);
}

/// Aborts on a frame operation with no frame to operate on. This only happens
/// if the tokenizer is broken.
#[cold]
#[track_caller]
fn underflow(op: &str) -> ! {
    panic!("tokenizer frame stack underflow in {op}")
}
