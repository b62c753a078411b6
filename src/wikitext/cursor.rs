//! Input buffer with a read head.

use super::LineCol;

/// The result of looking at a position in the input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Lookahead {
    /// The position is before the start of the input.
    BeforeStart,
    /// The character at the position.
    Char(char),
    /// The position is at or past the end of the input.
    AfterEnd,
}

/// The input text as a sequence of code points, and the position of the next
/// unconsumed one.
#[derive(Debug)]
pub(super) struct Cursor {
    /// The input.
    text: Vec<char>,
    /// The read position.
    head: usize,
}

impl Cursor {
    /// Creates a new cursor at the start of `text`.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            head: 0,
        }
    }

    /// The length of the input, in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// The current read position.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Moves the read position forward by `count` characters.
    #[inline]
    pub fn advance(&mut self, count: usize) {
        self.head += count;
    }

    /// Moves the read position back to a previously recorded `head`.
    #[inline]
    pub fn reset(&mut self, head: usize) {
        self.head = head;
    }

    /// Returns the character `delta` positions away from the head.
    ///
    /// If `wrap` is true, a negative position counts back from the end of the
    /// input, as long as it does not go back further than the whole input.
    pub fn read(&self, delta: isize, wrap: bool) -> Lookahead {
        let Some(index) = self.head.checked_add_signed(delta) else {
            let back = delta.unsigned_abs() - self.head;
            return if wrap && back <= self.text.len() {
                Lookahead::Char(self.text[self.text.len() - back])
            } else {
                Lookahead::BeforeStart
            };
        };

        self.text
            .get(index)
            .copied()
            .map_or(Lookahead::AfterEnd, Lookahead::Char)
    }

    /// Returns the character at the head.
    #[inline]
    pub fn current(&self) -> Lookahead {
        self.read(0, false)
    }

    /// Returns true if the input at the head starts with `literal`.
    pub fn at_head(&self, literal: &str) -> bool {
        literal
            .chars()
            .enumerate()
            .all(|(delta, c)| self.text.get(self.head + delta) == Some(&c))
    }

    /// Converts a character offset into a line and column.
    pub fn line_col(&self, offset: usize) -> LineCol {
        let before = &self.text[..offset.min(self.text.len())];
        let line_start = before
            .iter()
            .rposition(|c| *c == '\n')
            .map_or(0, |index| index + 1);
        LineCol {
            line: before.iter().filter(|c| **c == '\n').count() + 1,
            column: offset - line_start + 1,
            offset,
        }
    }
}
