//! Tokenizer configuration data.

use super::entities;

/// The table used to validate named HTML entities like `&amp;`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EntitySet {
    /// The 252 entities defined by HTML 4.
    #[default]
    Html4,
    /// The named character references defined by the WHATWG HTML standard.
    Html5,
}

impl EntitySet {
    /// Returns true if `name` (without the leading `&` or trailing `;`) is a
    /// known entity. Names are case-sensitive.
    pub fn contains(self, name: &str) -> bool {
        match self {
            Self::Html4 => entities::HTML4_ENTITIES.contains(name),
            Self::Html5 => entities::is_html5_entity(name),
        }
    }
}

/// Tokenizer configuration.
#[derive(Clone, Debug)]
pub struct Configuration {
    /// The named entity table.
    pub entities: EntitySet,

    /// The maximum number of nested scanning frames. The outermost frame
    /// counts as one, and each open template adds one more. Entities never
    /// nest, so they do not count.
    ///
    /// Tokenization fails with [`Error::DepthLimit`](super::Error::DepthLimit)
    /// if this would be exceeded. Values above
    /// [`MAX_DEPTH_LIMIT`](Self::MAX_DEPTH_LIMIT) are treated as that limit.
    pub max_depth: usize,

    /// Whether to remember the start positions of templates which failed to
    /// tokenize, so they are not attempted again. This only affects speed.
    pub memoize_bad_routes: bool,
}

impl Configuration {
    /// The default nesting limit. This is the same as the MediaWiki template
    /// expansion stack limit.
    pub const DEFAULT_MAX_DEPTH: usize = 40;

    /// The highest nesting limit the tokenizer will honour. Each frame is a
    /// level of native recursion, so this keeps deep input from overflowing
    /// the thread stack.
    pub const MAX_DEPTH_LIMIT: usize = 256;

    /// The nesting limit actually in effect.
    pub fn depth_limit(&self) -> usize {
        self.max_depth.min(Self::MAX_DEPTH_LIMIT)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            entities: EntitySet::default(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
            memoize_bad_routes: true,
        }
    }
}
