//! Scanning context flags.

bitflags::bitflags! {
    /// What kind of construct the tokenizer is currently scanning. Each frame
    /// has its own context.
    ///
    /// While inside a template, exactly one of the template bits is set.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Context: u32 {
        /// The template name, before the first `|`.
        const TEMPLATE_NAME = 1 << 0;
        /// A template parameter name, before the first `=`.
        const TEMPLATE_PARAM_KEY = 1 << 1;
        /// A template parameter value.
        const TEMPLATE_PARAM_VALUE = 1 << 2;

        /// Anywhere inside a template body. Use
        /// [`intersects`](Self::intersects) to test for this.
        const TEMPLATE = Self::TEMPLATE_NAME.bits()
            | Self::TEMPLATE_PARAM_KEY.bits()
            | Self::TEMPLATE_PARAM_VALUE.bits();
    }
}

impl Context {
    /// Returns true if scanning is inside a template body.
    #[inline]
    pub fn in_template(self) -> bool {
        self.intersects(Self::TEMPLATE)
    }
}
