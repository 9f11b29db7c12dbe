//! Decoder configuration.

/// Options controlling how strictly a face is decoded.
///
/// The defaults reject every malformed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Texture channel count textured blocks must declare.
    ///
    /// When `None`, any non-zero channel count is accepted.
    pub expected_texture_channels: Option<u32>,
    /// Turn a dangling wire tail into a final loop instead of failing.
    pub close_unterminated_loops: bool,
}

impl DecodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require textured blocks to use exactly `channels` texture channels.
    #[must_use]
    pub fn with_expected_texture_channels(mut self, channels: u32) -> Self {
        self.expected_texture_channels = Some(channels);
        self
    }

    /// Close a dangling wire tail instead of failing.
    #[must_use]
    pub fn with_close_unterminated_loops(mut self, close: bool) -> Self {
        self.close_unterminated_loops = close;
        self
    }
}
