//! Limits for encoding message descriptions.

/// Bounds enforced while reading and encoding a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeLimits {
    /// Maximum submessage nesting depth.
    pub max_depth: usize,
    /// Maximum size of the JSON input in bytes.
    pub max_input_bytes: usize,
}

impl Default for EncodeLimits {
    fn default() -> Self {
        Self {
            max_depth: 32,
            max_input_bytes: 16 * 1024 * 1024,
        }
    }
}

impl EncodeLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_depth: 4,
            max_input_bytes: 4096,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
            max_input_bytes: usize::MAX,
        }
    }
}
