//! Error types for the protocol layer.
//!
//! Each crate defines its own error enum; a `ProtocolError` always means
//! a representation problem (an impossible tile code), never a game-rule
//! violation. Those live in `tilecode-engine`.

/// Errors that can occur validating wire representations.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A tile code outside the valid `-13..=13` band.
    #[error("invalid tile code: {0}")]
    InvalidTileCode(i8),

    /// A zero tile code without its color tag. Zero has no sign, so the
    /// color cannot be recovered.
    #[error("tile code 0 requires a color tag")]
    MissingColorTag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_problem() {
        assert_eq!(
            ProtocolError::InvalidTileCode(99).to_string(),
            "invalid tile code: 99"
        );
        assert_eq!(
            ProtocolError::MissingColorTag.to_string(),
            "tile code 0 requires a color tag"
        );
    }
}
