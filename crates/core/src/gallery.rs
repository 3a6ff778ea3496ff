//! Gallery image constraints.

use crate::error::CoreError;
use crate::validation::optional_text;

pub const CAPTION_MAX_LEN: usize = 255;

/// Validate an optional caption.
pub fn validate_caption(caption: Option<&str>) -> Result<(), CoreError> {
    optional_text("caption", caption, CAPTION_MAX_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_limit() {
        assert!(validate_caption(None).is_ok());
        assert!(validate_caption(Some(&"c".repeat(CAPTION_MAX_LEN))).is_ok());
        assert!(validate_caption(Some(&"c".repeat(CAPTION_MAX_LEN + 1))).is_err());
    }
}
