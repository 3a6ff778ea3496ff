//! Limit/offset clamping for list endpoints.
//!
//! Listings are unbounded unless the client asks for a page.

/// Largest page a client may request.
pub const MAX_LIMIT: i64 = 100;

/// Clamp an explicit limit to `[1, max]`. No limit stays no limit.
pub fn clamp_limit(limit: Option<i64>, max: i64) -> Option<i64> {
    limit.map(|l| l.clamp(1, max))
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_leaves_absent_limit_unbounded() {
        assert_eq!(clamp_limit(None, MAX_LIMIT), None);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(500), MAX_LIMIT), Some(100));
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(0), MAX_LIMIT), Some(1));
        assert_eq!(clamp_limit(Some(-3), MAX_LIMIT), Some(1));
    }

    #[test]
    fn clamp_offset_is_non_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(7)), 7);
    }
}
