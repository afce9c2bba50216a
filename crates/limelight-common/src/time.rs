//! Timestamp helpers for presence fields.

/// Current time as whole seconds since the Unix epoch.
///
/// Presence timestamps are 64-bit on the wire; 32-bit seconds overflow in
/// 2038 and some hosts have historically truncated here, which breaks the
/// elapsed/remaining display.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_now_is_past_2020() {
        // 2020-01-01T00:00:00Z
        assert!(unix_now() > 1_577_836_800);
    }

    #[test]
    fn unix_now_fits_display_range() {
        let now = unix_now();
        // Sanity: still before year 3000, so end-timestamp math stays sane.
        assert!(now < 32_503_680_000);
    }
}
