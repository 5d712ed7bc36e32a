//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, FixedOffset, Utc};

/// JST is UTC+9
const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        current_timestamp_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to JST RFC 3339 format
///
/// Returns `None` when the timestamp is outside the range chrono can represent.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> Option<String> {
    let jst_offset = FixedOffset::east_opt(JST_OFFSET_SECS)?;
    DateTime::from_timestamp_millis(timestamp_millis)
        .map(|dt| dt.with_timezone(&jst_offset).to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_fixed_time() {
        // テスト項目: FixedClock は常に同じ時刻を返す
        // given (前提条件):
        let clock = FixedClock::new(1_700_000_000_000);

        // when (操作):
        let first = clock.now_millis();
        let second = clock.now_millis();

        // then (期待する結果):
        assert_eq!(first, 1_700_000_000_000);
        assert_eq!(second, 1_700_000_000_000);
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        // テスト項目: SystemClock が現在時刻付近の値を返す
        let before = current_timestamp_millis();
        let now = SystemClock.now_millis();
        let after = current_timestamp_millis();

        assert!(before <= now && now <= after);
    }

    #[test]
    fn test_timestamp_to_jst_rfc3339_epoch() {
        // テスト項目: Unix エポックが JST (+09:00) で表示される
        // when (操作):
        let formatted = timestamp_to_jst_rfc3339(0);

        // then (期待する結果):
        assert_eq!(formatted.as_deref(), Some("1970-01-01T09:00:00+09:00"));
    }

    #[test]
    fn test_timestamp_to_jst_rfc3339_with_millis() {
        // テスト項目: ミリ秒を含むタイムスタンプが正しく変換される
        let formatted = timestamp_to_jst_rfc3339(1_500);

        assert_eq!(formatted.as_deref(), Some("1970-01-01T09:00:01.500+09:00"));
    }

    #[test]
    fn test_timestamp_to_jst_rfc3339_out_of_range() {
        // テスト項目: 表現できないタイムスタンプは None を返す
        assert_eq!(timestamp_to_jst_rfc3339(i64::MAX), None);
    }
}
