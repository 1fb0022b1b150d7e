//! Time helpers
//!
//! Timestamps are stored as `i64` Unix millis everywhere; repositories
//! never see any other representation.

/// Current time as Unix millis.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
