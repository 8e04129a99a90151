//! Default configuration constants.

/// Per-backend timeout inside an aggregate call.
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;

/// Overall deadline for one aggregate call.
pub const DEFAULT_OVERALL_DEADLINE_SECS: u64 = 30;

/// Tolerance window for pairing a candidate time with a committed
/// timestamp: one day.
pub const DEFAULT_MAX_TIMESTAMP_DIFF_SECS: u64 = 86_400;

/// Minimum score for a match result to be returned. Callers normally
/// supply their own threshold; the default keeps every positive score.
pub const DEFAULT_MIN_SCORE: f64 = 0.0;
