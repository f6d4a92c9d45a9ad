//! Login attempt limiter constants.

/// Failed attempts within the window before the account key is locked
pub const MAX_ATTEMPTS: u32 = 5;
/// Lockout duration once the threshold is reached
pub const LOCKOUT_DURATION_MS: u64 = 15 * 60 * 1000;
/// Sliding window bounding which failures count toward the threshold
pub const ATTEMPT_WINDOW_MS: u64 = 10 * 60 * 1000;

/// Directory under the platform data dir holding persisted app state
pub const APP_DIR_NAME: &str = "dragon-gate";
/// File name of the persisted attempt-record map
pub const ATTEMPTS_FILE_NAME: &str = "attempts.json";
