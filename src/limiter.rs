//! Client-side login attempt limiter.
//!
//! Tracks failed sign-in attempts per email and enforces a lockout once the
//! threshold is reached. This is a deterrent, not a security boundary: the
//! records live in local, user-inspectable storage and the real enforcement
//! belongs to the identity service.
//!
//! Expiry is lazy: stale windows and expired locks are deleted when next
//! observed, never by a background sweep.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::store::AttemptStore;

/// Per-email failure record. `count` is only meaningful within the attempt
/// window starting at `first_attempt`; expired records are deleted on next
/// observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub count: u32,
    #[serde(rename = "firstAttempt")]
    pub first_attempt: u64,
    #[serde(rename = "lockedUntil")]
    pub locked_until: Option<u64>,
}

/// Result of a pre-submit rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub allowed: bool,
    pub remaining_attempts: u32,
    pub lockout_seconds: u64,
}

impl RateLimitStatus {
    /// The result for an email with no (or no longer relevant) record
    fn fresh() -> Self {
        Self {
            allowed: true,
            remaining_attempts: MAX_ATTEMPTS,
            lockout_seconds: 0,
        }
    }
}

/// Result of recording a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureOutcome {
    pub locked: bool,
    pub lockout_seconds: u64,
}

/// Storage key: lower-cased, trimmed email
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn system_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Attempt limiter over a persisted email -> record map.
///
/// Every operation is a synchronous read-modify-write of the whole map;
/// concurrent app instances may lose updates, which is accepted for a
/// client-side deterrent.
pub struct AttemptLimiter {
    store: AttemptStore,
}

impl AttemptLimiter {
    pub fn new(store: AttemptStore) -> Self {
        Self { store }
    }

    /// Check whether a login attempt for `email` is currently allowed
    pub fn check_rate_limit(&self, email: &str) -> RateLimitStatus {
        self.check_rate_limit_at(email, system_now_ms())
    }

    pub fn check_rate_limit_at(&self, email: &str, now_ms: u64) -> RateLimitStatus {
        let key = normalize_email(email);
        let mut records = self.store.load();

        let Some(record) = records.get(&key) else {
            return RateLimitStatus::fresh();
        };

        // Active lockout
        if let Some(locked_until) = record.locked_until {
            if now_ms < locked_until {
                return RateLimitStatus {
                    allowed: false,
                    remaining_attempts: 0,
                    lockout_seconds: (locked_until - now_ms).div_ceil(1000),
                };
            }
            // Lock expired: the record is cleared, not merely unlocked
            records.remove(&key);
            self.store.save(&records);
            return RateLimitStatus::fresh();
        }

        // Attempt window expired: fresh start, the stale count is gone
        if now_ms.saturating_sub(record.first_attempt) > ATTEMPT_WINDOW_MS {
            records.remove(&key);
            self.store.save(&records);
            return RateLimitStatus::fresh();
        }

        let remaining = MAX_ATTEMPTS.saturating_sub(record.count);
        RateLimitStatus {
            allowed: remaining > 0,
            remaining_attempts: remaining,
            lockout_seconds: 0,
        }
    }

    /// Record a failed authentication for `email`
    pub fn record_failed_attempt(&self, email: &str) -> FailureOutcome {
        self.record_failed_attempt_at(email, system_now_ms())
    }

    pub fn record_failed_attempt_at(&self, email: &str, now_ms: u64) -> FailureOutcome {
        let key = normalize_email(email);
        let mut records = self.store.load();

        let mut record = records.get(&key).cloned().unwrap_or(AttemptRecord {
            count: 0,
            first_attempt: now_ms,
            locked_until: None,
        });

        // A failure after the window expired starts a fresh window
        if now_ms.saturating_sub(record.first_attempt) > ATTEMPT_WINDOW_MS {
            record.count = 0;
            record.first_attempt = now_ms;
            record.locked_until = None;
        }

        record.count += 1;

        if record.count >= MAX_ATTEMPTS {
            record.locked_until = Some(now_ms + LOCKOUT_DURATION_MS);
            records.insert(key.clone(), record);
            self.store.save(&records);
            tracing::info!(email = %key, "login attempts exhausted, key locked");
            return FailureOutcome {
                locked: true,
                lockout_seconds: LOCKOUT_DURATION_MS.div_ceil(1000),
            };
        }

        records.insert(key, record);
        self.store.save(&records);
        FailureOutcome {
            locked: false,
            lockout_seconds: 0,
        }
    }

    /// Drop the record for `email` unconditionally (on successful login)
    pub fn clear_attempts(&self, email: &str) {
        let key = normalize_email(email);
        let mut records = self.store.load();
        if records.remove(&key).is_some() {
            self.store.save(&records);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE_MS: u64 = 60 * 1000;

    fn temp_limiter(tag: &str) -> AttemptLimiter {
        let path = std::env::temp_dir().join(format!(
            "dragon-gate-limiter-{}-{}.json",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        AttemptLimiter::new(AttemptStore::at(path))
    }

    #[test]
    fn test_unknown_email_starts_with_all_attempts() {
        let limiter = temp_limiter("fresh");
        let status = limiter.check_rate_limit_at("nobody@example.com", 0);
        assert_eq!(
            status,
            RateLimitStatus {
                allowed: true,
                remaining_attempts: MAX_ATTEMPTS,
                lockout_seconds: 0
            }
        );
    }

    #[test]
    fn test_fifth_failure_locks_for_fifteen_minutes() {
        let limiter = temp_limiter("lock");
        let now = 1_000_000;

        for i in 0..MAX_ATTEMPTS - 1 {
            let outcome = limiter.record_failed_attempt_at("user@example.com", now + i as u64);
            assert!(!outcome.locked);
        }
        let outcome = limiter.record_failed_attempt_at("user@example.com", now + 10);
        assert!(outcome.locked);
        assert_eq!(outcome.lockout_seconds, 900);

        let status = limiter.check_rate_limit_at("user@example.com", now + 10);
        assert!(!status.allowed);
        assert_eq!(status.remaining_attempts, 0);
        assert_eq!(status.lockout_seconds, 900);

        // The reported lockout shrinks as time passes
        let later = limiter.check_rate_limit_at("user@example.com", now + 10 + 5 * MINUTE_MS);
        assert!(!later.allowed);
        assert_eq!(later.lockout_seconds, 600);
    }

    #[test]
    fn test_remaining_attempts_decrease_within_window() {
        let limiter = temp_limiter("remaining");
        limiter.record_failed_attempt_at("user@example.com", 0);
        limiter.record_failed_attempt_at("user@example.com", 1000);

        let status = limiter.check_rate_limit_at("user@example.com", 2000);
        assert!(status.allowed);
        assert_eq!(status.remaining_attempts, MAX_ATTEMPTS - 2);
    }

    #[test]
    fn test_email_keys_are_normalized() {
        let limiter = temp_limiter("normalize");
        limiter.record_failed_attempt_at("  A@B.com ", 0);
        limiter.record_failed_attempt_at("a@b.COM", 1);

        let status = limiter.check_rate_limit_at("a@b.com", 2);
        assert_eq!(status.remaining_attempts, MAX_ATTEMPTS - 2);
    }

    #[test]
    fn test_lock_expiry_clears_the_record_entirely() {
        let limiter = temp_limiter("expiry");
        let now = 50_000;
        for _ in 0..MAX_ATTEMPTS {
            limiter.record_failed_attempt_at("user@example.com", now);
        }
        assert!(!limiter.check_rate_limit_at("user@example.com", now + 1).allowed);

        // Past the lock: the full allowance again, not a stale count of 5
        let status = limiter.check_rate_limit_at("user@example.com", now + LOCKOUT_DURATION_MS);
        assert_eq!(
            status,
            RateLimitStatus {
                allowed: true,
                remaining_attempts: MAX_ATTEMPTS,
                lockout_seconds: 0
            }
        );
    }

    #[test]
    fn test_expired_window_restarts_the_count() {
        let limiter = temp_limiter("window");
        for i in 0..MAX_ATTEMPTS - 1 {
            limiter.record_failed_attempt_at("user@example.com", i as u64);
        }

        // Next failure lands after the window: count restarts at 1, no lock
        let outcome =
            limiter.record_failed_attempt_at("user@example.com", ATTEMPT_WINDOW_MS + MINUTE_MS);
        assert!(!outcome.locked);

        let status = limiter.check_rate_limit_at("user@example.com", ATTEMPT_WINDOW_MS + MINUTE_MS);
        assert_eq!(status.remaining_attempts, MAX_ATTEMPTS - 1);
    }

    #[test]
    fn test_window_expiry_observed_by_check_resets_lazily() {
        let limiter = temp_limiter("lazy");
        limiter.record_failed_attempt_at("user@example.com", 0);
        limiter.record_failed_attempt_at("user@example.com", 1);

        // Observing an expired window deletes the record and reports the
        // fresh-start result immediately
        let status = limiter.check_rate_limit_at("user@example.com", ATTEMPT_WINDOW_MS + 1000);
        assert_eq!(status.remaining_attempts, MAX_ATTEMPTS);
    }

    #[test]
    fn test_clear_attempts_removes_the_record() {
        let limiter = temp_limiter("clear");
        for i in 0..3 {
            limiter.record_failed_attempt_at("user@example.com", i);
        }
        limiter.clear_attempts("user@example.com");

        assert_eq!(
            limiter.check_rate_limit_at("user@example.com", 10).remaining_attempts,
            MAX_ATTEMPTS
        );

        // The next failure starts over at count = 1
        limiter.record_failed_attempt_at("user@example.com", 20);
        assert_eq!(
            limiter.check_rate_limit_at("user@example.com", 21).remaining_attempts,
            MAX_ATTEMPTS - 1
        );
    }

    #[test]
    fn test_lockout_lifecycle_end_to_end() {
        let limiter = temp_limiter("e2e");
        let start = 1_700_000_000_000;

        // Five failures inside one minute
        for i in 0..MAX_ATTEMPTS {
            limiter.record_failed_attempt_at("test@x.com", start + i as u64 * 10_000);
        }
        let locked = limiter.check_rate_limit_at("test@x.com", start + MINUTE_MS);
        assert!(!locked.allowed);
        assert!(locked.lockout_seconds > 0);

        // Fifteen minutes after the lock was set, the key is free again
        let after = start + 40_000 + LOCKOUT_DURATION_MS;
        let status = limiter.check_rate_limit_at("test@x.com", after);
        assert!(status.allowed);
        assert_eq!(status.remaining_attempts, MAX_ATTEMPTS);
    }

    #[test]
    fn test_unavailable_storage_never_blocks_authentication() {
        let limiter = AttemptLimiter::new(AttemptStore::unavailable());
        for _ in 0..MAX_ATTEMPTS * 2 {
            limiter.record_failed_attempt_at("user@example.com", 0);
        }
        // Nothing persists, so the check degrades to the fresh result
        assert!(limiter.check_rate_limit_at("user@example.com", 0).allowed);
    }
}
