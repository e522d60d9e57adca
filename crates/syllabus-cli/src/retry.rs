//! Bounded retry with exponential backoff for filesystem operations
//!
//! Deleting an output directory fails transiently while a previous result is
//! still open in a word processor or being scanned.

use std::fs;
use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

/// How often and how patiently to retry a failing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of tries, including the first
    pub attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after each retry
    pub backoff_factor: u32,
    /// Upper bound for a single delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based): 500ms, 1000ms, 2000ms, ...
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.backoff_factor.saturating_pow(retry);
        self.initial_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Run `op` until it succeeds or the attempts are used up, sleeping
    /// between tries; returns the last error on exhaustion
    pub fn retry_with_backoff<T, F>(&self, what: &str, mut op: F) -> io::Result<T>
    where
        F: FnMut() -> io::Result<T>,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= attempts => return Err(e),
                Err(e) => {
                    let delay = self.delay_for(attempt - 1);
                    tracing::warn!(
                        what,
                        attempt,
                        attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "operation failed, will retry"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }

    /// Recursively delete `dir`, retrying while it is in use
    ///
    /// A directory that does not exist counts as deleted.
    pub fn remove_dir_all(&self, dir: &Path) -> io::Result<()> {
        let what = dir.display().to_string();
        self.retry_with_backoff(&what, || match fs::remove_dir_all(dir) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn policy(attempts: u32) -> RetryPolicy {
        RetryPolicy {
            attempts,
            initial_delay: Duration::from_millis(1),
            backoff_factor: 2,
            max_delay: Duration::from_millis(4),
        }
    }

    #[test]
    fn test_delay_grows_and_is_capped() {
        let policy = RetryPolicy {
            attempts: 5,
            initial_delay: Duration::from_millis(500),
            backoff_factor: 2,
            max_delay: Duration::from_millis(4000),
        };
        assert_eq!(policy.delay_for(0), Duration::from_millis(500));
        assert_eq!(policy.delay_for(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(4000));
        assert_eq!(policy.delay_for(10), Duration::from_millis(4000));
        assert_eq!(policy.delay_for(u32::MAX), Duration::from_millis(4000));
    }

    #[test]
    fn test_succeeds_after_transient_failures() {
        let mut calls = 0;
        let result = policy(3).retry_with_backoff("op", || {
            calls += 1;
            if calls < 3 {
                Err(io::Error::other("busy"))
            } else {
                Ok(calls)
            }
        });
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn test_gives_up_after_attempts() {
        let mut calls = 0;
        let result: io::Result<()> = policy(2).retry_with_backoff("op", || {
            calls += 1;
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
        });

        assert_eq!(calls, 2);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_remove_dir_all() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dist");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/file.docx"), b"x").unwrap();

        policy(1).remove_dir_all(&dir).unwrap();
        assert!(!dir.exists());

        // Already gone
        policy(1).remove_dir_all(&dir).unwrap();
    }
}
