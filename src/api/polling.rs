use backon::{BlockingRetryable, ConstantBuilder};
use log::{debug, info};
use std::{cell::RefCell, sync::Arc, thread, time::Duration};

use super::client::ExplorerApi;
use super::errors::PollError;
use super::models::{ExplorerResponse, VerificationJob, STATUS_NOTOK};
use super::types::{JobState, StatusCheck};
use crate::config::ApiKey;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;
pub const DEFAULT_INTERVAL_MS: u64 = 3000;

/// Substrings (matched case-insensitively) that mark a `status:"0"`
/// message as a definitive failure rather than progress.
pub const FAILURE_PATTERNS: [&str; 2] = ["fail", "error"];

/// Blocks the current poll between status queries.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Sleeps on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl PollConfig {
    pub const fn new(max_attempts: u32, interval_ms: u64) -> Self {
        Self {
            max_attempts,
            interval: Duration::from_millis(interval_ms),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_INTERVAL_MS)
    }
}

pub fn is_failure_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    FAILURE_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
}

/// Classifies one `checkverifystatus` response.
///
/// Anything that isn't `status:"1"` or a `status:"0"` failure message is
/// progress.
pub fn classify_status(response: &ExplorerResponse) -> StatusCheck {
    let message = response
        .result_text()
        .unwrap_or_else(|| "Unknown".to_string());

    if response.is_ok() {
        StatusCheck::Verified(message)
    } else if response.status == STATUS_NOTOK && is_failure_message(&message) {
        StatusCheck::Failed(message)
    } else {
        StatusCheck::Pending(message)
    }
}

enum Status {
    InProgress,
    Finished(PollError),
}

const fn is_in_progress(status: &Status) -> bool {
    match status {
        Status::InProgress => true,
        Status::Finished(_) => false,
    }
}

/// Polls `job_id` until the explorer reports a terminal state or the
/// attempt budget runs out. Every attempt waits `config.interval` before
/// querying. `on_progress` sees the job after each pending response.
///
/// # Errors
///
/// Will return `Err` on transport failure, when the explorer reports a
/// failure, or after `config.max_attempts` pending responses.
pub fn poll_verification_status<A, F>(
    api: &A,
    sleeper: &Arc<dyn Sleeper>,
    config: &PollConfig,
    job_id: &str,
    api_key: &ApiKey,
    mut on_progress: F,
) -> Result<VerificationJob, PollError>
where
    A: ExplorerApi + ?Sized,
    F: FnMut(&VerificationJob),
{
    let job = RefCell::new(VerificationJob::new(job_id));
    if config.max_attempts == 0 {
        let mut job = job.into_inner();
        job.time_out();
        return Err(PollError::Timeout(job));
    }

    let fetch = || -> Result<(), Status> {
        let response = api.check_verification_status(job_id, api_key);
        let mut current = job.borrow_mut();
        current.begin_attempt();

        let response = response.map_err(|e| Status::Finished(PollError::from(e)))?;
        match classify_status(&response) {
            StatusCheck::Verified(receipt) => {
                info!("Job {job_id} verified: {receipt}");
                current.transition(JobState::Verified, receipt);
                Ok(())
            }
            StatusCheck::Failed(message) => {
                info!("Job {job_id} failed: {message}");
                current.transition(JobState::Failed, message);
                Err(Status::Finished(PollError::VerificationFailed(
                    current.clone(),
                )))
            }
            StatusCheck::Pending(message) => {
                info!(
                    "Job {job_id} pending ({}/{}): {message}",
                    current.attempts_made(),
                    config.max_attempts
                );
                current.transition(JobState::Pending, message);
                on_progress(&current);
                Err(Status::InProgress)
            }
        }
    };

    let notify_id = job_id.to_string();
    let wait = Arc::clone(sleeper);
    sleeper.sleep(config.interval);
    let outcome = fetch
        .retry(
            ConstantBuilder::default()
                .with_delay(config.interval)
                .with_max_times(config.max_attempts as usize - 1),
        )
        .sleep(move |dur: Duration| wait.sleep(dur))
        .when(is_in_progress)
        .notify(move |_, dur: Duration| {
            debug!("Job: {notify_id} didn't finish, retrying in {dur:?}");
        })
        .call();

    let mut job = job.into_inner();
    match outcome {
        Ok(()) => Ok(job),
        Err(Status::InProgress) => {
            job.time_out();
            Err(PollError::Timeout(job))
        }
        Err(Status::Finished(err)) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_pattern_is_case_insensitive() {
        assert!(is_failure_message("Fail - Unable to verify"));
        assert!(is_failure_message("FAILED"));
        assert!(is_failure_message("Error! Missing constructor arguments"));
        assert!(!is_failure_message("Pending in queue"));
        assert!(!is_failure_message("In progress"));
    }

    #[test]
    fn test_classify_verified() {
        let check = classify_status(&ExplorerResponse::new("1", "Pass - Verified"));
        assert_eq!(check, StatusCheck::Verified("Pass - Verified".to_string()));
    }

    #[test]
    fn test_classify_failed() {
        let check = classify_status(&ExplorerResponse::new("0", "Fail - Unable to verify"));
        assert_eq!(check.state(), JobState::Failed);
    }

    #[test]
    fn test_classify_pending() {
        let check = classify_status(&ExplorerResponse::new("0", "Pending in queue"));
        assert_eq!(check, StatusCheck::Pending("Pending in queue".to_string()));
    }

    #[test]
    fn test_classify_missing_result() {
        let response = ExplorerResponse {
            status: "0".to_string(),
            message: Some("NOTOK".to_string()),
            result: None,
        };
        assert_eq!(
            classify_status(&response),
            StatusCheck::Pending("Unknown".to_string())
        );
    }

    #[test]
    fn test_unknown_status_is_pending() {
        let check = classify_status(&ExplorerResponse::new("2", "error while queued"));
        assert_eq!(check.state(), JobState::Pending);
    }

    #[test]
    fn test_default_config() {
        let config = PollConfig::default();
        assert_eq!(config.max_attempts, 20);
        assert_eq!(config.interval, Duration::from_millis(3000));
    }
}
