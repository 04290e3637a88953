// Re-export the API module components
pub use self::{
    client::{ApiClient, ExplorerApi},
    errors::{ApiClientError, PollError, SubmissionError},
    models::{
        ExplorerResponse, VerificationJob, VerificationRequest, STANDARD_JSON_CODE_FORMAT,
        STATUS_NOTOK, STATUS_OK,
    },
    polling::{
        classify_status, is_failure_message, poll_verification_status, PollConfig, Sleeper,
        ThreadSleeper, DEFAULT_INTERVAL_MS, DEFAULT_MAX_ATTEMPTS, FAILURE_PATTERNS,
    },
    types::{JobState, StatusCheck},
};

// Module declarations
mod client;
mod errors;
mod models;
mod polling;
mod types;
