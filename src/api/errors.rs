use thiserror::Error;
use url::Url;

use super::models::VerificationJob;
use crate::errors::RequestFailure;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("[E006] Invalid base URL: {0}\n\nSuggestions:\n  • Provide a valid HTTP or HTTPS URL\n  • Example: https://api.etherscan.io/api\n  • Ensure the URL includes the protocol (http:// or https://)")]
    CannotBeBase(Url),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Failure(#[from] RequestFailure),

    #[error("[E007] Explorer returned an unreadable response from {url}: {source}\n\nSuggestions:\n  • Check that the URL points at the explorer API, not its website\n  • Retry later if the explorer is degraded")]
    Json {
        url: Url,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiClientError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CannotBeBase(_) => "E006",
            Self::Reqwest(_) => "E999", // Network errors get generic code
            Self::Failure(f) => f.error_code(),
            Self::Json { .. } => "E007",
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("[E060] Verification submission failed: {0}\n\nSuggestions:\n  • Check your network connection\n  • The submission is not retried automatically, run the command again")]
    Transport(#[from] ApiClientError),

    #[error("[E061] Explorer rejected the verification request: {0}\n\nSuggestions:\n  • Check the contract address and fully-qualified name\n  • Ensure the constructor arguments match the deployment\n  • The contract may already be verified")]
    Rejected(String),

    #[error("[E062] Failed to serialize compiler input: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl SubmissionError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E060",
            Self::Rejected(_) => "E061",
            Self::Encoding(_) => "E062",
        }
    }
}

#[derive(Debug, Error)]
pub enum PollError {
    #[error("[E070] Failed to query verification status: {0}")]
    Transport(#[from] ApiClientError),

    #[error("[E071] Verification failed: {}\n\nSuggestions:\n  • Ensure the compiler version and optimizer settings match the deployment\n  • Verify that the source corresponds to the deployed bytecode\n  • Check the constructor arguments", .0.last_message().unwrap_or("Unknown"))]
    VerificationFailed(VerificationJob),

    #[error("[E072] Timed out waiting for verification of job {} after {} attempts\n\nSuggestions:\n  • The explorer may still finish, check again with the status command\n  • Increase --max-attempts or --interval-ms", .0.job_id(), .0.attempts_made())]
    Timeout(VerificationJob),
}

impl PollError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E070",
            Self::VerificationFailed(_) => "E071",
            Self::Timeout(_) => "E072",
        }
    }

    /// The job in its terminal state, when the explorer got far enough
    /// to report one.
    pub const fn job(&self) -> Option<&VerificationJob> {
        match self {
            Self::Transport(_) => None,
            Self::VerificationFailed(job) | Self::Timeout(job) => Some(job),
        }
    }
}
