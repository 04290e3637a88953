use reqwest::StatusCode;
use std::fmt::{self, Formatter};
use thiserror::Error;
use url::Url;

use crate::{
    api::{ApiClientError, PollError, SubmissionError},
    artifact::ArtifactError,
    config::ConfigError,
    constructor::ConstructorArgsError,
    contract::ContractError,
    deployment::DeploymentError,
};

/// Process exit code for a verified contract.
pub const EXIT_SUCCESS: u8 = 0;
/// Process exit code for any failure other than a poll timeout.
pub const EXIT_FAILURE: u8 = 1;
/// Process exit code when the attempt budget ran out while pending.
pub const EXIT_TIMEOUT: u8 = 2;

#[derive(Debug, Error)]
pub struct RequestFailure {
    pub url: Url,
    pub status: StatusCode,
    pub msg: String,
}

impl RequestFailure {
    pub fn new(url: Url, status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            url,
            status,
            msg: msg.into(),
        }
    }

    pub const fn error_code(&self) -> &'static str {
        "E003"
    }

    fn suggestions(&self) -> &'static [&'static str] {
        match self.status {
            StatusCode::NOT_FOUND => &[
                "Check that the URL is correct",
                "Use --network to select a known explorer endpoint",
            ],
            StatusCode::TOO_MANY_REQUESTS => &[
                "Wait a moment before retrying",
                "Consider reducing request frequency with --interval-ms",
            ],
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => &[
                "Check that the API key belongs to this explorer",
                "Verify the API key hasn't been revoked",
            ],
            status if status.is_server_error() => &[
                "The explorer is having trouble, try again later",
                "Check the explorer status page",
            ],
            _ => &["Check the request parameters and try again"],
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        writeln!(
            formatter,
            "[{}] Request to {} failed with status {}",
            self.error_code(),
            self.url,
            self.status
        )?;
        writeln!(formatter, "Server response: {}", self.msg)?;
        writeln!(formatter)?;
        write!(formatter, "Suggestions:")?;
        for suggestion in self.suggestions() {
            write!(formatter, "\n  • {suggestion}")?;
        }
        Ok(())
    }
}

/// Every way a verification run can end unsuccessfully.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    ConstructorArgs(#[from] ConstructorArgsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Deployment(#[from] DeploymentError),

    #[error(transparent)]
    Api(#[from] ApiClientError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Poll(#[from] PollError),
}

impl VerifyError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Artifact(e) => e.error_code(),
            Self::Contract(e) => e.error_code(),
            Self::ConstructorArgs(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Deployment(e) => e.error_code(),
            Self::Api(e) => e.error_code(),
            Self::Submission(e) => e.error_code(),
            Self::Poll(e) => e.error_code(),
        }
    }

    /// Timeouts get their own code so callers can tell "may still
    /// succeed" from "definitely failed".
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Poll(PollError::Timeout(_)) => EXIT_TIMEOUT,
            _ => EXIT_FAILURE,
        }
    }
}
