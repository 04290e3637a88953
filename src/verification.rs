use log::{debug, info};
use std::sync::Arc;

use crate::{
    api::{
        classify_status, poll_verification_status, ApiClientError, ExplorerApi, PollConfig,
        PollError, Sleeper, StatusCheck, SubmissionError, ThreadSleeper, VerificationJob,
        VerificationRequest,
    },
    config::ApiKey,
    errors::VerifyError,
};

/// Drives one verification from submission to a terminal job state.
///
/// The client holds no per-job state, so a single instance can poll
/// several jobs from different threads.
pub struct VerificationClient<A> {
    api: A,
    sleeper: Arc<dyn Sleeper>,
    poll: PollConfig,
}

impl<A: ExplorerApi> VerificationClient<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            sleeper: Arc::new(ThreadSleeper),
            poll: PollConfig::default(),
        }
    }

    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    #[must_use]
    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn poll_config(&self) -> &PollConfig {
        &self.poll
    }

    /// Submits `request` once and returns the explorer's job id.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Transport`] if the request couldn't be
    /// delivered and [`SubmissionError::Rejected`] if the explorer refused
    /// it. Neither is retried.
    pub fn submit(
        &self,
        request: &VerificationRequest,
        api_key: &ApiKey,
    ) -> Result<String, SubmissionError> {
        info!(
            "Submitting {} at {} with compiler {}",
            request.contract_name, request.address, request.compiler_version
        );
        let form = request.form_fields(api_key);
        debug!(
            "Submission form fields: {:?}",
            form.iter().map(|(name, _)| *name).collect::<Vec<_>>()
        );

        let response = self.api.submit_verification(&form)?;
        if !response.is_ok() {
            let message = response
                .result_text()
                .or_else(|| response.message.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            return Err(SubmissionError::Rejected(message));
        }

        let job_id = response
            .result_text()
            .ok_or_else(|| SubmissionError::Rejected("response carried no job id".to_string()))?;
        info!("Submission accepted, job id: {job_id}");
        Ok(job_id)
    }

    /// Polls `job_id` with the configured attempt budget.
    ///
    /// # Errors
    ///
    /// See [`poll_verification_status`].
    pub fn poll(&self, job_id: &str, api_key: &ApiKey) -> Result<VerificationJob, PollError> {
        self.poll_with(job_id, api_key, |_| {})
    }

    /// Like [`Self::poll`], calling `on_progress` after every pending
    /// response.
    ///
    /// # Errors
    ///
    /// See [`poll_verification_status`].
    pub fn poll_with(
        &self,
        job_id: &str,
        api_key: &ApiKey,
        on_progress: impl FnMut(&VerificationJob),
    ) -> Result<VerificationJob, PollError> {
        poll_verification_status(
            &self.api,
            &self.sleeper,
            &self.poll,
            job_id,
            api_key,
            on_progress,
        )
    }

    /// Queries `job_id` a single time without waiting.
    ///
    /// # Errors
    ///
    /// Will return `Err` on transport failure.
    pub fn check_status(
        &self,
        job_id: &str,
        api_key: &ApiKey,
    ) -> Result<StatusCheck, ApiClientError> {
        let response = self.api.check_verification_status(job_id, api_key)?;
        Ok(classify_status(&response))
    }

    /// Submits `request` and polls the resulting job to completion.
    ///
    /// # Errors
    ///
    /// Fails with the submission or poll error that ended the run.
    pub fn verify(
        &self,
        request: &VerificationRequest,
        api_key: &ApiKey,
    ) -> Result<VerificationJob, VerifyError> {
        let job_id = self.submit(request, api_key)?;
        Ok(self.poll(&job_id, api_key)?)
    }
}
