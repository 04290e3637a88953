use serde::Deserialize;
use serde_json::Value;

use super::types::{JobState, StatusCheck};
use crate::{
    artifact::{normalize_compiler_version, BuildArtifact},
    config::ApiKey,
    constructor::ConstructorArgs,
    contract::{ContractAddress, ContractName},
};

/// `codeformat` value identifying a standard-JSON compiler input.
pub const STANDARD_JSON_CODE_FORMAT: &str = "solidity-standard-json-input";
/// Success marker in the explorer's `status` field.
pub const STATUS_OK: &str = "1";
/// Failure / not-yet marker in the explorer's `status` field.
pub const STATUS_NOTOK: &str = "0";

/// Envelope shared by every explorer contract endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExplorerResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
}

impl ExplorerResponse {
    pub fn new(status: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: None,
            result: Some(Value::String(result.into())),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// The `result` field as text; `None` when absent, null or empty.
    pub fn result_text(&self) -> Option<String> {
        match self.result.as_ref()? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationJob {
    job_id: String,
    state: JobState,
    attempts_made: u32,
    last_message: Option<String>,
}

impl VerificationJob {
    /// A freshly submitted job, not yet polled.
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            state: JobState::Submitted,
            attempts_made: 0,
            last_message: None,
        }
    }

    /// A job observed through a single status query.
    pub fn from_check(job_id: impl Into<String>, check: &StatusCheck) -> Self {
        let mut job = Self::new(job_id);
        job.begin_attempt();
        job.transition(check.state(), check.message());
        job
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub const fn state(&self) -> JobState {
        self.state
    }

    pub const fn attempts_made(&self) -> u32 {
        self.attempts_made
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub const fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub(crate) fn begin_attempt(&mut self) {
        self.attempts_made += 1;
    }

    pub(crate) fn transition(&mut self, state: JobState, message: impl Into<String>) {
        self.state = state;
        self.last_message = Some(message.into());
    }

    pub(crate) fn time_out(&mut self) {
        self.state = JobState::TimedOut;
    }
}

/// Everything the explorer needs to recompile and compare one deployed
/// contract.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRequest {
    pub address: ContractAddress,
    pub contract_name: ContractName,
    pub constructor_args: ConstructorArgs,
    pub source_code: String,
    pub compiler_version: String,
    pub optimization_used: bool,
    pub runs: String,
    pub evm_version: Option<String>,
}

impl VerificationRequest {
    /// # Errors
    ///
    /// Fails only if the artifact's compiler input can't be serialized.
    pub fn new(
        artifact: &BuildArtifact,
        address: ContractAddress,
        contract_name: ContractName,
        constructor_args: ConstructorArgs,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            address,
            contract_name,
            constructor_args,
            source_code: artifact.source_code()?,
            compiler_version: normalize_compiler_version(artifact.compiler_version()),
            optimization_used: artifact.optimizer_enabled(),
            runs: artifact.optimizer_runs().to_string(),
            evm_version: artifact.evm_version().map(str::to_string),
        })
    }

    /// Form fields for the `verifysourcecode` action, in submission
    /// order.
    pub fn form_fields(&self, api_key: &ApiKey) -> Vec<(&'static str, String)> {
        let args = self.constructor_args.as_hex().to_string();
        let mut fields = vec![
            ("module", "contract".to_string()),
            ("action", "verifysourcecode".to_string()),
            ("apikey", api_key.expose().to_string()),
            ("contractaddress", self.address.to_string()),
            ("contractname", self.contract_name.to_string()),
            ("codeformat", STANDARD_JSON_CODE_FORMAT.to_string()),
            ("sourceCode", self.source_code.clone()),
            // Misspelling is part of the explorer API.
            ("constructorArguements", args.clone()),
            ("constructorArgs", args),
            ("compilerversion", normalize_compiler_version(&self.compiler_version)),
            ("optimizationUsed", optimization_flag(self.optimization_used)),
            ("runs", self.runs.clone()),
        ];
        if let Some(evm_version) = &self.evm_version {
            fields.push(("evmVersion", evm_version.clone()));
        }
        fields
    }
}

fn optimization_flag(enabled: bool) -> String {
    let flag = if enabled { "1" } else { "0" };
    flag.to_string()
}
