#![allow(dead_code)]

use camino::Utf8PathBuf;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use verifier::api::{ApiClientError, ExplorerApi, ExplorerResponse, Sleeper};
use verifier::config::ApiKey;
use verifier::errors::RequestFailure;

pub const ADDRESS: &str = "0x0eFbf4be712Ed78f899b306B5d919Bb167676ebe";
pub const CONTRACT_NAME: &str = "project/contracts/KipuBank.sol:KipuBank";
pub const GUID: &str = "ezq878u486pzijkvvmerl6a9mzwhv6sefgvqi5tkwceejc7tvn";

pub fn api_key() -> ApiKey {
    ApiKey::new("TESTKEYTESTKEYTESTKEYTESTKEYTESTK1").unwrap()
}

pub fn transport_failure() -> ApiClientError {
    ApiClientError::from(RequestFailure::new(
        Url::parse("https://api-sepolia.etherscan.io/api").unwrap(),
        StatusCode::BAD_GATEWAY,
        "upstream unavailable",
    ))
}

/// Explorer double: a canned submission answer plus a per-guid script of
/// status answers. The last scripted answer repeats once exhausted.
pub struct ScriptedExplorer {
    submit_response: Mutex<Option<Result<ExplorerResponse, ApiClientError>>>,
    scripts: HashMap<String, Vec<ExplorerResponse>>,
    status_failure: bool,
    pub submissions: Mutex<Vec<Vec<(&'static str, String)>>>,
    pub status_calls: Mutex<HashMap<String, usize>>,
}

impl ScriptedExplorer {
    pub fn new() -> Self {
        Self {
            submit_response: Mutex::new(Some(Ok(ExplorerResponse::new("1", GUID)))),
            scripts: HashMap::new(),
            status_failure: false,
            submissions: Mutex::new(Vec::new()),
            status_calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_submit_response(self, response: Result<ExplorerResponse, ApiClientError>) -> Self {
        *self.submit_response.lock().unwrap() = Some(response);
        self
    }

    pub fn with_script(mut self, guid: &str, script: Vec<ExplorerResponse>) -> Self {
        self.scripts.insert(guid.to_string(), script);
        self
    }

    pub fn with_status_failure(mut self) -> Self {
        self.status_failure = true;
        self
    }

    pub fn calls_for(&self, guid: &str) -> usize {
        self.status_calls
            .lock()
            .unwrap()
            .get(guid)
            .copied()
            .unwrap_or(0)
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

impl ExplorerApi for ScriptedExplorer {
    fn submit_verification(
        &self,
        form: &[(&'static str, String)],
    ) -> Result<ExplorerResponse, ApiClientError> {
        self.submissions.lock().unwrap().push(form.to_vec());
        self.submit_response
            .lock()
            .unwrap()
            .take()
            .expect("submission attempted more than once")
    }

    fn check_verification_status(
        &self,
        guid: &str,
        _api_key: &ApiKey,
    ) -> Result<ExplorerResponse, ApiClientError> {
        let call = {
            let mut calls = self.status_calls.lock().unwrap();
            let count = calls.entry(guid.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        if self.status_failure {
            return Err(transport_failure());
        }

        let script = self.scripts.get(guid).expect("no script for guid");
        let index = (call - 1).min(script.len() - 1);
        Ok(script[index].clone())
    }
}

/// Records requested delays instead of sleeping.
#[derive(Default)]
pub struct RecordingSleeper {
    pub slept: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn total(&self) -> Duration {
        self.slept.lock().unwrap().iter().sum()
    }

    pub fn count(&self) -> usize {
        self.slept.lock().unwrap().len()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

pub fn pending(message: &str) -> ExplorerResponse {
    ExplorerResponse::new("0", message)
}

pub fn verified() -> ExplorerResponse {
    ExplorerResponse::new("1", "Pass - Verified")
}

pub fn build_info(overrides: Value) -> Value {
    let mut info = json!({
        "_format": "hh-sol-build-info-1",
        "solcVersion": "0.8.24",
        "input": {
            "language": "Solidity",
            "sources": {
                "project/contracts/KipuBank.sol": { "content": "contract KipuBank {}" }
            },
            "settings": {
                "optimizer": { "enabled": true, "runs": 200 },
                "outputSelection": {}
            }
        }
    });
    if let (Some(base), Some(extra)) = (info.as_object_mut(), overrides.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    info
}

pub fn write_json(dir: &TempDir, name: &str, value: &Value) -> Utf8PathBuf {
    let path = Utf8PathBuf::try_from(dir.path().join(name)).unwrap();
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}
