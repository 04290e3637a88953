use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde_json::Value;
use std::{fs, io};
use thiserror::Error;

/// Optimizer runs reported when the optimizer is off or unconfigured.
pub const DEFAULT_OPTIMIZER_RUNS: &str = "200";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("[E001] Build artifact not found at: {path}\n\nSuggestions:\n  • Compile the project before verifying\n  • Check the path to the build-info file\n  • Ensure the file is readable")]
    NotFound {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("[E002] Build artifact at {path} is malformed: {reason}\n\nSuggestions:\n  • Use the build-info JSON emitted by the compiler toolchain\n  • Ensure the file contains the standard-JSON `input` object\n  • Recompile to regenerate the artifact")]
    Malformed {
        path: Utf8PathBuf,
        reason: MalformedReason,
    },
}

impl ArtifactError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "E001",
            Self::Malformed { .. } => "E002",
        }
    }
}

/// Why a build-info document couldn't be used.
#[derive(Debug, Error)]
pub enum MalformedReason {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("missing `input` field")]
    MissingInput,

    #[error("`input` is not an object")]
    InputNotObject,

    #[error("missing `solcLongVersion` and `solcVersion`")]
    MissingCompilerVersion,
}

/// Compiler output bundling the standard-JSON input and the settings
/// needed to reproduce the deployed bytecode.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildArtifact {
    source_input: Value,
    compiler_version: String,
    optimizer_enabled: bool,
    optimizer_runs: String,
    evm_version: Option<String>,
}

impl BuildArtifact {
    /// Reads a build-info document from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::NotFound`] if the file can't be read and
    /// [`ArtifactError::Malformed`] if it isn't JSON, lacks the `input`
    /// object or carries no compiler version.
    pub fn load(path: &Utf8Path) -> Result<Self, ArtifactError> {
        let content = fs::read_to_string(path).map_err(|source| ArtifactError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let artifact = Self::parse(&content).map_err(|reason| ArtifactError::Malformed {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!(
            "Loaded build artifact {path}: compiler={}, optimizer={}, runs={}, evm={:?}",
            artifact.compiler_version,
            artifact.optimizer_enabled,
            artifact.optimizer_runs,
            artifact.evm_version
        );
        Ok(artifact)
    }

    /// Extracts the artifact from an in-memory build-info document.
    ///
    /// Compiler settings are read leniently: ill-typed or missing values
    /// fall back to a disabled optimizer, `"200"` runs and no EVM version.
    ///
    /// # Errors
    ///
    /// Fails on invalid JSON, a missing `input` object or a missing
    /// compiler version.
    pub fn parse(content: &str) -> Result<Self, MalformedReason> {
        let info: Value = serde_json::from_str(content)?;

        let source_input = match info.get("input") {
            Some(input) if input.is_object() => input.clone(),
            Some(_) => return Err(MalformedReason::InputNotObject),
            None => return Err(MalformedReason::MissingInput),
        };

        let raw_version = string_field(&info, "solcLongVersion")
            .or_else(|| string_field(&info, "solcVersion"))
            .ok_or(MalformedReason::MissingCompilerVersion)?;

        let settings = source_input.get("settings").filter(|s| s.is_object());
        let optimizer = settings
            .and_then(|s| s.get("optimizer"))
            .filter(|o| o.is_object());
        let optimizer_enabled =
            optimizer.and_then(|o| o.get("enabled")).and_then(Value::as_bool) == Some(true);
        let optimizer_runs = optimizer
            .and_then(|o| o.get("runs"))
            .filter(|_| optimizer_enabled)
            .and_then(runs_text)
            .unwrap_or_else(|| DEFAULT_OPTIMIZER_RUNS.to_string());
        let evm_version = settings.and_then(|s| string_field(s, "evmVersion"));

        Ok(Self {
            source_input,
            compiler_version: normalize_compiler_version(&raw_version),
            optimizer_enabled,
            optimizer_runs,
            evm_version,
        })
    }

    /// The full standard-JSON compiler input.
    pub const fn source_input(&self) -> &Value {
        &self.source_input
    }

    /// # Errors
    ///
    /// Fails only if the input can't be serialized back to JSON.
    pub fn source_code(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.source_input)
    }

    pub fn compiler_version(&self) -> &str {
        &self.compiler_version
    }

    pub const fn optimizer_enabled(&self) -> bool {
        self.optimizer_enabled
    }

    pub fn optimizer_runs(&self) -> &str {
        &self.optimizer_runs
    }

    pub fn evm_version(&self) -> Option<&str> {
        self.evm_version.as_deref()
    }
}

/// A non-empty string field of `value`; anything else counts as absent.
fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Positive whole run counts, given as a JSON number or a numeric string.
fn runs_text(runs: &Value) -> Option<String> {
    let count = match runs {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 1.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    count.filter(|c| *c > 0).map(|c| c.to_string())
}

/// Prefixes `version` with `v` unless it already starts with one.
pub fn normalize_compiler_version(version: &str) -> String {
    if version.starts_with('v') {
        version.to_string()
    } else {
        format!("v{version}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build_info(value: &Value) -> BuildArtifact {
        BuildArtifact::parse(&value.to_string()).unwrap()
    }

    #[test]
    fn test_prefers_long_version() {
        let artifact = build_info(&json!({
            "solcVersion": "0.8.24",
            "solcLongVersion": "0.8.24+commit.e11b9ed9",
            "input": { "language": "Solidity", "settings": {} }
        }));
        assert_eq!(artifact.compiler_version(), "v0.8.24+commit.e11b9ed9");
    }

    #[test]
    fn test_falls_back_to_short_version() {
        let artifact = build_info(&json!({
            "solcVersion": "0.8.24",
            "input": { "settings": {} }
        }));
        assert_eq!(artifact.compiler_version(), "v0.8.24");
    }

    #[test]
    fn test_empty_long_version_is_ignored() {
        let artifact = build_info(&json!({
            "solcVersion": "0.8.20",
            "solcLongVersion": "",
            "input": { "settings": {} }
        }));
        assert_eq!(artifact.compiler_version(), "v0.8.20");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        assert_eq!(normalize_compiler_version("0.8.24"), "v0.8.24");
        assert_eq!(normalize_compiler_version("v0.8.24"), "v0.8.24");
        let once = normalize_compiler_version("0.7.6+commit.7338295f");
        assert_eq!(normalize_compiler_version(&once), once);
    }

    #[test]
    fn test_disabled_optimizer_ignores_stray_runs() {
        let artifact = build_info(&json!({
            "solcVersion": "0.8.24",
            "input": { "settings": { "optimizer": { "enabled": false, "runs": 999 } } }
        }));
        assert!(!artifact.optimizer_enabled());
        assert_eq!(artifact.optimizer_runs(), "200");
    }

    #[test]
    fn test_optimizer_without_enabled_flag() {
        let artifact = build_info(&json!({
            "solcVersion": "0.8.24",
            "input": { "settings": { "optimizer": { "runs": 1000 } } }
        }));
        assert!(!artifact.optimizer_enabled());
        assert_eq!(artifact.optimizer_runs(), "200");
    }

    #[test]
    fn test_missing_optimizer() {
        let artifact = build_info(&json!({
            "solcVersion": "0.8.24",
            "input": { "settings": { "evmVersion": "paris" } }
        }));
        assert!(!artifact.optimizer_enabled());
        assert_eq!(artifact.optimizer_runs(), "200");
        assert_eq!(artifact.evm_version(), Some("paris"));
    }

    #[test]
    fn test_enabled_optimizer_runs() {
        let artifact = build_info(&json!({
            "solcVersion": "0.8.24",
            "input": { "settings": { "optimizer": { "enabled": true, "runs": 10000 } } }
        }));
        assert!(artifact.optimizer_enabled());
        assert_eq!(artifact.optimizer_runs(), "10000");
    }

    #[test]
    fn test_empty_evm_version_is_omitted() {
        let artifact = build_info(&json!({
            "solcVersion": "0.8.24",
            "input": { "settings": { "evmVersion": "" } }
        }));
        assert_eq!(artifact.evm_version(), None);
    }

    #[test]
    fn test_missing_input() {
        let err = BuildArtifact::parse(r#"{"solcVersion": "0.8.24"}"#).unwrap_err();
        assert!(matches!(err, MalformedReason::MissingInput));
    }

    #[test]
    fn test_input_not_object() {
        let err = BuildArtifact::parse(r#"{"solcVersion": "0.8.24", "input": "x"}"#).unwrap_err();
        assert!(matches!(err, MalformedReason::InputNotObject));
    }

    #[test]
    fn test_invalid_json() {
        let err = BuildArtifact::parse("not json").unwrap_err();
        assert!(matches!(err, MalformedReason::InvalidJson(_)));
    }

    #[test]
    fn test_missing_compiler_version() {
        let err = BuildArtifact::parse(r#"{"input": {"settings": {}}}"#).unwrap_err();
        assert!(matches!(err, MalformedReason::MissingCompilerVersion));
        assert!(err.to_string().contains("solcVersion"));
    }

    #[test]
    fn test_string_runs_are_coerced() {
        let artifact = build_info(&json!({
            "solcVersion": "0.8.24",
            "input": { "settings": { "optimizer": { "enabled": true, "runs": "200" } } }
        }));
        assert!(artifact.optimizer_enabled());
        assert_eq!(artifact.optimizer_runs(), "200");

        let artifact = build_info(&json!({
            "solcVersion": "0.8.24",
            "input": { "settings": { "optimizer": { "enabled": true, "runs": "1000" } } }
        }));
        assert_eq!(artifact.optimizer_runs(), "1000");
    }

    #[test]
    fn test_whole_float_runs_are_coerced() {
        let artifact = build_info(&json!({
            "solcVersion": "0.8.24",
            "input": { "settings": { "optimizer": { "enabled": true, "runs": 500.0 } } }
        }));
        assert_eq!(artifact.optimizer_runs(), "500");
    }

    #[test]
    fn test_unusable_runs_fall_back() {
        for runs in [json!("many"), json!(1.5), json!(null), json!(0), json!([200])] {
            let artifact = build_info(&json!({
                "solcVersion": "0.8.24",
                "input": { "settings": { "optimizer": { "enabled": true, "runs": runs } } }
            }));
            assert!(artifact.optimizer_enabled());
            assert_eq!(artifact.optimizer_runs(), "200");
        }
    }

    #[test]
    fn test_non_bool_enabled_is_disabled() {
        for enabled in [json!("true"), json!(1), json!(null)] {
            let artifact = build_info(&json!({
                "solcVersion": "0.8.24",
                "input": { "settings": { "optimizer": { "enabled": enabled, "runs": 1000 } } }
            }));
            assert!(!artifact.optimizer_enabled());
            assert_eq!(artifact.optimizer_runs(), "200");
        }
    }

    #[test]
    fn test_ill_typed_settings_are_absent() {
        for settings in [json!(null), json!("cancun"), json!([1, 2])] {
            let artifact = build_info(&json!({
                "solcVersion": "0.8.24",
                "input": { "settings": settings }
            }));
            assert!(!artifact.optimizer_enabled());
            assert_eq!(artifact.optimizer_runs(), "200");
            assert_eq!(artifact.evm_version(), None);
        }
    }

    #[test]
    fn test_ill_typed_optimizer_is_disabled() {
        let artifact = build_info(&json!({
            "solcVersion": "0.8.24",
            "input": { "settings": { "optimizer": true } }
        }));
        assert!(!artifact.optimizer_enabled());
    }

    #[test]
    fn test_non_string_evm_version_is_omitted() {
        let artifact = build_info(&json!({
            "solcVersion": "0.8.24",
            "input": { "settings": { "evmVersion": 8 } }
        }));
        assert_eq!(artifact.evm_version(), None);
    }

    #[test]
    fn test_non_string_long_version_falls_back() {
        let artifact = build_info(&json!({
            "solcVersion": "0.8.24",
            "solcLongVersion": 824,
            "input": {}
        }));
        assert_eq!(artifact.compiler_version(), "v0.8.24");
    }

    #[test]
    fn test_source_code_round_trips_input() {
        let input = json!({ "language": "Solidity", "sources": {}, "settings": {} });
        let artifact = build_info(&json!({ "solcVersion": "0.8.24", "input": input }));
        let parsed: Value = serde_json::from_str(&artifact.source_code().unwrap()).unwrap();
        assert_eq!(parsed, input);
    }
}
