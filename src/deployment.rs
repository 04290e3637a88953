use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;
use thiserror::Error;

use crate::contract::{ContractAddress, ContractError};

#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error("[E050] Failed to read deployment artifact {path}: {source}\n\nSuggestions:\n  • Deploy the contract first\n  • Check the chain id and module name in the path")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[E051] Deployment artifact {path} is not valid JSON: {source}")]
    Json {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("[E052] Address field not found in deployment artifact {0}")]
    MissingAddress(Utf8PathBuf),

    #[error("[E053] No deployment artifact specified\n\nSuggestions:\n  • Pass --deployment <FILE>\n  • Or pass both --module and --contract")]
    NoArtifact,

    #[error(transparent)]
    Address(#[from] ContractError),
}

impl DeploymentError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "E050",
            Self::Json { .. } => "E051",
            Self::MissingAddress(_) => "E052",
            Self::NoArtifact => "E053",
            Self::Address(e) => e.error_code(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeployedContract {
    address: Option<String>,
}

/// Conventional location of an Ignition deployment artifact, relative
/// to `root`.
pub fn ignition_artifact_path(
    root: &Utf8Path,
    chain_id: u64,
    module: &str,
    contract: &str,
) -> Utf8PathBuf {
    root.join("ignition")
        .join("deployments")
        .join(format!("chain-{chain_id}"))
        .join("artifacts")
        .join(format!("{module}#{contract}.json"))
}

/// Reads the deployed address recorded in a deployment artifact.
///
/// # Errors
///
/// Will return `Err` if the file can't be read or parsed, or if the
/// `address` field is missing or isn't a valid address.
pub fn read_deployed_address(path: &Utf8Path) -> Result<ContractAddress, DeploymentError> {
    let content = fs::read_to_string(path).map_err(|source| DeploymentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let deployed: DeployedContract =
        serde_json::from_str(&content).map_err(|source| DeploymentError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let address = deployed
        .address
        .filter(|a| !a.is_empty())
        .ok_or_else(|| DeploymentError::MissingAddress(path.to_path_buf()))?;

    Ok(ContractAddress::new(&address)?)
}
