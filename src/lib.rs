//! # Etherscan Verifier
//!
//! A Rust library for verifying deployed Solidity contracts on
//! Etherscan-compatible block explorers. It reads the compiler's build
//! artifact, submits the standard-JSON input with the matching compiler
//! settings and polls the explorer until the verification job finishes.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use camino::Utf8Path;
//! use url::Url;
//! use verifier::{
//!     api::{ApiClient, VerificationRequest},
//!     artifact::BuildArtifact,
//!     config::ApiKey,
//!     constructor::ConstructorArgs,
//!     contract::{ContractAddress, ContractName},
//!     verification::VerificationClient,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let artifact = BuildArtifact::load(Utf8Path::new("artifacts/build-info/solc.json"))?;
//! let request = VerificationRequest::new(
//!     &artifact,
//!     ContractAddress::new("0x0eFbf4be712Ed78f899b306B5d919Bb167676ebe")?,
//!     ContractName::new("contracts/KipuBank.sol:KipuBank")?,
//!     ConstructorArgs::from_hex("0x")?,
//! )?;
//!
//! let api = ApiClient::new(Url::parse("https://api-sepolia.etherscan.io/api")?)?;
//! let client = VerificationClient::new(api);
//! let key = ApiKey::new("YOUR_API_KEY")?;
//! let job = client.verify(&request, &key)?;
//! println!("{}: {:?}", job.state(), job.last_message());
//! # Ok(())
//! # }
//! ```

/// Explorer API client, request models and the status poll loop
pub mod api;

/// Build-artifact loading and compiler settings extraction
pub mod artifact;

/// Explicit configuration values such as the API key
pub mod config;

/// Constructor argument ABI encoding
pub mod constructor;

/// Validated contract address and fully-qualified name
pub mod contract;

/// Deployed address lookup from deployment artifacts
pub mod deployment;

/// Error types with codes and actionable suggestions
pub mod errors;

/// Submission and polling workflow
pub mod verification;
