use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use thiserror::Error;

lazy_static! {
    static ref ADDRESS_REGEX: Result<Regex, regex::Error> = Regex::new(r"^0x[a-fA-F0-9]{40}$");
    static ref QUALIFIED_NAME_REGEX: Result<Regex, regex::Error> =
        Regex::new(r"^[^:\s]+\.sol:[A-Za-z_$][A-Za-z0-9_$]*$");
}

fn compiled(regex: &'static Result<Regex, regex::Error>) -> Result<&'static Regex, ContractError> {
    regex.as_ref().map_err(|err| ContractError::Regex(err.clone()))
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("[E010] '{0}' is not a valid contract address\n\nSuggestions:\n  • Addresses start with 0x followed by 40 hexadecimal digits\n  • Copy the address from the deployment output or explorer page")]
    InvalidAddress(String),

    #[error("[E011] '{0}' is not a fully-qualified contract name\n\nSuggestions:\n  • Use the <path>:<ContractName> format\n  • Example: contracts/Token.sol:Token")]
    InvalidName(String),

    #[error("Contract validation regex error")]
    Regex(#[from] regex::Error),
}

impl ContractError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAddress(_) => "E010",
            Self::InvalidName(_) => "E011",
            Self::Regex(_) => "E999",
        }
    }
}

/// Address of a deployed contract, `0x` followed by 40 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractAddress(String);

impl ContractAddress {
    /// # Errors
    ///
    /// Will fail if `raw` isn't "0x" followed by exactly 40 hexadecimal
    /// digits. Surrounding whitespace is ignored.
    pub fn new(raw: &str) -> Result<Self, ContractError> {
        let trimmed = raw.trim();
        if compiled(&ADDRESS_REGEX)?.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ContractError::InvalidAddress(raw.to_string()))
        }
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContractAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Fully-qualified contract name in `<path>:<ContractName>` form, as
/// the explorer expects it for standard-JSON submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractName(String);

impl ContractName {
    /// # Errors
    ///
    /// Will fail unless `raw` is a Solidity source path followed by a
    /// colon and a valid contract identifier.
    pub fn new(raw: &str) -> Result<Self, ContractError> {
        if compiled(&QUALIFIED_NAME_REGEX)?.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ContractError::InvalidName(raw.to_string()))
        }
    }

    pub fn source_path(&self) -> &str {
        self.0.rsplit_once(':').map_or("", |(path, _)| path)
    }

    pub fn contract(&self) -> &str {
        self.0.rsplit_once(':').map_or("", |(_, name)| name)
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContractName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
