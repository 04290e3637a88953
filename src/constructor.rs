use alloy_primitives::{utils::parse_ether, Address, U256};
use alloy_sol_types::SolValue;
use std::{fmt, str::FromStr};
use thiserror::Error;

const WORD_SIZE: usize = 32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructorArgsError {
    #[error("[E030] Constructor arguments are not valid hex: {0}\n\nSuggestions:\n  • Pass the ABI-encoded arguments as a hex string\n  • The 0x prefix is optional")]
    InvalidHex(String),

    #[error("[E031] Constructor arguments must be whole 32-byte words, got {0} bytes\n\nSuggestions:\n  • Each argument is zero-padded to 32 bytes by ABI encoding\n  • Use --arg TYPE:VALUE to let the tool encode them")]
    UnalignedLength(usize),

    #[error("[E032] Invalid constructor argument '{arg}': {reason}\n\nSuggestions:\n  • Use TYPE:VALUE, e.g. uint256:100ether, address:0x.., bool:true\n  • uint256 values are wei unless suffixed with 'ether'")]
    InvalidArgument { arg: String, reason: String },
}

impl ConstructorArgsError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidHex(_) => "E030",
            Self::UnalignedLength(_) => "E031",
            Self::InvalidArgument { .. } => "E032",
        }
    }
}

/// A single static constructor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiArg {
    Uint(U256),
    Address(Address),
    Bool(bool),
}

impl AbiArg {
    /// ABI-encodes the argument into one 32-byte word.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Uint(value) => value.abi_encode(),
            Self::Address(value) => value.abi_encode(),
            Self::Bool(value) => value.abi_encode(),
        }
    }
}

impl FromStr for AbiArg {
    type Err = ConstructorArgsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ConstructorArgsError::InvalidArgument {
            arg: raw.to_string(),
            reason,
        };

        let (kind, value) = raw
            .split_once(':')
            .ok_or_else(|| invalid("expected TYPE:VALUE".to_string()))?;
        let value = value.trim();

        match kind.trim() {
            "uint" | "uint256" => parse_uint(value).map(Self::Uint).map_err(invalid),
            "address" => Address::from_str(value)
                .map(Self::Address)
                .map_err(|e| invalid(e.to_string())),
            "bool" => bool::from_str(value)
                .map(Self::Bool)
                .map_err(|e| invalid(e.to_string())),
            other => Err(invalid(format!("unsupported type '{other}'"))),
        }
    }
}

fn parse_uint(value: &str) -> Result<U256, String> {
    if let Some(amount) = value.strip_suffix("ether") {
        return parse_ether(amount.trim()).map_err(|e| e.to_string());
    }
    let wei = value.strip_suffix("wei").map_or(value, str::trim);
    U256::from_str_radix(wei, 10).map_err(|e| e.to_string())
}

/// ABI-encoded constructor arguments as lowercase hex without a `0x`
/// prefix, the form the explorer expects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorArgs(String);

impl ConstructorArgs {
    /// No constructor arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Will fail if `raw` isn't hex or doesn't decode to whole 32-byte
    /// words.
    pub fn from_hex(raw: &str) -> Result<Self, ConstructorArgsError> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|e| ConstructorArgsError::InvalidHex(e.to_string()))?;
        if bytes.len() % WORD_SIZE != 0 {
            return Err(ConstructorArgsError::UnalignedLength(bytes.len()));
        }
        Ok(Self(hex::encode(bytes)))
    }

    /// Encodes `args` in order, each padded to a 32-byte word.
    pub fn encode(args: &[AbiArg]) -> Self {
        let bytes: Vec<u8> = args.iter().flat_map(AbiArg::encode).collect();
        Self(hex::encode(bytes))
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ConstructorArgs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
