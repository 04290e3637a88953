use log::warn;
use std::fmt;
use thiserror::Error;

/// Value shipped in `.env` templates; never a real key.
pub const PLACEHOLDER_API_KEY: &str = "your_etherscan_api_key_here";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("[E040] Explorer API key is not set\n\nSuggestions:\n  • Set ETHERSCAN_API_KEY in your environment\n  • Or pass --api-key on the command line")]
    MissingApiKey,

    #[error("[E041] Explorer API key is still the template placeholder\n\nSuggestions:\n  • Replace 'your_etherscan_api_key_here' with a key from your explorer account\n  • Verification will fail without a valid key")]
    PlaceholderApiKey,
}

impl ConfigError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "E040",
            Self::PlaceholderApiKey => "E041",
        }
    }
}

/// Explorer API credential. Redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// # Errors
    ///
    /// Will fail if the key is blank or the template placeholder.
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if key == PLACEHOLDER_API_KEY {
            return Err(ConfigError::PlaceholderApiKey);
        }
        if key.len() != 34 {
            warn!("Explorer API key has an unusual length ({}), requests may be rejected", key.len());
        }
        Ok(Self(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
