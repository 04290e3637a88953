use log::debug;
use reqwest::{
    blocking::{self, Client, Response},
    StatusCode,
};
use url::Url;

use crate::{config::ApiKey, errors::RequestFailure};

use super::errors::ApiClientError;
use super::models::ExplorerResponse;

/// The two explorer endpoints the verification workflow talks to.
///
/// [`ApiClient`] is the HTTP implementation; tests substitute their own.
pub trait ExplorerApi {
    /// Sends one `verifysourcecode` form, exactly once.
    ///
    /// # Errors
    ///
    /// Will return `Err` on transport failure or an unreadable response.
    fn submit_verification(
        &self,
        form: &[(&'static str, String)],
    ) -> Result<ExplorerResponse, ApiClientError>;

    /// Queries `checkverifystatus` for `guid` once.
    ///
    /// # Errors
    ///
    /// Will return `Err` on transport failure or an unreadable response.
    fn check_verification_status(
        &self,
        guid: &str,
        api_key: &ApiKey,
    ) -> Result<ExplorerResponse, ApiClientError>;
}

#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    client: Client,
}

impl ApiClient {
    /// # Errors
    ///
    /// Fails if provided `Url` cannot be a base.
    pub fn new(base: Url) -> Result<Self, ApiClientError> {
        if base.cannot_be_a_base() {
            Err(ApiClientError::CannotBeBase(base))
        } else {
            Ok(Self {
                base,
                client: blocking::Client::new(),
            })
        }
    }

    pub const fn base(&self) -> &Url {
        &self.base
    }

    fn read_response(url: &Url, response: Response) -> Result<ExplorerResponse, ApiClientError> {
        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| ApiClientError::Reqwest(e.without_url()))?;
        debug!("Raw API Response: {response_text}");

        if status != StatusCode::OK {
            return Err(ApiClientError::from(RequestFailure::new(
                url.clone(),
                status,
                response_text,
            )));
        }

        let data: ExplorerResponse =
            serde_json::from_str(&response_text).map_err(|source| ApiClientError::Json {
                url: url.clone(),
                source,
            })?;
        debug!(
            "Parsed API Response: status={}, message={:?}, result={:?}",
            data.status, data.message, data.result
        );
        Ok(data)
    }
}

impl ExplorerApi for ApiClient {
    fn submit_verification(
        &self,
        form: &[(&'static str, String)],
    ) -> Result<ExplorerResponse, ApiClientError> {
        let response = self
            .client
            .post(self.base.clone())
            .form(form)
            .send()
            .map_err(ApiClientError::Reqwest)?;

        Self::read_response(&self.base, response)
    }

    fn check_verification_status(
        &self,
        guid: &str,
        api_key: &ApiKey,
    ) -> Result<ExplorerResponse, ApiClientError> {
        let response = self
            .client
            .get(self.base.clone())
            .query(&[
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
                ("apikey", api_key.expose()),
            ])
            .send()
            .map_err(|e| ApiClientError::Reqwest(e.without_url()))?;

        // The query carries the API key, errors only mention the base URL.
        Self::read_response(&self.base, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_base_url() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        let err = ApiClient::new(url).err().unwrap();
        assert_eq!(err.error_code(), "E006");
    }

    #[test]
    fn test_keeps_base_url() {
        let url = Url::parse("https://api-sepolia.etherscan.io/api").unwrap();
        let client = ApiClient::new(url.clone()).unwrap();
        assert_eq!(client.base(), &url);
    }
}
