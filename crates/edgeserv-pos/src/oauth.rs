use std::fmt;

use reqwest::Client;
use tracing::debug;

use crate::{
    api_interfaces::oauth, client::Credentials, constants::OAUTH_GRANT_TYPE, error::GetError,
};

/// Bearer token issued by the token endpoint.
///
/// Tokens are not cached or refreshed: every customer listing fetches a new one.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthToken {
    value: String,
}

impl OAuthToken {
    /// Exchange the credentials for a token.
    ///
    /// * `client` - The reqwest HTTP client to use for the request.
    /// * `token_url` - Full URL of the token endpoint, without a query string.
    /// * `credentials` - Sent as query parameters along with the `password` grant type.
    ///
    /// The response status is not checked: whatever body comes back is parsed
    /// as `{"value": "..."}`.
    pub async fn fetch(
        client: &Client,
        token_url: &str,
        credentials: &Credentials,
    ) -> Result<Self, GetError> {
        debug!(url = token_url, "requesting OAuth token");
        let response = client
            .get(token_url)
            .query(&[
                ("grant_type", OAUTH_GRANT_TYPE),
                ("client_id", credentials.client_id()),
                ("client_secret", credentials.client_secret()),
                ("username", credentials.username()),
                ("password", credentials.password()),
            ])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await.map_err(GetError::ResponseBodyError)?;
        let parsed_body: oauth::Response = serde_json::from_str(&body)
            .map_err(|source| GetError::ParseError { status, source })?;
        debug!(%status, "received OAuth token");
        Ok(Self {
            value: parsed_body.value,
        })
    }

    /// From a raw token string.
    pub fn from_raw(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    pub fn get(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

impl fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OAuthToken(..)")
    }
}
