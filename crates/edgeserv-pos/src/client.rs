use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::{
    constants::{CUSTOMER_LIST_PATH, OAUTH_TOKEN_PATH},
    error::{GetError, ListCustomersError},
    util::default_http_client,
    Customers, OAuthToken,
};

/// Client for one restaurant on an EdgeServ back office.
///
/// Clone is cheap: the reqwest client is reference counted and clones share
/// its connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    http_client: reqwest::Client,
    host: String,
    restaurant_code: String,
    credentials: Credentials,
}

/// OAuth password-grant credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(client_id: &str, client_secret: &str, username: &str, password: &str) -> Self {
        Self {
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientConfigError {
    #[error("the host is missing")]
    MissingHost,
    #[error("the restaurant code is missing")]
    MissingRestaurantCode,
}

#[derive(Debug, Error)]
pub enum ClientInitError {
    #[error("invalid client configuration: {0}")]
    InvalidConfig(#[from] ClientConfigError),
    #[error("unable to build the HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl Client {
    pub fn new(
        http_client: reqwest::Client,
        host: &str,
        restaurant_code: &str,
        credentials: Credentials,
    ) -> Result<Self, ClientInitError> {
        if host.trim().is_empty() {
            return Err(ClientConfigError::MissingHost.into());
        }
        if restaurant_code.trim().is_empty() {
            return Err(ClientConfigError::MissingRestaurantCode.into());
        }
        Ok(Self {
            http_client,
            host: host.trim_end_matches('/').to_owned(),
            restaurant_code: restaurant_code.to_owned(),
            credentials,
        })
    }

    /// Build a client around [`default_http_client`].
    pub fn with_default_http(
        host: &str,
        restaurant_code: &str,
        credentials: Credentials,
    ) -> Result<Self, ClientInitError> {
        Self::new(default_http_client()?, host, restaurant_code, credentials)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn restaurant_code(&self) -> &str {
        &self.restaurant_code
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// `{host}/{restaurant_code}/{path}`
    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.host, self.restaurant_code, path)
    }

    /// Exchange the configured credentials for a fresh token.
    pub async fn get_oauth_token(&self) -> Result<OAuthToken, GetError> {
        let url = self.endpoint_url(OAUTH_TOKEN_PATH);
        OAuthToken::fetch(&self.http_client, &url, &self.credentials).await
    }

    /// Fetch the restaurant's customer roster.
    ///
    /// Requests a new token first; if that fails the list endpoint is not called.
    pub async fn list_customers(&self) -> Result<Customers, ListCustomersError> {
        let token = self
            .get_oauth_token()
            .await
            .map_err(ListCustomersError::TokenError)?;
        self.list_customers_with_token(&token).await
    }

    /// Fetch the roster with a token the caller already holds.
    pub async fn list_customers_with_token(
        &self,
        token: &OAuthToken,
    ) -> Result<Customers, ListCustomersError> {
        let url = self.endpoint_url(CUSTOMER_LIST_PATH);
        let customers = Customers::fetch(&self.http_client, &url, token)
            .await
            .map_err(ListCustomersError::CustomerListError)?;
        debug!(
            restaurant_code = %self.restaurant_code,
            count = customers.len(),
            "listed customers"
        );
        Ok(customers)
    }
}
