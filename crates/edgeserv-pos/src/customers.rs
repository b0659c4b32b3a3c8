use std::{path::Path, sync::LazyLock};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::{error::*, util::null_as_default, OAuthToken};

/// Request body for listing every customer of the restaurant.
static LIST_ALL_REQUEST_BODY: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "serverId": null,
        "searchValue": "",
        "addressRequired": false,
        "zipRequired": false,
    })
});

/// A customer record as the back office returns it.
///
/// Missing and `null` fields decode to their default value.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    #[serde(deserialize_with = "null_as_default")]
    pub server_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub point: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_numbers: Vec<String>,
    /// Epoch seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub last_visit_date: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub addresses: Vec<Address>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub zip_code: String,
}

/// A restaurant's customer roster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Customers(Vec<Customer>);

impl Customers {
    /// Retrieve the full roster from the customer list endpoint.
    ///
    /// The whole roster comes back in one response; there is no paging.
    pub async fn fetch(
        client: &Client,
        list_url: &str,
        token: &OAuthToken,
    ) -> Result<Self, GetError> {
        debug!(url = list_url, "requesting customer list");
        let response = client
            .post(list_url)
            .header("Content-Type", "application/json")
            .bearer_auth(token.get())
            .body(LIST_ALL_REQUEST_BODY.to_string())
            .send()
            .await?;
        let status = response.status();
        let response_body = response.text().await.map_err(GetError::ResponseBodyError)?;
        let customers: Vec<Customer> = serde_json::from_str(&response_body)
            .map_err(|source| GetError::ParseError { status, source })?;
        debug!(%status, count = customers.len(), "received customer list");
        Ok(Self(customers))
    }

    /// Load a roster previously written by [`Customers::save`].
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file_contents = tokio::fs::read_to_string(path).await?;
        let parsed_body: Vec<Customer> = serde_json::from_str(&file_contents)?;
        Ok(Self(parsed_body))
    }

    /// Write the roster as a JSON array using the server's field names.
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SaveError> {
        let serialized = serde_json::to_string(&self.0)?;
        tokio::fs::write(path, serialized).await?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Customer> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Customer> {
        self.0
    }
}

impl From<Vec<Customer>> for Customers {
    fn from(customers: Vec<Customer>) -> Self {
        Self(customers)
    }
}

impl IntoIterator for Customers {
    type Item = Customer;
    type IntoIter = std::vec::IntoIter<Customer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Customers {
    type Item = &'a Customer;
    type IntoIter = std::slice::Iter<'a, Customer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FAKE_TOKEN: &str = "test-token";
    const FAKE_BEARER: &str = "Bearer test-token";

    fn fake_customer() -> Customer {
        Customer {
            server_id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email_address: "john.doe@example.com".to_string(),
            point: 100,
            phone_numbers: vec!["555-1234".to_string()],
            last_visit_date: 1640995200,
            addresses: vec![Address {
                address: "123 Main St".to_string(),
                address2: "Apt 4B".to_string(),
                city: "Anytown".to_string(),
                state: "CA".to_string(),
                zip_code: "12345".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn fetch_success() {
        // Arrange
        let server = MockServer::start_async().await;
        let response_json = json!([
            {
                "serverId": 1,
                "firstName": "John",
                "lastName": "Doe",
                "emailAddress": "john.doe@example.com",
                "point": 100,
                "phoneNumbers": ["555-1234"],
                "lastVisitDate": 1640995200,
                "addresses": [
                    {
                        "address": "123 Main St",
                        "address2": "Apt 4B",
                        "city": "Anytown",
                        "state": "CA",
                        "zipCode": "12345"
                    }
                ]
            }
        ]);
        let list_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/customer/list")
                    .header("authorization", FAKE_BEARER)
                    .json_body(LIST_ALL_REQUEST_BODY.clone());
                then.status(200).json_body(response_json);
            })
            .await;
        let url = server.url("/customer/list");
        let client = reqwest::Client::new();

        // Act
        let customers =
            Customers::fetch(&client, &url, &OAuthToken::from_raw(FAKE_TOKEN)).await;

        // Assert
        assert!(
            customers.is_ok(),
            "Failed to get customers: {:?}",
            customers.unwrap_err()
        );
        let customers = customers.unwrap().into_inner();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0], fake_customer());
        assert_eq!(customers[0].addresses.len(), 1);
        list_mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_missing_and_null_fields_default() {
        // Arrange
        let server = MockServer::start_async().await;
        let list_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/customer/list");
                then.status(200).json_body(json!([
                    {
                        "serverId": 7,
                        "firstName": "Jane",
                        "emailAddress": null,
                        "phoneNumbers": null,
                        "addresses": [{ "city": "Springfield" }]
                    }
                ]));
            })
            .await;
        let url = server.url("/customer/list");
        let client = reqwest::Client::new();

        // Act
        let customers =
            Customers::fetch(&client, &url, &OAuthToken::from_raw(FAKE_TOKEN)).await;

        // Assert
        let customers = customers.unwrap().into_inner();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].server_id, 7);
        assert_eq!(customers[0].first_name, "Jane");
        assert_eq!(customers[0].last_name, "");
        assert_eq!(customers[0].email_address, "");
        assert_eq!(customers[0].point, 0);
        assert!(customers[0].phone_numbers.is_empty());
        assert_eq!(customers[0].last_visit_date, 0);
        assert_eq!(customers[0].addresses[0].city, "Springfield");
        assert_eq!(customers[0].addresses[0].zip_code, "");
        list_mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_empty_roster() {
        // Arrange
        let server = MockServer::start_async().await;
        let list_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/customer/list");
                then.status(200).json_body(json!([]));
            })
            .await;
        let url = server.url("/customer/list");
        let client = reqwest::Client::new();

        // Act
        let customers =
            Customers::fetch(&client, &url, &OAuthToken::from_raw(FAKE_TOKEN)).await;

        // Assert
        assert!(customers.unwrap().is_empty());
        list_mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_bad_json() {
        // Arrange
        let server = MockServer::start_async().await;
        let list_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/customer/list");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .body(r#"{"error": "something is amiss" }"#);
            })
            .await;
        let url = server.url("/customer/list");
        let client = reqwest::Client::new();

        // Act
        let customers =
            Customers::fetch(&client, &url, &OAuthToken::from_raw(FAKE_TOKEN)).await;

        // Assert
        assert!(customers.is_err());
        assert!(matches!(
            customers.unwrap_err(),
            GetError::ParseError { .. }
        ));
        list_mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_invalid_url() {
        // Arrange
        let client = reqwest::Client::new();

        // Act
        let customers = Customers::fetch(
            &client,
            "http://test.invalid/customer/list",
            &OAuthToken::from_raw(FAKE_TOKEN),
        )
        .await;

        // Assert
        assert!(matches!(customers.unwrap_err(), GetError::RequestError(_)));
    }

    #[tokio::test]
    async fn load_success() {
        // Arrange
        let file_json = json!([fake_customer()]).to_string();
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", file_json).unwrap();

        // Act
        let customers = Customers::load(temp_file.path()).await;

        // Assert
        assert!(
            customers.is_ok(),
            "Failed to load customers: {:?}",
            customers.unwrap_err()
        );
        let customers = customers.unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers.iter().next(), Some(&fake_customer()));
    }

    #[tokio::test]
    async fn load_invalid_file() {
        // Act
        let customers = Customers::load("totally_nonexistent.json").await;

        // Assert
        assert!(matches!(customers.unwrap_err(), LoadError::ReadError(_)));
    }

    #[tokio::test]
    async fn load_bad_json() {
        // Arrange
        let mut temp_file = NamedTempFile::new().unwrap();
        let json = json!({"not": "a roster"}).to_string();
        write!(temp_file, "{}", json).unwrap();

        // Act
        let customers = Customers::load(temp_file.path()).await;

        // Assert
        assert!(matches!(customers.unwrap_err(), LoadError::ParseError(_)));
    }

    #[tokio::test]
    async fn save_and_load_successful() {
        // Arrange
        let customers = Customers::from(vec![fake_customer()]);
        let temp_file = NamedTempFile::new().unwrap();

        // Act
        let save_result = customers.save(temp_file.path()).await;

        // Assert
        assert!(
            save_result.is_ok(),
            "Failed to save customers: {:?}",
            save_result.unwrap_err()
        );
        let saved = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(saved.contains("\"zipCode\":\"12345\""));
        let loaded_customers = Customers::load(temp_file.path()).await.unwrap();
        assert_eq!(loaded_customers, customers);
    }
}
