use serde::Deserialize;

// The token request has no body; its inputs go in the query string.

/// Raw token response from API.
#[derive(Deserialize)]
pub struct Response {
    pub value: String,
}
