use thiserror::Error;

#[derive(Debug, Error)]
pub enum GetError {
    #[error("the request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("the response body could not be read: {0}")]
    ResponseBodyError(#[source] reqwest::Error),
    /// The body was not the expected JSON. The status is kept because error
    /// pages from the server end up here rather than as a status error.
    #[error("unable to parse the response body (status {status}): {source}")]
    ParseError {
        status: reqwest::StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ListCustomersError {
    #[error("error getting OAuth token: {0}")]
    TokenError(#[source] GetError),
    #[error("error fetching customer list: {0}")]
    CustomerListError(#[source] GetError),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read the file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("unable to parse the file: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("unable to write the file: {0}")]
    WriteError(#[from] std::io::Error),
    #[error("unable to serialize the data: {0}")]
    SerializeError(#[from] serde_json::Error),
}
