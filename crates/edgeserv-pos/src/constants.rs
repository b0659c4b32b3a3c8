/// Path of the OAuth token endpoint, relative to `{host}/{restaurant_code}/`
pub const OAUTH_TOKEN_PATH: &str = "oauth/token";

/// Path of the customer list endpoint, relative to `{host}/{restaurant_code}/`
pub const CUSTOMER_LIST_PATH: &str = "backofhouse/customer/list";

/// The only grant type the token endpoint is called with
pub const OAUTH_GRANT_TYPE: &str = "password";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths_are_relative() {
        assert!(!OAUTH_TOKEN_PATH.starts_with('/'));
        assert!(!CUSTOMER_LIST_PATH.starts_with('/'));
    }
}
