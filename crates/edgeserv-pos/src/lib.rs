//! Client for an EdgeServ point-of-sale back office.
//!
//! Exchanges OAuth password-grant credentials for a bearer token and uses it
//! to fetch a restaurant's customer roster.

mod api_interfaces;
pub mod client;
pub mod constants;
pub mod customers;
pub mod error;
pub mod oauth;
mod util;

pub use client::{Client, Credentials};
pub use customers::{Address, Customer, Customers};
pub use oauth::OAuthToken;
pub use util::default_http_client;
