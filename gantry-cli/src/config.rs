//! Configuration module
//!
//! Handles CLI configuration including the server URL and credentials.

use gantry_client::GantryClient;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Gantry server
    pub server_url: String,

    /// Bearer token for authenticated endpoints
    pub token: Option<String>,
}

impl Config {
    /// Build an API client from this configuration
    pub fn client(&self) -> GantryClient {
        let client = GantryClient::new(&self.server_url);
        match &self.token {
            Some(token) => client.with_token(token),
            None => client,
        }
    }
}
