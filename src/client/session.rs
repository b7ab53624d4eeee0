//! Authenticated session state

use super::models::{AccessToken, Region};

/// Resolved token and endpoint for the life of a client
#[derive(Debug, Clone)]
pub struct Session {
    region: Region,
    base_url: String,
    token: AccessToken,
}

impl Session {
    pub fn new(region: Region, base_url: impl Into<String>, token: AccessToken) -> Self {
        Self {
            region,
            base_url: base_url.into(),
            token,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }
}
