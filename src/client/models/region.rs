//! Service regions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Host shared by the token endpoint and every regional endpoint
pub const SERVER_ROOT: &str = "api.labs.sophos.com";

/// Regionless root serving `/oauth2/token`
pub const AUTH_ROOT: &str = "https://api.labs.sophos.com";

/// Intelix deployment region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    /// Frankfurt
    #[default]
    #[serde(rename = "DE")]
    De,
}

impl Region {
    /// All supported regions, in display order.
    pub const ALL: [Region; 1] = [Region::De];

    /// Region code as used in configuration
    pub fn code(&self) -> &'static str {
        match self {
            Region::De => "DE",
        }
    }

    /// Base URL of the regional service endpoint
    pub fn base_url(&self) -> String {
        format!("https://{}.{}", self.code().to_ascii_lowercase(), SERVER_ROOT)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Region::ALL
            .into_iter()
            .find(|region| region.code() == code)
            .ok_or_else(|| ConfigError::UnknownRegion(s.to_string()))
    }
}
