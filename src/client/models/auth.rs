//! Authentication models

use std::fmt;

use crate::error::ConfigError;

/// Access token sent verbatim in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a token string. Returns `None` for an empty or blank token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// The two accepted credential forms.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A pre-issued access token
    Token(AccessToken),

    /// Client credentials exchanged for a token on connect
    ClientSecret {
        client_id: String,
        client_secret: String,
    },
}

impl Credentials {
    /// Pick the credential form from optional inputs.
    ///
    /// Exactly one form must be present. Empty strings count as absent.
    pub fn resolve(
        client_id: Option<&str>,
        client_secret: Option<&str>,
        token: Option<&str>,
    ) -> Result<Self, ConfigError> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.filter(|v| !v.trim().is_empty())
        }

        let client_id = present(client_id);
        let client_secret = present(client_secret);
        let token = present(token);

        match (client_id, client_secret, token) {
            (None, None, Some(token)) => Ok(Credentials::Token(
                AccessToken::new(token).ok_or(ConfigError::MissingCredentials)?,
            )),
            (Some(_), _, Some(_)) | (_, Some(_), Some(_)) => {
                Err(ConfigError::ConflictingCredentials)
            }
            (Some(id), Some(secret), None) => Ok(Credentials::ClientSecret {
                client_id: id.to_string(),
                client_secret: secret.to_string(),
            }),
            (Some(_), None, None) | (None, Some(_), None) => {
                Err(ConfigError::IncompleteCredentials)
            }
            (None, None, None) => Err(ConfigError::MissingCredentials),
        }
    }

    /// Short human label for the credential form
    pub fn describe(&self) -> &'static str {
        match self {
            Credentials::Token(_) => "access token",
            Credentials::ClientSecret { .. } => "client id and secret",
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(token) => f.debug_tuple("Token").field(token).finish(),
            Credentials::ClientSecret { client_id, .. } => f
                .debug_struct("ClientSecret")
                .field("client_id", client_id)
                .field("client_secret", &"***")
                .finish(),
        }
    }
}
