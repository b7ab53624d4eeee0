//! Intelix HTTP transport built on reqwest

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::models::{AUTH_ROOT, AccessToken, Region};
use super::{FileUpload, IntelixApi};
use crate::error::{ApiError, Result};

/// reqwest-backed [`IntelixApi`]
pub struct IntelixHttp {
    http: HttpClient,
    base_url: String,
    auth_root: String,
}

impl IntelixHttp {
    /// Create a transport for explicit service and token roots.
    pub fn new(
        base_url: impl Into<String>,
        auth_root: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_root: auth_root.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a transport for a region, or for a single host serving both
    /// the token endpoint and the service API.
    pub fn for_region(region: Region, api_host: Option<&str>, timeout: Duration) -> Result<Self> {
        match api_host {
            Some(host) => Self::new(host, host, timeout),
            None => Self::new(region.base_url(), AUTH_ROOT, timeout),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a service response. Every status except 401 yields its JSON body.
    async fn read_json(response: Response) -> Result<Value> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized.into());
        }

        let text = response.text().await.map_err(ApiError::from)?;
        let body = serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!(
                "Failed to parse response (status {}): {}",
                status, e
            ))
        })?;
        Ok(body)
    }
}

#[async_trait]
impl IntelixApi for IntelixHttp {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request_token(&self, client_id: &str, client_secret: &str) -> Result<AccessToken> {
        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
        }

        let url = format!("{}/oauth2/token", self.auth_root);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::AuthenticationFailed(status).into());
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        let token: TokenResponse = serde_json::from_str(&response_text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse token response: {}", e))
        })?;

        AccessToken::new(token.access_token).ok_or_else(|| {
            ApiError::InvalidResponse("Token response carried an empty access_token".to_string())
                .into()
        })
    }

    async fn get(&self, token: &AccessToken, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        debug!("GET {}", path);

        let mut request = self
            .http
            .get(self.url(path))
            .header(AUTHORIZATION, token.as_str());
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        Self::read_json(response).await
    }

    async fn upload(&self, token: &AccessToken, path: &str, file: FileUpload) -> Result<Value> {
        debug!("POST {} ({}, {} bytes)", path, file.file_name, file.bytes.len());

        let part = Part::bytes(file.bytes).file_name(file.file_name);
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.url(path))
            .header(AUTHORIZATION, token.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::from)?;
        Self::read_json(response).await
    }
}
