//! Authenticated HTTP client for the platform REST API
//!
//! Wraps reqwest::Client with bearer-token injection and session refresh.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use thiserror::Error;

use crate::auth::TokenStore;
use crate::config::Config;

/// Error taxonomy for API responses.
///
/// Call sites that care about a specific status (the tenant fetch treats 404
/// as "no tenant yet") downcast the anyhow error to this.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("401 unauthorized -- session may be invalid, run 'bookdesk login'")]
    Unauthorized,
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Authenticated client for the platform API.
pub struct PortalClient {
    http: reqwest::Client,
    config: Config,
}

impl PortalClient {
    /// Load config and build client. Attempts a session refresh if the access
    /// token is expired and a refresh token exists.
    pub async fn new() -> Result<Self> {
        let mut config = Config::load()?;

        let needs_refresh = config.get_access_token().map_or(true, |t| t.is_expired());
        if needs_refresh {
            if config.get_refresh_token().is_some() {
                tracing::info!("Session missing or expired, refreshing...");
                match crate::auth::session::refresh().await {
                    Ok(true) => {
                        config = Config::load()?;
                        tracing::info!("Session refreshed");
                    }
                    Ok(false) => {
                        bail!("No refresh token available. Run 'bookdesk login'.");
                    }
                    Err(e) => {
                        bail!("Session refresh failed: {:#}. Run 'bookdesk login'.", e);
                    }
                }
            } else {
                bail!("Session expired and no refresh token. Run 'bookdesk login'.");
            }
        }

        Ok(Self {
            http: reqwest::Client::new(),
            config,
        })
    }

    fn access_token(&self) -> Result<String> {
        let token = self
            .config
            .get_access_token()
            .context("No session token. Run 'bookdesk login' first.")?;
        if token.is_expired() {
            bail!("Session token expired. Run 'bookdesk login'.");
        }
        Ok(token.token)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url(), path)
    }

    /// GET request with bearer auth.
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let token = self.access_token()?;
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        check_response(resp, &url).await
    }

    /// GET request with bearer auth and URL-encoded query parameters.
    pub async fn get_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<reqwest::Response> {
        let token = self.access_token()?;
        let url = self.url(path);
        tracing::debug!("GET {} (with query)", url);

        let resp = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .query(query)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        check_response(resp, &url).await
    }

    /// POST request with bearer auth and a JSON body.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let token = self.access_token()?;
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {} failed", url))?;

        check_response(resp, &url).await
    }

    /// PATCH request with bearer auth and a JSON body.
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let token = self.access_token()?;
        let url = self.url(path);
        tracing::debug!("PATCH {}", url);

        let resp = self
            .http
            .patch(&url)
            .bearer_auth(&token)
            .json(body)
            .send()
            .await
            .with_context(|| format!("PATCH {} failed", url))?;

        check_response(resp, &url).await
    }

    /// DELETE request with bearer auth.
    pub async fn delete(&self, path: &str) -> Result<reqwest::Response> {
        let token = self.access_token()?;
        let url = self.url(path);
        tracing::debug!("DELETE {}", url);

        let resp = self
            .http
            .delete(&url)
            .bearer_auth(&token)
            .send()
            .await
            .with_context(|| format!("DELETE {} failed", url))?;

        check_response(resp, &url).await
    }
}

/// Check HTTP response status and map failures into [`ApiError`].
///
/// 401 is logged and surfaced but triggers no redirect or retry here.
async fn check_response(resp: reqwest::Response, url: &str) -> Result<reqwest::Response> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        tracing::warn!("401 Unauthorized for {}", url);
        return Err(ApiError::Unauthorized.into());
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound.into());
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        }
        .into());
    }
    Ok(resp)
}
