//! Password and refresh-token grants against the session provider

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::TokenStore;
use crate::config::Config;

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    user: Option<SessionUser>,
}

#[derive(Debug, Deserialize)]
struct SessionUser {
    email: Option<String>,
}

/// Request a session with the given grant type and JSON body.
async fn token_request(
    config: &Config,
    grant_type: &str,
    body: &serde_json::Value,
) -> Result<SessionResponse> {
    let url = format!("{}/token?grant_type={}", config.auth_url(), grant_type);
    tracing::debug!("Session POST {}", url);

    let mut req = reqwest::Client::new().post(&url).json(body);
    if let Some(ref key) = config.publishable_key {
        req = req.header("apikey", key);
    }

    let resp = req
        .send()
        .await
        .with_context(|| format!("Session request to {} failed", url))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("Session provider returned {}: {}", status.as_u16(), body);
    }

    resp.json()
        .await
        .context("Failed to parse session response")
}

/// Store a session response in the config.
fn store_session(config: &mut Config, session: SessionResponse) {
    config.set_access_token(session.access_token, session.expires_in);
    if let Some(refresh) = session.refresh_token {
        config.set_refresh_token(refresh);
    }
    if let Some(email) = session.user.and_then(|u| u.email) {
        config.user_email = Some(email);
    }
}

/// Log in with email and password (password grant).
///
/// Skips the network round-trip when a valid session already exists, unless
/// `force` is set.
pub async fn login(email: &str, password: &str, force: bool) -> Result<()> {
    let mut config = Config::load()?;

    if !force {
        if let Some(token) = config.get_access_token() {
            if !token.is_expired() {
                println!(
                    "Already logged in as {}. Use --force to re-authenticate.",
                    config.user_email.as_deref().unwrap_or(email)
                );
                return Ok(());
            }
        }
    }

    let body = serde_json::json!({ "email": email, "password": password });
    let session = token_request(&config, "password", &body).await?;
    store_session(&mut config, session);
    if config.user_email.is_none() {
        config.user_email = Some(email.to_string());
    }
    config.save()?;

    println!("Logged in as {}.", email);
    Ok(())
}

/// Refresh the access token using the stored refresh token.
///
/// Returns Ok(true) if a new session was stored, Ok(false) when no refresh
/// token is available.
pub async fn refresh() -> Result<bool> {
    let mut config = Config::load()?;
    let refresh_token = match config.get_refresh_token() {
        Some(rt) => rt,
        None => return Ok(false),
    };

    tracing::info!("Refreshing session token...");
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let session = token_request(&config, "refresh_token", &body).await?;
    store_session(&mut config, session);
    config.save()?;

    Ok(true)
}

/// Log out and clear the stored session.
pub async fn logout() -> Result<()> {
    let mut config = Config::load()?;
    config.clear_tokens();
    config.save()?;
    println!("Logged out. Stored session cleared.");
    Ok(())
}

/// Display current session status.
pub async fn status() -> Result<()> {
    let config = Config::load()?;

    match config.user_email {
        Some(ref email) => println!("Account:     {}", email),
        None => println!("Account:     (none)"),
    }

    match config.get_access_token() {
        Some(token) if !token.is_expired() => {
            println!("Session:     valid");
            if let Some(exp) = token.expires_at {
                println!("  expires_at: {}", exp);
            }
        }
        Some(_) => println!("Session:     expired"),
        None => println!("Session:     none"),
    }

    match config.get_refresh_token() {
        Some(_) => println!("Refresh tok: present"),
        None => println!("Refresh tok: none"),
    }

    println!("API URL:     {}", config.api_url());
    println!("Auth URL:    {}", config.auth_url());

    if config.get_access_token().is_none() {
        println!("\nRun 'bookdesk login' to authenticate.");
    }

    Ok(())
}
