//! Login and logout.
//!
//! Both end in a hard navigation to the login page so the auth context is
//! rebuilt from the new session rather than patched in place.

use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::router::Route;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Username and password required")]
    MissingCredentials,

    #[error("Login request failed: {0}")]
    Request(#[from] ApiError),

    #[error("Failed to save session: {0}")]
    Storage(String),
}

impl LoginError {
    /// Message for the login form. Server and network failures are not
    /// told apart from a wrong password.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoginError::MissingCredentials => "Username and password required",
            LoginError::Request(_) | LoginError::Storage(_) => INVALID_CREDENTIALS_MESSAGE,
        }
    }
}

/// Sign in: exchange credentials, store both tokens, reload at `/login`
/// (which forwards a signed-in visitor to the inventory page).
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<(), LoginError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(LoginError::MissingCredentials);
    }

    let response = client.login(username, password).await.map_err(|e| {
        error!(error = %e, "Login failed");
        LoginError::from(e)
    })?;

    client
        .tokens()
        .set(&response.access_token, &response.refresh_token)
        .map_err(|e| {
            error!(error = %e, "Failed to save session");
            LoginError::Storage(e.to_string())
        })?;

    info!(username, "Login successful");
    client.navigator().hard_navigate(Route::Login);
    Ok(())
}

/// Sign out: notify the server (best effort), then always drop the local
/// session and reload at `/login`. The server's answer is returned.
pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    let result = match client.tokens().refresh_token() {
        Some(refresh_token) => client.logout(&refresh_token).await,
        None => Ok(()),
    };
    if let Err(ref e) = result {
        warn!(error = %e, "Server logout failed");
    }

    if let Err(e) = client.tokens().clear() {
        warn!(error = %e, "Failed to clear session");
    }
    info!("Logged out");
    client.navigator().hard_navigate(Route::Login);
    result
}
