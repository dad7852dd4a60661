//! API client for communicating with the inventory REST API.
//!
//! This module provides the `ApiClient` struct. Every request goes through
//! `ApiClient::send`, which attaches the stored access token and recovers
//! from an expired one by refreshing the session once.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::auth::TokenStore;
use crate::models::{Inventory, InventoryBulk, Item, Store, User};
use crate::navigation::Navigator;
use crate::router::Route;

use super::transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
use super::ApiError;

// ============================================================================
// Endpoints
// ============================================================================

pub const LOGIN_PATH: &str = "/users/login";
pub const REFRESH_PATH: &str = "/users/refresh";
pub const LOGOUT_PATH: &str = "/users/logout";
pub const CURRENT_USER_PATH: &str = "/users/me";
pub const STORES_PATH: &str = "/stores/";
pub const ITEMS_PATH: &str = "/items/";
pub const INVENTORY_BULK_PATH: &str = "/inventory/bulk";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshTokenBody<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
    /// Present when the server rotates refresh tokens
    #[serde(default)]
    refresh_token: Option<String>,
}

/// A 401 from these means bad credentials, not an expired session
fn intercepts_unauthorized(path: &str) -> bool {
    path != LOGIN_PATH && path != REFRESH_PATH
}

/// API client for the inventory server.
/// Clone is cheap; clones share the transport, token store and refresh lock.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
    navigator: Navigator,
    /// Held for the duration of a refresh so only one runs at a time
    refresh_lock: Arc<Mutex<()>>,
}

impl ApiClient {
    /// Create a client talking HTTP to `base_url`
    pub fn new(
        base_url: &str,
        tokens: Arc<dyn TokenStore>,
        navigator: Navigator,
    ) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(base_url)?;
        Ok(Self::with_transport(Arc::new(transport), tokens, navigator))
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenStore>,
        navigator: Navigator,
    ) -> Self {
        Self {
            transport,
            tokens,
            navigator,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    // ===== Interceptor =====

    /// Send a request with the stored bearer token.
    ///
    /// On 401 the session is refreshed and the request resubmitted exactly
    /// once; a second 401 is returned as is. If the refresh fails the session
    /// is cleared, the app is sent to the login page, and the caller gets
    /// `ApiError::Unauthorized`.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let sent_with = self.tokens.access_token();
        let request = request.with_bearer(sent_with.clone());

        let response = self.transport.execute(&request).await?;
        if response.status != StatusCode::UNAUTHORIZED || !intercepts_unauthorized(&request.path) {
            return Self::check_response(response);
        }

        debug!(path = %request.path, "Request unauthorized, refreshing session");
        let Some(access_token) = self.refresh_session(sent_with.as_deref()).await else {
            return Err(ApiError::Unauthorized);
        };

        let retry = request.with_bearer(Some(access_token));
        let response = self.transport.execute(&retry).await?;
        Self::check_response(response)
    }

    /// Obtain a fresh access token, or end the session.
    ///
    /// `sent_with` is the token the failed request carried. If another
    /// caller already replaced it while we waited for the lock, that token
    /// is reused instead of refreshing again.
    async fn refresh_session(&self, sent_with: Option<&str>) -> Option<String> {
        let _guard = self.refresh_lock.lock().await;

        let current = self.tokens.get();
        match current.access_token.as_deref() {
            Some(access) if Some(access) != sent_with => {
                debug!("Session already refreshed by another request");
                return Some(access.to_string());
            }
            None if sent_with.is_some() && current.is_empty() => {
                debug!("Session already ended by another request");
                return None;
            }
            _ => {}
        }

        match self.request_refresh(current.refresh_token.as_deref()).await {
            Ok(refreshed) => {
                let stored = match refreshed.refresh_token.as_deref() {
                    Some(refresh) => self.tokens.set(&refreshed.access_token, refresh),
                    None => self.tokens.set_access(&refreshed.access_token),
                };
                if let Err(e) = stored {
                    warn!(error = %e, "Failed to save refreshed session");
                }
                info!("Session refreshed");
                Some(refreshed.access_token)
            }
            Err(e) => {
                warn!(error = %e, "Session refresh failed, signing out");
                self.end_session();
                None
            }
        }
    }

    async fn request_refresh(&self, refresh_token: Option<&str>) -> Result<RefreshResponse, ApiError> {
        let refresh_token = refresh_token
            .ok_or_else(|| ApiError::RefreshFailed("no refresh token stored".to_string()))?;
        let body = serde_json::to_value(RefreshTokenBody { refresh_token })?;

        let response = self
            .transport
            .execute(&ApiRequest::post(REFRESH_PATH, body))
            .await?;
        Self::check_response(response)?.json()
    }

    /// Clear the stored session and force the login page.
    /// With nothing stored there is no session to reload out of, so the
    /// login page is entered without rebuilding the app.
    fn end_session(&self) {
        let had_session = !self.tokens.get().is_empty();
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "Failed to clear session");
        }
        if had_session {
            self.navigator.hard_navigate(Route::Login);
        } else {
            self.navigator.navigate(Route::Login);
        }
    }

    /// Check if response is successful, returning an error with body if not.
    fn check_response(response: ApiResponse) -> Result<ApiResponse, ApiError> {
        if response.status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_status(response.status, &response.body))
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ApiRequest::get(path)).await?.json()
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.send(ApiRequest::post(path, body)).await?.json()
    }

    // ===== Endpoints =====

    /// Exchange credentials for a token pair. Does not touch the token store.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.post(LOGIN_PATH, &LoginRequest { username, password }).await
    }

    /// Tell the server to revoke `refresh_token`
    pub async fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        let body = serde_json::to_value(RefreshTokenBody { refresh_token })?;
        self.send(ApiRequest::post(LOGOUT_PATH, body)).await?;
        Ok(())
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get(CURRENT_USER_PATH).await
    }

    pub async fn list_stores(&self) -> Result<Vec<Store>, ApiError> {
        self.get(STORES_PATH).await
    }

    pub async fn list_items(&self) -> Result<Vec<Item>, ApiError> {
        self.get(ITEMS_PATH).await
    }

    pub async fn create_inventory_bulk(&self, bulk: &InventoryBulk) -> Result<Vec<Inventory>, ApiError> {
        debug!(store = %bulk.store_id, date = %bulk.date, lines = bulk.items.len(), "Submitting inventory");
        self.post(INVENTORY_BULK_PATH, bulk).await
    }
}
