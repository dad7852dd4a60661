//! Authentication context.
//!
//! An `AuthProvider` resolves the current user once and publishes the result
//! to any number of `AuthHandle`s. The state goes from loading to resolved
//! exactly once; signing in or out rebuilds the provider instead of
//! mutating it.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::models::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Loading,
    Authenticated,
    Unauthenticated,
}

impl AuthState {
    pub fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    pub fn resolved(user: Option<User>) -> Self {
        Self {
            user,
            loading: false,
        }
    }

    pub fn phase(&self) -> AuthPhase {
        match (self.loading, &self.user) {
            (true, _) => AuthPhase::Loading,
            (false, Some(_)) => AuthPhase::Authenticated,
            (false, None) => AuthPhase::Unauthenticated,
        }
    }
}

pub struct AuthProvider {
    tx: watch::Sender<AuthState>,
    started: AtomicBool,
}

impl AuthProvider {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(AuthState::loading());
        Self {
            tx,
            started: AtomicBool::new(false),
        }
    }

    /// A consumer view of this provider's state
    pub fn handle(&self) -> AuthHandle {
        AuthHandle {
            rx: self.tx.subscribe(),
        }
    }

    pub fn state(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    /// Resolve the current user. Only the first call reaches the server;
    /// later calls wait for that result and return it.
    pub async fn initialize(&self, client: &ApiClient) -> AuthState {
        if self.started.swap(true, Ordering::SeqCst) {
            return self.handle().resolved().await;
        }

        let user = match client.current_user().await {
            Ok(user) => {
                info!(user = %user.display_name(), "Authenticated");
                Some(user)
            }
            Err(e) => {
                debug!(error = %e, "No authenticated user");
                None
            }
        };

        let state = AuthState::resolved(user);
        self.tx.send_replace(state.clone());
        state
    }
}

impl Default for AuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Read side of an `AuthProvider`. Only obtainable from a provider, so any
/// consumer holding one is wired to a real context.
#[derive(Clone)]
pub struct AuthHandle {
    rx: watch::Receiver<AuthState>,
}

impl AuthHandle {
    pub fn state(&self) -> AuthState {
        self.rx.borrow().clone()
    }

    /// Wait until loading has finished.
    /// If the provider goes away first, the last seen state is returned.
    pub async fn resolved(&mut self) -> AuthState {
        let resolved = self
            .rx
            .wait_for(|state| !state.loading)
            .await
            .map(|state| state.clone());
        resolved.unwrap_or_else(|_| self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::client::{CURRENT_USER_PATH, REFRESH_PATH};
    use crate::auth::{MemoryTokenStore, TokenStore};
    use crate::navigation::Navigator;
    use crate::router::Route;
    use crate::testing::{json_response, user_json, ScriptedTransport};
    use serde_json::json;

    fn client_for(transport: &Arc<ScriptedTransport>, tokens: Arc<MemoryTokenStore>) -> ApiClient {
        ApiClient::with_transport(transport.clone(), tokens, Navigator::new(Route::InventoryCreate))
    }

    #[test]
    fn test_phases() {
        assert_eq!(AuthState::loading().phase(), AuthPhase::Loading);
        assert_eq!(AuthState::resolved(None).phase(), AuthPhase::Unauthenticated);
    }

    #[tokio::test]
    async fn test_initialize_success() {
        let transport = ScriptedTransport::new(|_| json_response(200, user_json()));
        let client = client_for(&transport, Arc::new(MemoryTokenStore::with_tokens("A1", "R1")));
        let provider = AuthProvider::new();
        let handle = provider.handle();

        assert_eq!(handle.state().phase(), AuthPhase::Loading);
        let state = provider.initialize(&client).await;

        assert_eq!(state.phase(), AuthPhase::Authenticated);
        assert_eq!(handle.state(), state);
        assert_eq!(
            state.user.unwrap().email.as_deref(),
            Some("alice@example.com")
        );
    }

    #[tokio::test]
    async fn test_initialize_failure_is_unauthenticated() {
        let transport = ScriptedTransport::new(|_| json_response(401, json!({})));
        let tokens = Arc::new(MemoryTokenStore::with_tokens("A1", "R1"));
        let client = client_for(&transport, tokens.clone());
        let provider = AuthProvider::new();

        let state = provider.initialize(&client).await;
        assert_eq!(state, AuthState::resolved(None));
        // The refresh failed on the way, so the session is gone too
        assert!(tokens.get().is_empty());
        assert_eq!(client.navigator().current().route, Route::Login);
    }

    #[tokio::test]
    async fn test_initialize_network_error_is_unauthenticated() {
        let transport = ScriptedTransport::new(|_| Err(crate::api::ApiError::Transport("refused".into())));
        let client = client_for(&transport, Arc::new(MemoryTokenStore::default()));
        let provider = AuthProvider::new();

        assert_eq!(provider.initialize(&client).await.phase(), AuthPhase::Unauthenticated);
        assert_eq!(transport.count(REFRESH_PATH), 0);
    }

    #[tokio::test]
    async fn test_initialize_runs_once() {
        let transport = ScriptedTransport::new(|_| json_response(200, user_json()));
        let client = client_for(&transport, Arc::new(MemoryTokenStore::with_tokens("A1", "R1")));
        let provider = AuthProvider::new();

        let (first, second) = tokio::join!(provider.initialize(&client), provider.initialize(&client));
        let third = provider.initialize(&client).await;

        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(transport.count(CURRENT_USER_PATH), 1);
    }

    #[tokio::test]
    async fn test_handle_waits_for_resolution() {
        let transport = ScriptedTransport::new(|_| json_response(200, user_json()));
        let client = client_for(&transport, Arc::new(MemoryTokenStore::with_tokens("A1", "R1")));
        let provider = Arc::new(AuthProvider::new());
        let mut handle = provider.handle();

        let task = {
            let provider = provider.clone();
            tokio::spawn(async move { provider.initialize(&client).await })
        };

        let state = handle.resolved().await;
        assert_eq!(state.phase(), AuthPhase::Authenticated);
        assert_eq!(task.await.unwrap(), state);
    }
}
