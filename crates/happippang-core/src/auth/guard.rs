//! Route guard for the protected pages.
//!
//! The guard only decides once: while the view is not hydrated or the auth
//! context is loading it is `Pending`, and the first settled answer
//! (`Denied` or `Granted`) is latched for the guard's lifetime.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::User;
use crate::navigation::Navigator;
use crate::router::Route;

use super::AuthHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Pending,
    Denied,
    Granted(User),
}

/// What a denied visitor gets.
///
/// `Redirect` sends them to the login page. `Placeholder` keeps showing the
/// loading placeholder and leaves navigation to the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeniedPolicy {
    #[default]
    Redirect,
    Placeholder,
}

/// What the protected layout should draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView {
    Placeholder,
    Content(User),
}

pub struct RouteGuard {
    auth: AuthHandle,
    navigator: Navigator,
    policy: DeniedPolicy,
    hydrated: bool,
    settled: Option<GuardState>,
    redirected: bool,
}

impl RouteGuard {
    pub fn new(auth: AuthHandle, navigator: Navigator, policy: DeniedPolicy) -> Self {
        Self {
            auth,
            navigator,
            policy,
            hydrated: false,
            settled: None,
            redirected: false,
        }
    }

    pub fn policy(&self) -> DeniedPolicy {
        self.policy
    }

    /// Mark the first frame as drawn. Before this nothing is decided, so the
    /// first paint is always the placeholder.
    pub fn hydrate(&mut self) {
        self.hydrated = true;
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn state(&mut self) -> GuardState {
        if let Some(ref settled) = self.settled {
            return settled.clone();
        }
        if !self.hydrated {
            return GuardState::Pending;
        }

        let auth = self.auth.state();
        if auth.loading {
            return GuardState::Pending;
        }

        let settled = match auth.user {
            Some(user) => GuardState::Granted(user),
            None => GuardState::Denied,
        };
        debug!(state = ?settled, "Route guard settled");
        self.settled = Some(settled.clone());
        settled
    }

    /// Decide what to draw, redirecting a denied visitor at most once when
    /// the policy asks for it.
    pub fn view(&mut self) -> GuardView {
        match self.state() {
            GuardState::Pending => GuardView::Placeholder,
            GuardState::Granted(user) => GuardView::Content(user),
            GuardState::Denied => {
                if self.policy == DeniedPolicy::Redirect && !self.redirected {
                    self.redirected = true;
                    self.navigator.navigate(Route::Login);
                }
                GuardView::Placeholder
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::ApiClient;
    use crate::auth::{AuthProvider, MemoryTokenStore};
    use crate::testing::{json_response, user_json, ScriptedTransport};
    use serde_json::json;

    fn client(status: u16) -> ApiClient {
        let transport = ScriptedTransport::new(move |_| {
            if status == 200 {
                json_response(200, user_json())
            } else {
                json_response(status, json!({}))
            }
        });
        ApiClient::with_transport(
            transport,
            Arc::new(MemoryTokenStore::with_tokens("A1", "R1")),
            Navigator::new(Route::InventoryCreate),
        )
    }

    #[tokio::test]
    async fn test_pending_until_hydrated_even_with_user() {
        let client = client(200);
        let provider = AuthProvider::new();
        provider.initialize(&client).await;

        let mut guard = RouteGuard::new(provider.handle(), client.navigator().clone(), DeniedPolicy::Redirect);
        assert_eq!(guard.state(), GuardState::Pending);
        assert_eq!(guard.view(), GuardView::Placeholder);

        guard.hydrate();
        assert!(matches!(guard.view(), GuardView::Content(_)));
    }

    #[tokio::test]
    async fn test_pending_while_loading_then_granted() {
        let client = client(200);
        let provider = AuthProvider::new();
        let mut guard = RouteGuard::new(provider.handle(), client.navigator().clone(), DeniedPolicy::Redirect);
        guard.hydrate();

        assert_eq!(guard.state(), GuardState::Pending);
        provider.initialize(&client).await;
        assert!(matches!(guard.state(), GuardState::Granted(_)));
    }

    #[tokio::test]
    async fn test_denied_redirects_once() {
        let client = client(500);
        let navigator = client.navigator().clone();
        let provider = AuthProvider::new();
        provider.initialize(&client).await;

        let mut guard = RouteGuard::new(provider.handle(), navigator.clone(), DeniedPolicy::Redirect);
        guard.hydrate();

        assert_eq!(guard.view(), GuardView::Placeholder);
        assert_eq!(guard.view(), GuardView::Placeholder);
        let nav = navigator.current();
        assert_eq!(nav.route, Route::Login);
        assert!(!nav.hard);
        assert_eq!(nav.seq, 1);
    }

    #[tokio::test]
    async fn test_denied_placeholder_policy_stays_put() {
        let client = client(500);
        let navigator = client.navigator().clone();
        let provider = AuthProvider::new();
        provider.initialize(&client).await;

        let mut guard = RouteGuard::new(provider.handle(), navigator.clone(), DeniedPolicy::Placeholder);
        guard.hydrate();

        assert_eq!(guard.state(), GuardState::Denied);
        assert_eq!(guard.view(), GuardView::Placeholder);
        assert_eq!(navigator.current().seq, 0);
    }

    #[tokio::test]
    async fn test_settled_state_is_latched() {
        let ok = client(200);
        let provider = AuthProvider::new();
        provider.initialize(&ok).await;

        let mut guard = RouteGuard::new(provider.handle(), ok.navigator().clone(), DeniedPolicy::Redirect);
        guard.hydrate();
        let first = guard.state();
        assert!(matches!(first, GuardState::Granted(_)));

        // Dropping the provider cannot send the guard back to pending
        drop(provider);
        assert_eq!(guard.state(), first);
    }

    #[test]
    fn test_policy_config_names() {
        let policy: DeniedPolicy = serde_json::from_str(r#""placeholder""#).unwrap();
        assert_eq!(policy, DeniedPolicy::Placeholder);
        assert_eq!(DeniedPolicy::default(), DeniedPolicy::Redirect);
    }
}
