//! Explicit wiring of the client-side services.
//!
//! Everything that used to be ambient (token store, navigation, API client)
//! is built here and passed down. Missing pieces fail at construction time.

use std::sync::Arc;

use anyhow::Result;
use thiserror::Error;

use crate::api::{ApiClient, ApiError, ReqwestTransport, Transport};
use crate::auth::{
    AuthProvider, DeniedPolicy, FileTokenStore, KeyringTokenStore, MemoryTokenStore, RouteGuard,
    TokenStore,
};
use crate::config::{Config, TokenBackend};
use crate::navigation::Navigator;
use crate::router::Route;

#[derive(Error, Debug)]
pub enum WiringError {
    #[error("Missing required service: {0}")]
    Missing(&'static str),

    #[error("Failed to build API transport: {0}")]
    Transport(#[from] ApiError),
}

#[derive(Clone)]
pub struct Services {
    client: ApiClient,
    navigator: Navigator,
    denied_policy: DeniedPolicy,
}

impl Services {
    pub fn builder() -> ServicesBuilder {
        ServicesBuilder::default()
    }

    /// Wire everything from a loaded config
    pub fn from_config(config: &Config) -> Result<Self> {
        let tokens: Arc<dyn TokenStore> = match config.token_backend {
            TokenBackend::File => Arc::new(FileTokenStore::open(&config.cache_dir()?)?),
            TokenBackend::Keyring => Arc::new(KeyringTokenStore::new()),
            TokenBackend::Memory => Arc::new(MemoryTokenStore::default()),
        };

        let services = Self::builder()
            .base_url(&config.api_base_url())
            .tokens(tokens)
            .denied_policy(config.denied_policy)
            .build()?;
        Ok(services)
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn denied_policy(&self) -> DeniedPolicy {
        self.denied_policy
    }

    /// A fresh, unresolved auth context
    pub fn auth_scope(&self) -> AuthProvider {
        AuthProvider::new()
    }

    /// Guard for the protected layout, bound to `auth`
    pub fn route_guard(&self, auth: &AuthProvider) -> RouteGuard {
        RouteGuard::new(auth.handle(), self.navigator.clone(), self.denied_policy)
    }
}

#[derive(Default)]
pub struct ServicesBuilder {
    base_url: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    tokens: Option<Arc<dyn TokenStore>>,
    navigator: Option<Navigator>,
    denied_policy: DeniedPolicy,
}

impl ServicesBuilder {
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// Use a custom transport instead of HTTP to `base_url`
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn tokens(mut self, tokens: Arc<dyn TokenStore>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn navigator(mut self, navigator: Navigator) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn denied_policy(mut self, policy: DeniedPolicy) -> Self {
        self.denied_policy = policy;
        self
    }

    pub fn build(self) -> Result<Services, WiringError> {
        let tokens = self.tokens.ok_or(WiringError::Missing("token store"))?;
        let transport: Arc<dyn Transport> = match (self.transport, self.base_url) {
            (Some(transport), _) => transport,
            (None, Some(url)) => Arc::new(ReqwestTransport::new(&url)?),
            (None, None) => return Err(WiringError::Missing("API base URL or transport")),
        };
        let navigator = self.navigator.unwrap_or_else(|| Navigator::new(Route::Login));

        Ok(Services {
            client: ApiClient::with_transport(transport, tokens, navigator.clone()),
            navigator,
            denied_policy: self.denied_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::GuardView;
    use crate::testing::{json_response, user_json, ScriptedTransport};

    #[test]
    fn test_missing_token_store_fails_at_build() {
        let result = Services::builder().base_url("http://localhost:8000").build();
        assert!(matches!(result, Err(WiringError::Missing("token store"))));
    }

    #[test]
    fn test_missing_endpoint_fails_at_build() {
        let result = Services::builder()
            .tokens(Arc::new(MemoryTokenStore::default()))
            .build();
        assert!(matches!(result, Err(WiringError::Missing(_))));
    }

    #[tokio::test]
    async fn test_guard_shares_navigator_and_policy() {
        let transport = ScriptedTransport::new(|_| json_response(200, user_json()));
        let services = Services::builder()
            .transport(transport)
            .tokens(Arc::new(MemoryTokenStore::with_tokens("A1", "R1")))
            .denied_policy(DeniedPolicy::Placeholder)
            .build()
            .unwrap();

        let auth = services.auth_scope();
        auth.initialize(services.client()).await;

        let mut guard = services.route_guard(&auth);
        assert_eq!(guard.policy(), DeniedPolicy::Placeholder);
        guard.hydrate();
        assert!(matches!(guard.view(), GuardView::Content(_)));
        assert_eq!(services.navigator().current().route, Route::Login);
    }
}
