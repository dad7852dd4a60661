//! Authentication module for session tokens and auth gating.
//!
//! This module provides:
//! - `TokenStore`: persistent access/refresh token storage (file, keychain,
//!   memory)
//! - `AuthProvider` / `AuthHandle`: the resolved "who am I" state for one
//!   application lifetime
//! - `RouteGuard`: gating of protected pages on that state
//! - `flows`: login and logout

pub mod context;
pub mod flows;
pub mod guard;
pub mod keychain;
pub mod store;

pub use context::{AuthHandle, AuthPhase, AuthProvider, AuthState};
pub use flows::LoginError;
pub use guard::{DeniedPolicy, GuardState, GuardView, RouteGuard};
pub use keychain::KeyringTokenStore;
pub use store::{FileTokenStore, MemoryTokenStore, StoredTokens, TokenStore};
