//! Route table.
//!
//! Three surfaces exist: the public login page, the protected inventory
//! subtree, and a catch-all that sends everything else back to login.

use crate::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const INVENTORY_CREATE_PATH: &str = "/inventory/create";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    InventoryCreate,
    /// Anything unmatched, including `/`
    NotFound(String),
}

impl Route {
    /// Match a path. Query strings, fragments and trailing slashes are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        match path {
            LOGIN_PATH => Route::Login,
            INVENTORY_CREATE_PATH => Route::InventoryCreate,
            other => Route::NotFound(if other.is_empty() { "/".to_string() } else { other.to_string() }),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Login => LOGIN_PATH,
            Route::InventoryCreate => INVENTORY_CREATE_PATH,
            Route::NotFound(path) => path,
        }
    }

    /// Pages under the guarded layout
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::InventoryCreate)
    }

    /// Where an unmatched route is sent
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Route::NotFound(_) => Some(Route::Login),
            _ => None,
        }
    }
}

/// Where the login page forwards a visitor who is already signed in.
/// While the auth context is still loading the form stays up.
pub fn login_forward(auth: &AuthState) -> Option<Route> {
    if !auth.loading && auth.user.is_some() {
        Some(Route::InventoryCreate)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiId, Role, User};

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/login/"), Route::Login);
        assert_eq!(Route::parse("/login?next=x"), Route::Login);
        assert_eq!(Route::parse("/inventory/create"), Route::InventoryCreate);
    }

    #[test]
    fn test_unknown_routes_redirect_to_login() {
        let root = Route::parse("/");
        assert_eq!(root, Route::NotFound("/".to_string()));
        assert_eq!(root.redirect(), Some(Route::Login));
        assert_eq!(Route::parse("/nope").redirect(), Some(Route::Login));
        assert_eq!(Route::Login.redirect(), None);
    }

    #[test]
    fn test_only_inventory_is_protected() {
        assert!(Route::InventoryCreate.is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::parse("/x").is_protected());
    }

    #[test]
    fn test_login_forward() {
        let user = User { id: ApiId::Number(1), email: None, username: None, role: Role::User };
        assert_eq!(login_forward(&AuthState::loading()), None);
        assert_eq!(login_forward(&AuthState::resolved(None)), None);
        assert_eq!(
            login_forward(&AuthState::resolved(Some(user))),
            Some(Route::InventoryCreate)
        );
    }
}
