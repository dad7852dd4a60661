use serde::{Deserialize, Serialize};

use super::ApiId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// The signed-in account, as returned by `GET /users/me`.
///
/// Never persisted locally; it is fetched again every time an auth context
/// is initialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: ApiId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Best available label for the account
    pub fn display_name(&self) -> String {
        self.email
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| format!("user {}", self.id))
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_full_payload() {
        let user: User =
            serde_json::from_str(r#"{"id": 1, "email": "alice@example.com", "role": "admin"}"#)
                .unwrap();
        assert_eq!(user.id, ApiId::Number(1));
        assert!(user.is_admin());
        assert_eq!(user.display_name(), "alice@example.com");
    }

    #[test]
    fn test_user_minimal_payload_defaults_role() {
        let user: User = serde_json::from_str(
            r#"{"id": "9b2e6d3a-1111-2222-3333-444455556666", "username": "alice"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::User);
        assert!(user.email.is_none());
        assert_eq!(user.display_name(), "alice");
    }

    #[test]
    fn test_user_display_name_fallback() {
        let user = User {
            id: ApiId::Number(5),
            email: None,
            username: None,
            role: Role::User,
        };
        assert_eq!(user.display_name(), "user 5");
    }
}
