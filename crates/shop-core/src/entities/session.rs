use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::UserSummary;
use crate::enums::Role;

/// Client-side authentication state.
///
/// A session is authenticated iff `token` is present. `user` is only
/// meaningful alongside a token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserSummary>,
}

impl Session {
    /// An authenticated session.
    #[must_use]
    pub fn authenticated(token: impl Into<String>, user: UserSummary) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Role of the signed-in user, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        if !self.is_authenticated() {
            return None;
        }
        self.user.as_ref().map(|u| u.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserSummary {
        UserSummary {
            id: "u-1".into(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn default_is_anonymous() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), None);
    }

    #[test]
    fn role_ignored_without_token() {
        let session = Session {
            token: None,
            user: Some(alice()),
        };
        assert_eq!(session.role(), None);
    }

    #[test]
    fn authenticated_exposes_role() {
        let session = Session::authenticated("jwt", alice());
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(Role::Admin));
    }
}
