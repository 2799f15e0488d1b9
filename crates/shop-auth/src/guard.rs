//! Access decisions for protected views.
//!
//! [`can_access`] is the single capability predicate. The route guard and any
//! in-view conditional (admin-only buttons, profile editing) go through it or
//! through the helpers below instead of comparing roles inline.

use serde::Serialize;
use shop_core::entities::Session;
use shop_core::enums::Role;
use tokio::sync::watch;

use crate::state::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const LANDING_PATH: &str = "/";

/// Whether `session` may see a view requiring `required_roles`.
///
/// An empty role set means "any authenticated user".
#[must_use]
pub fn can_access(session: &Session, required_roles: &[Role]) -> bool {
    guard(session, required_roles) == GuardDecision::Allow
}

/// Outcome of evaluating a protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    /// No session: send the user to the login entry point.
    RedirectToLogin,
    /// Signed in without a required role: send the user to the landing page.
    RedirectToLanding,
}

impl GuardDecision {
    /// Where to navigate instead, if anywhere.
    #[must_use]
    pub const fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::RedirectToLanding => Some(LANDING_PATH),
        }
    }

    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decide access to a view requiring `required_roles`. Pure function of its inputs.
#[must_use]
pub fn guard(session: &Session, required_roles: &[Role]) -> GuardDecision {
    if !session.is_authenticated() {
        return GuardDecision::RedirectToLogin;
    }
    if required_roles.is_empty() {
        return GuardDecision::Allow;
    }
    match session.role() {
        Some(role) if required_roles.contains(&role) => GuardDecision::Allow,
        _ => GuardDecision::RedirectToLanding,
    }
}

#[must_use]
pub fn is_admin(session: &Session) -> bool {
    can_access(session, &[Role::Admin])
}

/// Admins may edit any profile; everyone else only their own.
#[must_use]
pub fn can_edit_profile(session: &Session, user_id: &str) -> bool {
    if is_admin(session) {
        return true;
    }
    session.is_authenticated() && session.user.as_ref().is_some_and(|u| u.id == user_id)
}

/// Access level a view requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Roles(Vec<Role>),
}

impl Access {
    #[must_use]
    pub fn decide(&self, session: &Session) -> GuardDecision {
        match self {
            Self::Public => GuardDecision::Allow,
            Self::Authenticated => guard(session, &[]),
            Self::Roles(roles) => guard(session, roles),
        }
    }
}

/// Views of the storefront and the access each requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Catalog,
    ProductDetail,
    Cart,
    Checkout,
    Orders,
    OrderDetail,
    Profile,
    AdminUsers,
    AdminProducts,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Register => "/register",
            Self::Catalog => LANDING_PATH,
            Self::ProductDetail => "/products/:id",
            Self::Cart => "/cart",
            Self::Checkout => "/checkout",
            Self::Orders => "/orders",
            Self::OrderDetail => "/orders/:id",
            Self::Profile => "/profile",
            Self::AdminUsers => "/admin/users",
            Self::AdminProducts => "/admin/products",
        }
    }

    #[must_use]
    pub fn access(self) -> Access {
        match self {
            Self::Login | Self::Register | Self::Catalog | Self::ProductDetail => Access::Public,
            Self::Cart | Self::Checkout | Self::Orders | Self::OrderDetail | Self::Profile => {
                Access::Authenticated
            }
            Self::AdminUsers | Self::AdminProducts => Access::Roles(vec![Role::Admin]),
        }
    }

    #[must_use]
    pub fn decide(self, session: &Session) -> GuardDecision {
        self.access().decide(session)
    }
}

/// A guard bound to the live session: re-evaluated on every session change.
pub struct RouteGuard {
    access: Access,
    session: watch::Receiver<Session>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(auth: &AuthState, access: Access) -> Self {
        Self {
            access,
            session: auth.watch(),
        }
    }

    #[must_use]
    pub fn for_route(auth: &AuthState, route: Route) -> Self {
        Self::new(auth, route.access())
    }

    /// Decision for the current session.
    #[must_use]
    pub fn decision(&self) -> GuardDecision {
        self.access.decide(&self.session.borrow())
    }

    /// Wait for the next session change and return the new decision.
    /// Returns `None` once the auth state is gone.
    pub async fn changed(&mut self) -> Option<GuardDecision> {
        self.session.changed().await.ok()?;
        let decision = self.access.decide(&self.session.borrow_and_update());
        tracing::debug!(?decision, "route guard re-evaluated");
        Some(decision)
    }
}
