mod session_store;

pub use session_store::open_session_store;

use anyhow::bail;
use shop_auth::{Access, AuthState, GuardDecision, Route, RouteGuard};
use shop_client::Storefront;
use shop_config::ShopConfig;

/// Everything a command handler needs: the storefront client with its
/// session and cache.
pub struct AppContext {
    pub storefront: Storefront,
}

impl AppContext {
    /// Open the configured session store and build the client on top of it.
    pub fn init(config: &ShopConfig) -> anyhow::Result<Self> {
        let store = open_session_store(&config.session)?;
        let storefront = Storefront::new(config, store)?;
        Ok(Self { storefront })
    }

    pub fn auth(&self) -> &AuthState {
        self.storefront.auth()
    }

    /// Refuse to run a command whose view the current session may not see.
    pub fn enter(&self, route: Route) -> anyhow::Result<()> {
        let decision = RouteGuard::for_route(self.auth(), route).decision();
        check(decision, route.path())
    }

    /// Like [`enter`](Self::enter) for actions that are not a view of their own.
    pub fn require(&self, access: Access, action: &str) -> anyhow::Result<()> {
        let decision = RouteGuard::new(self.auth(), access).decision();
        check(decision, action)
    }
}

fn check(decision: GuardDecision, target: &str) -> anyhow::Result<()> {
    tracing::debug!(?decision, target, "route guard");
    match decision {
        GuardDecision::Allow => Ok(()),
        GuardDecision::RedirectToLogin => bail!(
            "{target} requires a signed-in user (redirected to {}); run `shop auth login`",
            shop_auth::guard::LOGIN_PATH
        ),
        GuardDecision::RedirectToLanding => bail!(
            "{target} requires the admin role (redirected to {})",
            shop_auth::guard::LANDING_PATH
        ),
    }
}
