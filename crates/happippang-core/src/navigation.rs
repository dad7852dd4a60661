//! Navigation requests.
//!
//! Any component can ask to move to another route. A *hard* navigation also
//! asks the application to rebuild its auth context, the same way a full
//! page load would.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::router::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub hard: bool,
    /// Increments on every request, so repeated requests for the same route
    /// are still observable
    pub seq: u64,
}

#[derive(Clone)]
pub struct Navigator {
    tx: Arc<watch::Sender<Navigation>>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        let (tx, _) = watch::channel(Navigation {
            route: initial,
            hard: false,
            seq: 0,
        });
        Self { tx: Arc::new(tx) }
    }

    /// In-place route change
    pub fn navigate(&self, route: Route) {
        self.push(route, false);
    }

    /// Route change that discards auth state
    pub fn hard_navigate(&self, route: Route) {
        self.push(route, true);
    }

    pub fn current(&self) -> Navigation {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Navigation> {
        self.tx.subscribe()
    }

    fn push(&self, route: Route, hard: bool) {
        debug!(path = route.path(), hard, "Navigating");
        self.tx.send_modify(|nav| {
            nav.seq += 1;
            nav.route = route;
            nav.hard = hard;
        });
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}
