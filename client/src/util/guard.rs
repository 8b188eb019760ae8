//! Declarative route access table and the navigation guard built on it.
//!
//! DESIGN
//! ======
//! Access rules live in one table, [`ROUTE_TABLE`], evaluated top to bottom.
//! Any path no rule matches requires a session. The guard itself is a
//! two-state machine: `Checking` until the first navigation has been
//! evaluated, `Resolved` afterwards.
//!
//! TRADE-OFFS
//! ==========
//! A redirect does not hold back rendering: once resolved, children render
//! even while the redirect is in flight, so protected content can flash
//! briefly before the login view replaces it.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::state::session::SessionStore;
use crate::state::storage::SessionStorage;
use crate::util::navigate::Navigator;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const VERIFY_PATH: &str = "/verify";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ISSUE_PATH: &str = "/issue";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePattern {
    Exact(&'static str),
    /// Matches any path starting with the prefix, including the prefix itself.
    Prefix(&'static str),
}

impl RoutePattern {
    pub fn matches(self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => path == exact,
            Self::Prefix(prefix) => path.starts_with(prefix),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    RequiresSession,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRule {
    pub pattern: RoutePattern,
    pub access: Access,
}

const fn rule(pattern: RoutePattern, access: Access) -> RouteRule {
    RouteRule { pattern, access }
}

pub const ROUTE_TABLE: &[RouteRule] = &[
    rule(RoutePattern::Exact(HOME_PATH), Access::Public),
    rule(RoutePattern::Exact(LOGIN_PATH), Access::Public),
    rule(RoutePattern::Exact(REGISTER_PATH), Access::Public),
    rule(RoutePattern::Prefix(VERIFY_PATH), Access::Public),
    rule(RoutePattern::Exact(DASHBOARD_PATH), Access::RequiresSession),
    rule(RoutePattern::Exact(ISSUE_PATH), Access::RequiresSession),
];

/// Strip `?query` and `#fragment` from a location.
fn route_path(location: &str) -> &str {
    location.split(['?', '#']).next().unwrap_or(location)
}

/// Access level for `location`; unlisted paths require a session.
pub fn access_for(location: &str) -> Access {
    let path = route_path(location);
    ROUTE_TABLE
        .iter()
        .find(|rule| rule.pattern.matches(path))
        .map_or(Access::RequiresSession, |rule| rule.access)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// Decide whether `location` may be shown given the session state.
pub fn evaluate(location: &str, logged_in: bool) -> GuardDecision {
    match access_for(location) {
        Access::RequiresSession if !logged_in => GuardDecision::Redirect(LOGIN_PATH),
        _ => GuardDecision::Allow,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Checking,
    Resolved,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteGuard {
    state: GuardState,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Evaluate a navigation and move to `Resolved`.
    pub fn on_navigate(&mut self, location: &str, logged_in: bool) -> GuardDecision {
        let decision = evaluate(location, logged_in);
        self.state = GuardState::Resolved;
        decision
    }

    /// Evaluate against a live session and perform any redirect.
    pub fn check<S: SessionStorage>(
        &mut self,
        location: &str,
        session: &SessionStore<S>,
        navigator: &impl Navigator,
    ) -> GuardDecision {
        let decision = self.on_navigate(location, session.is_logged_in());
        if let GuardDecision::Redirect(target) = decision {
            log::info!("redirecting unauthenticated navigation from {location} to {target}");
            navigator.navigate(target);
        }
        decision
    }

    pub fn renders_children(&self) -> bool {
        self.state == GuardState::Resolved
    }
}
