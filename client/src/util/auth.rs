//! Leptos bindings for the route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every routed view sits under [`AuthGuard`], so unauthenticated redirect
//! behavior is decided in one place from [`ROUTE_TABLE`](super::guard::ROUTE_TABLE).
//! Must be rendered inside a `<Router>`.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::state::session::SessionStore;
use crate::state::storage::SessionStorage;
use crate::util::guard::{GuardDecision, RouteGuard};

/// Re-evaluate `guard` on mount and on every path change, redirecting
/// through `navigate` when the session does not grant access.
pub fn install_route_guard<S, F>(session: SessionStore<S>, guard: RwSignal<RouteGuard>, navigate: F)
where
    S: SessionStorage + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = use_location();
    Effect::new(move || {
        let path = location.pathname.get();
        let logged_in = session.is_logged_in();
        let decision = guard.try_update(|g| g.on_navigate(&path, logged_in));
        if let Some(GuardDecision::Redirect(target)) = decision {
            log::info!("redirecting unauthenticated navigation from {path} to {target}");
            navigate(target, NavigateOptions::default());
        }
    });
}

/// Renders nothing while the first check is pending, then its children.
#[component]
pub fn AuthGuard(children: ChildrenFn) -> impl IntoView {
    let guard = RwSignal::new(RouteGuard::new());

    #[cfg(feature = "hydrate")]
    {
        let session = SessionStore::new(crate::state::storage::BrowserStorage);
        let navigate = leptos_router::hooks::use_navigate();
        install_route_guard(session, guard, navigate);
    }

    view! {
        <Show when=move || guard.with(RouteGuard::renders_children)>
            {children()}
        </Show>
    }
}
