//! Dashboard flow: the current user's issued and received certificates.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Both lists are derived from the
//! full certificate listing: issued by matching `issuerId` to the session
//! user, received by matching `recipientEmail` to the session email.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use crate::net::api::ApiClient;
use crate::net::transport::HttpTransport;
use crate::net::types::Certificate;
use crate::state::storage::SessionStorage;
use crate::state::toast::Toast;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub issued: Vec<Certificate>,
    pub received: Vec<Certificate>,
}

impl DashboardState {
    /// Issued certificates matching `term` by recipient, title, or id.
    pub fn search_issued(&self, term: &str) -> Vec<&Certificate> {
        let needle = term.to_lowercase();
        self.issued
            .iter()
            .filter(|cert| {
                contains_ci(&cert.recipient_name, &needle)
                    || contains_ci(&cert.certificate_title, &needle)
                    || contains_ci(&cert.id, &needle)
            })
            .collect()
    }

    /// Received certificates matching `term` by issuer, title, or id.
    pub fn search_received(&self, term: &str) -> Vec<&Certificate> {
        let needle = term.to_lowercase();
        self.received
            .iter()
            .filter(|cert| {
                contains_ci(&cert.issuer_name, &needle)
                    || contains_ci(&cert.certificate_title, &needle)
                    || contains_ci(&cert.id, &needle)
            })
            .collect()
    }
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// A dashboard load that stopped early. `state` keeps whatever loaded
/// before the failure; a failed received list still leaves `issued` filled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardError {
    pub state: DashboardState,
    pub toast: Toast,
}

impl DashboardError {
    fn new(state: DashboardState, toast: Toast) -> Self {
        Self { state, toast }
    }
}

/// Load the issued list, then the received list, for the session user.
///
/// # Errors
///
/// Returns the toast to show, with any list already loaded, when there is
/// no session user or a list fails to load.
pub async fn load_dashboard<T, S>(api: &ApiClient<T, S>) -> Result<DashboardState, DashboardError>
where
    T: HttpTransport,
    S: SessionStorage,
{
    let mut state = DashboardState::default();
    let Some(user) = api.session().current_user() else {
        let toast = Toast::error("Authentication Error", "Please log in to view your dashboard.");
        return Err(DashboardError::new(state, toast));
    };

    match api.get_user_issued_certificates(&user.id).await {
        Ok(issued) => state.issued = issued,
        Err(e) => return Err(DashboardError::new(state, Toast::error("Error", e.to_string()))),
    }
    match api.get_user_received_certificates(&user.email).await {
        Ok(received) => state.received = received,
        Err(e) => return Err(DashboardError::new(state, Toast::error("Error", e.to_string()))),
    }

    Ok(state)
}
