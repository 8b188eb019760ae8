//! Login flow: credentials in, persisted session and dashboard redirect out.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::net::api::ApiClient;
use crate::net::transport::HttpTransport;
use crate::net::types::LoginRequest;
use crate::pages::form::{FormError, require};
use crate::state::storage::SessionStorage;
use crate::state::toast::Toast;
use crate::util::guard::DASHBOARD_PATH;
use crate::util::navigate::Navigator;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Build the login request. Email is trimmed; the password is sent as typed.
///
/// # Errors
///
/// Returns [`FormError::MissingField`] when either field is blank.
pub fn validate_login_input(form: &LoginForm) -> Result<LoginRequest, FormError> {
    let email = require("Email", &form.email)?;
    if form.password.is_empty() {
        return Err(FormError::MissingField("Password"));
    }
    Ok(LoginRequest { email, password: form.password.clone() })
}

/// Log in, persist the session, and move to the dashboard.
pub async fn submit_login<T, S>(api: &ApiClient<T, S>, form: &LoginForm, navigator: &impl Navigator) -> Toast
where
    T: HttpTransport,
    S: SessionStorage,
{
    let request = match validate_login_input(form) {
        Ok(request) => request,
        Err(e) => return Toast::error("Login Failed", e.to_string()),
    };

    match api.login(&request).await {
        Ok(auth) => {
            api.session().set_auth_data(&auth.token, &auth.user);
            log::info!("logged in as {}", auth.user.email);
            navigator.navigate(DASHBOARD_PATH);
            Toast::success("Login Successful", "You have been successfully logged in.")
        }
        Err(e) => Toast::error("Login Failed", e.to_string()),
    }
}
