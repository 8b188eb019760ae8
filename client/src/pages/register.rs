//! Registration flow.
//!
//! A successful registration does not log the user in; it sends them to the
//! login view.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use crate::net::api::ApiClient;
use crate::net::transport::HttpTransport;
use crate::net::types::RegisterRequest;
use crate::pages::form::{FormError, require};
use crate::state::storage::SessionStorage;
use crate::state::toast::Toast;
use crate::util::guard::LOGIN_PATH;
use crate::util::navigate::Navigator;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Build the register request, checking the password confirmation first.
///
/// # Errors
///
/// Returns [`FormError::PasswordMismatch`] when the passwords differ, and
/// [`FormError::MissingField`] for a blank field.
pub fn validate_register_input(form: &RegisterForm) -> Result<RegisterRequest, FormError> {
    if form.password != form.confirm_password {
        return Err(FormError::PasswordMismatch);
    }
    let name = require("Name", &form.name)?;
    let email = require("Email", &form.email)?;
    if form.password.is_empty() {
        return Err(FormError::MissingField("Password"));
    }
    Ok(RegisterRequest { name, email, password: form.password.clone() })
}

pub async fn submit_register<T, S>(api: &ApiClient<T, S>, form: &RegisterForm, navigator: &impl Navigator) -> Toast
where
    T: HttpTransport,
    S: SessionStorage,
{
    let request = match validate_register_input(form) {
        Ok(request) => request,
        Err(FormError::PasswordMismatch) => {
            return Toast::error("Passwords do not match", "Please make sure your passwords match.");
        }
        Err(e) => return Toast::error("Registration Failed", e.to_string()),
    };

    match api.register(&request).await {
        Ok(registered) => {
            log::info!("registered account {}", registered.user().email);
            navigator.navigate(LOGIN_PATH);
            Toast::success("Registration Successful", "Your account has been created successfully.")
        }
        Err(e) => Toast::error("Registration Failed", e.to_string()),
    }
}
