use super::*;
use crate::net::test_support::fake_client;
use crate::util::navigate::RecordingNavigator;

fn form(password: &str, confirm: &str) -> RegisterForm {
    RegisterForm {
        name: "Bea".to_owned(),
        email: "bea@example.com".to_owned(),
        password: password.to_owned(),
        confirm_password: confirm.to_owned(),
    }
}

#[test]
fn mismatched_confirmation_is_rejected_first() {
    let mut bad = form("secret", "secreT");
    bad.name.clear();
    assert_eq!(validate_register_input(&bad), Err(FormError::PasswordMismatch));
}

#[test]
fn blank_fields_are_rejected() {
    let mut bad = form("pw", "pw");
    bad.email = "   ".to_owned();
    assert_eq!(validate_register_input(&bad), Err(FormError::MissingField("Email")));
    assert_eq!(validate_register_input(&form("", "")), Err(FormError::MissingField("Password")));
}

#[tokio::test]
async fn mismatch_sends_no_request() {
    let client = fake_client();
    let navigator = RecordingNavigator::default();

    let toast = submit_register(&client, &form("one", "two"), &navigator).await;

    assert_eq!(toast.title, "Passwords do not match");
    assert!(client.transport().requests().is_empty());
    assert!(navigator.visited().is_empty());
}

#[tokio::test]
async fn success_redirects_to_login_without_session() {
    let client = fake_client();
    let navigator = RecordingNavigator::default();
    client.transport().push_json(
        200,
        serde_json::json!({"token": "tok", "user": {"id": "u2", "name": "Bea", "email": "bea@example.com"}}),
    );

    let toast = submit_register(&client, &form("pw", "pw"), &navigator).await;

    assert!(toast.is_success());
    assert_eq!(toast.title, "Registration Successful");
    assert!(!client.session().is_logged_in());
    assert_eq!(navigator.visited(), vec!["/login".to_owned()]);
}

#[tokio::test]
async fn backend_rejection_is_reported() {
    let client = fake_client();
    let navigator = RecordingNavigator::default();
    client.transport().push_raw(500, b"user with email bea@example.com already exists\n");

    let toast = submit_register(&client, &form("pw", "pw"), &navigator).await;

    assert_eq!(toast, Toast::error("Registration Failed", "API error: 500"));
}
