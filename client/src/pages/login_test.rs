use super::*;
use crate::net::test_support::fake_client;
use crate::state::toast::ToastLevel;
use crate::util::navigate::RecordingNavigator;

fn form(email: &str, password: &str) -> LoginForm {
    LoginForm { email: email.to_owned(), password: password.to_owned() }
}

#[test]
fn validate_login_input_trims_email_and_requires_both() {
    assert_eq!(
        validate_login_input(&form("  alice@example.com ", "pw")),
        Ok(LoginRequest { email: "alice@example.com".to_owned(), password: "pw".to_owned() })
    );
    assert_eq!(validate_login_input(&form("  ", "pw")), Err(FormError::MissingField("Email")));
    assert_eq!(validate_login_input(&form("a@b.c", "")), Err(FormError::MissingField("Password")));
}

#[tokio::test]
async fn successful_login_persists_session_and_redirects() {
    let client = fake_client();
    let navigator = RecordingNavigator::default();
    client.transport().push_json(
        200,
        serde_json::json!({
            "token": "tok123",
            "user": {"id": "u1", "name": "Alice", "email": "alice@example.com", "role": "user"},
        }),
    );

    let toast = submit_login(&client, &form("alice@example.com", "pw"), &navigator).await;

    assert_eq!(toast.level, ToastLevel::Success);
    assert_eq!(toast.title, "Login Successful");
    assert!(client.session().is_logged_in());
    assert_eq!(client.session().token().as_deref(), Some("tok123"));
    assert_eq!(client.session().current_user().unwrap().role.as_deref(), Some("user"));
    assert_eq!(navigator.last().as_deref(), Some("/dashboard"));
}

#[tokio::test]
async fn failed_login_reports_error_and_stays_put() {
    let client = fake_client();
    let navigator = RecordingNavigator::default();
    client
        .transport()
        .push_json(401, serde_json::json!({"message": "invalid email or password"}));

    let toast = submit_login(&client, &form("alice@example.com", "bad"), &navigator).await;

    assert_eq!(toast, Toast::error("Login Failed", "invalid email or password"));
    assert!(!client.session().is_logged_in());
    assert!(navigator.visited().is_empty());
}

#[tokio::test]
async fn blank_login_sends_nothing() {
    let client = fake_client();
    let navigator = RecordingNavigator::default();

    let toast = submit_login(&client, &form("", ""), &navigator).await;

    assert!(!toast.is_success());
    assert!(client.transport().requests().is_empty());
}
