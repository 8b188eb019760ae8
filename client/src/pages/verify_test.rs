use super::*;
use crate::net::test_support::{certificate_json, fake_client, sample_certificate};
use crate::net::transport::TransportError;
use crate::state::toast::ToastLevel;

// =============================================================
// resolve_verification
// =============================================================

#[tokio::test]
async fn found_and_valid() {
    let client = fake_client();
    let cert = sample_certificate("CERT-42", "0xfeed");
    client.transport().push_json(200, certificate_json(&cert));
    client.transport().push_json(200, serde_json::json!({"valid": true}));

    let outcome = resolve_verification(&client, "CERT-42").await;

    assert_eq!(outcome, VerificationOutcome::Valid { certificate: Some(cert) });
    let urls: Vec<String> = client.transport().requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            "http://localhost:8080/api/certificates/CERT-42".to_owned(),
            "http://localhost:8080/api/certificates/verify/0xfeed".to_owned(),
        ]
    );
}

#[tokio::test]
async fn found_and_invalid() {
    let client = fake_client();
    let cert = sample_certificate("CERT-42", "0xfeed");
    client.transport().push_json(200, certificate_json(&cert));
    client.transport().push_json(200, serde_json::json!({"valid": false}));

    let outcome = resolve_verification(&client, " CERT-42 ").await;

    assert_eq!(outcome, VerificationOutcome::Invalid { certificate: Some(cert) });
    assert!(!outcome.is_valid());
}

#[tokio::test]
async fn lookup_failure_without_hash_prefix_is_not_found() {
    let client = fake_client();
    client.transport().push_raw(404, b"certificate not found\n");

    let outcome = resolve_verification(&client, "cert-42").await;

    assert_eq!(outcome, VerificationOutcome::NotFound);
    assert_eq!(outcome_toast(&outcome).title, "Certificate Not Found");
    assert_eq!(client.transport().requests().len(), 1);
}

#[tokio::test]
async fn lookup_failure_with_hash_prefix_falls_back_to_hash() {
    let client = fake_client();
    client.transport().push_raw(404, b"certificate not found\n");
    client.transport().push_json(200, serde_json::json!({"valid": true}));

    let outcome = resolve_verification(&client, "0xcert-42").await;

    assert_eq!(outcome, VerificationOutcome::Valid { certificate: None });
    assert_eq!(
        client.transport().last_request().url,
        "http://localhost:8080/api/certificates/verify/0xcert-42"
    );
}

#[tokio::test]
async fn failed_hash_fallback_is_a_verification_error_not_not_found() {
    let client = fake_client();
    client.transport().push_raw(404, b"certificate not found\n");
    client
        .transport()
        .push_error(TransportError::Send("connection reset".to_owned()));

    let outcome = resolve_verification(&client, "0xcert-42").await;

    assert!(matches!(outcome, VerificationOutcome::Error(ApiError::Transport(_))));
    let toast = outcome_toast(&outcome);
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(toast.title, "Verification Error");
}

#[tokio::test]
async fn hash_backend_rejection_is_a_verification_error() {
    let client = fake_client();
    client.transport().push_raw(404, b"");
    client.transport().push_raw(404, b"");

    let outcome = resolve_verification(&client, "0xdeadbeef").await;

    assert_eq!(outcome_toast(&outcome).title, "Verification Error");
}

#[tokio::test]
async fn verify_failure_after_lookup_is_not_found_for_plain_ids() {
    let client = fake_client();
    client
        .transport()
        .push_json(200, certificate_json(&sample_certificate("CERT-1", "0x1")));
    client.transport().push_raw(500, b"");

    let outcome = resolve_verification(&client, "CERT-1").await;

    assert_eq!(outcome, VerificationOutcome::NotFound);
    assert_eq!(outcome_toast(&outcome).title, "Certificate Not Found");
    assert_eq!(client.transport().requests().len(), 2);
}

#[tokio::test]
async fn verify_failure_after_lookup_retries_hash_input() {
    let client = fake_client();
    client
        .transport()
        .push_json(200, certificate_json(&sample_certificate("0xabc", "0xstored")));
    client.transport().push_raw(500, b"");
    client.transport().push_json(200, serde_json::json!({"valid": true}));

    let outcome = resolve_verification(&client, "0xabc").await;

    assert_eq!(outcome, VerificationOutcome::Valid { certificate: None });
    let urls: Vec<String> = client.transport().requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            "http://localhost:8080/api/certificates/0xabc".to_owned(),
            "http://localhost:8080/api/certificates/verify/0xstored".to_owned(),
            "http://localhost:8080/api/certificates/verify/0xabc".to_owned(),
        ]
    );
}

#[test]
fn hash_only_outcomes_use_their_own_titles() {
    let valid = outcome_toast(&VerificationOutcome::Valid { certificate: None });
    assert_eq!(valid.title, "Certificate is valid");
    assert!(valid.is_success());

    let invalid = outcome_toast(&VerificationOutcome::Invalid { certificate: None });
    assert_eq!(invalid.title, "Invalid Certificate");

    let with_cert = outcome_toast(&VerificationOutcome::Invalid {
        certificate: Some(sample_certificate("CERT-1", "0x1")),
    });
    assert_eq!(with_cert.title, "Certificate Invalid");
}

#[test]
fn hash_error_toast_has_fixed_description() {
    let toast = outcome_toast(&VerificationOutcome::Error(ApiError::SessionExpired));
    assert_eq!(toast, Toast::error("Verification Error", "Failed to verify certificate hash. Please try again."));
}

#[tokio::test]
async fn blank_input_is_ignored() {
    let client = fake_client();
    assert_eq!(submit_verify(&client, "   ").await, None);
    assert_eq!(resolve_verification(&client, "").await, VerificationOutcome::NotFound);
    assert!(client.transport().requests().is_empty());
}

#[tokio::test]
async fn submit_verify_pairs_outcome_with_toast() {
    let client = fake_client();
    client
        .transport()
        .push_json(200, certificate_json(&sample_certificate("CERT-1", "0x1")));
    client.transport().push_json(200, serde_json::json!({"valid": true}));

    let (outcome, toast) = submit_verify(&client, "CERT-1").await.unwrap();

    assert!(outcome.is_valid());
    assert_eq!(toast.title, "Certificate Verified");
    assert!(toast.is_success());
}

// =============================================================
// Helpers
// =============================================================

#[test]
fn hash_detection_uses_prefix() {
    assert!(looks_like_hash("0xabc"));
    assert!(!looks_like_hash("CERT-0x"));
    assert!(!looks_like_hash("0Xabc"));
}

#[test]
fn verify_query_id_extracts_prefill() {
    assert_eq!(verify_query_id("?id=CERT-42").as_deref(), Some("CERT-42"));
    assert_eq!(verify_query_id("foo=1&id=0x%20ab").as_deref(), Some("0x ab"));
    assert_eq!(verify_query_id("?id="), None);
    assert_eq!(verify_query_id(""), None);
    assert_eq!(verify_query_id("?ident=CERT-1"), None);
}
