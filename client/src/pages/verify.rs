//! Certificate verification by ID or hash.
//!
//! DESIGN
//! ======
//! [`resolve_verification`] runs the whole ID-then-hash procedure and returns
//! one tagged [`VerificationOutcome`]; presentation is a pure mapping from
//! that outcome to a toast.
//!
//! 1. Look the input up as a certificate ID. If found, verify its hash.
//! 2. If either step failed and the input looks like a hash (`0x` prefix),
//!    verify the input directly.
//! 3. Otherwise the certificate is not found.
//!
//! Only a failed hash verification in step 2 yields
//! [`VerificationOutcome::Error`]. Hash-only results get their own toast
//! titles.
//!
//! Requests are sequential and never cancelled; a caller that has moved on
//! simply ignores the outcome.

#[cfg(test)]
#[path = "verify_test.rs"]
mod verify_test;

use crate::net::api::{ApiClient, ApiError};
use crate::net::transport::HttpTransport;
use crate::net::types::Certificate;
use crate::state::storage::SessionStorage;
use crate::state::toast::Toast;

const HASH_PREFIX: &str = "0x";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Ledger confirms the certificate. `certificate` is `None` for a
    /// hash-only verification.
    Valid { certificate: Option<Certificate> },
    /// Ledger disagrees with the stored certificate.
    Invalid { certificate: Option<Certificate> },
    /// ID lookup or its verification failed, and the input is not a hash.
    NotFound,
    /// Hash verification failed (transport or backend error).
    Error(ApiError),
}

impl VerificationOutcome {
    pub fn certificate(&self) -> Option<&Certificate> {
        match self {
            Self::Valid { certificate } | Self::Invalid { certificate } => certificate.as_ref(),
            Self::NotFound | Self::Error(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

/// Whether `input` is treated as a ledger hash when ID lookup fails.
pub fn looks_like_hash(input: &str) -> bool {
    input.starts_with(HASH_PREFIX)
}

/// Resolve `input` (certificate ID or hash) to a verification outcome.
pub async fn resolve_verification<T, S>(api: &ApiClient<T, S>, input: &str) -> VerificationOutcome
where
    T: HttpTransport,
    S: SessionStorage,
{
    let input = input.trim();
    if input.is_empty() {
        return VerificationOutcome::NotFound;
    }

    let lookup_err = match api.get_certificate(input).await {
        Ok(certificate) => match api.verify_certificate(&certificate.hash).await {
            Ok(v) if v.valid => return VerificationOutcome::Valid { certificate: Some(certificate) },
            Ok(_) => return VerificationOutcome::Invalid { certificate: Some(certificate) },
            Err(e) => e,
        },
        Err(e) => e,
    };

    if !looks_like_hash(input) {
        log::debug!("no certificate for {input}: {lookup_err}");
        return VerificationOutcome::NotFound;
    }

    log::debug!("id lookup for {input} failed ({lookup_err}); verifying as hash");
    match api.verify_certificate(input).await {
        Ok(v) if v.valid => VerificationOutcome::Valid { certificate: None },
        Ok(_) => VerificationOutcome::Invalid { certificate: None },
        Err(e) => VerificationOutcome::Error(e),
    }
}

/// The notification shown for `outcome`.
pub fn outcome_toast(outcome: &VerificationOutcome) -> Toast {
    const VERIFIED: &str = "This certificate has been verified on the blockchain.";
    const NOT_VERIFIED: &str = "This certificate could not be verified on the blockchain.";

    match outcome {
        VerificationOutcome::Valid { certificate: Some(_) } => Toast::success("Certificate Verified", VERIFIED),
        VerificationOutcome::Valid { certificate: None } => Toast::success("Certificate is valid", VERIFIED),
        VerificationOutcome::Invalid { certificate: Some(_) } => Toast::error("Certificate Invalid", NOT_VERIFIED),
        VerificationOutcome::Invalid { certificate: None } => Toast::error("Invalid Certificate", NOT_VERIFIED),
        VerificationOutcome::NotFound => {
            Toast::error("Certificate Not Found", "No certificate found with the provided ID or hash.")
        }
        VerificationOutcome::Error(_) => {
            Toast::error("Verification Error", "Failed to verify certificate hash. Please try again.")
        }
    }
}

/// Run the verify view's submit action. Blank input is ignored.
pub async fn submit_verify<T, S>(api: &ApiClient<T, S>, input: &str) -> Option<(VerificationOutcome, Toast)>
where
    T: HttpTransport,
    S: SessionStorage,
{
    if input.trim().is_empty() {
        return None;
    }
    let outcome = resolve_verification(api, input).await;
    let toast = outcome_toast(&outcome);
    Some((outcome, toast))
}

/// The `id` query parameter used to pre-fill the verify view.
///
/// Accepts a raw query with or without the leading `?`.
pub fn verify_query_id(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
