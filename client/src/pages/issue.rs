//! Certificate issuance flow.
//!
//! On success the form is reset to empty so the next certificate starts
//! clean; on failure the form is left exactly as submitted.

#[cfg(test)]
#[path = "issue_test.rs"]
mod issue_test;

use crate::net::api::ApiClient;
use crate::net::transport::HttpTransport;
use crate::net::types::CertificateRequest;
use crate::pages::form::{FormError, require};
use crate::state::storage::SessionStorage;
use crate::state::toast::Toast;

/// Trimmed copy of `form`, every field required.
///
/// # Errors
///
/// Returns [`FormError::MissingField`] for the first blank field.
pub fn validate_issue_input(form: &CertificateRequest) -> Result<CertificateRequest, FormError> {
    Ok(CertificateRequest {
        recipient_name: require("Recipient name", &form.recipient_name)?,
        recipient_email: require("Recipient email", &form.recipient_email)?,
        certificate_title: require("Certificate title", &form.certificate_title)?,
        issue_date: require("Issue date", &form.issue_date)?,
        issuer_name: require("Issuer name", &form.issuer_name)?,
        description: require("Description", &form.description)?,
    })
}

/// Issue a certificate from `form`, resetting it on success.
pub async fn submit_issue<T, S>(api: &ApiClient<T, S>, form: &mut CertificateRequest) -> Toast
where
    T: HttpTransport,
    S: SessionStorage,
{
    let request = match validate_issue_input(form) {
        Ok(request) => request,
        Err(e) => return Toast::error("Error", e.to_string()),
    };

    match api.create_certificate(&request).await {
        Ok(certificate) => {
            log::info!("issued certificate {} (block {})", certificate.id, certificate.block_number);
            *form = CertificateRequest::default();
            Toast::success(
                "Certificate Issued",
                format!(
                    "Certificate for {} has been successfully issued and added to the blockchain.",
                    certificate.recipient_name
                ),
            )
        }
        Err(e) => Toast::error("Error", e.to_string()),
    }
}
