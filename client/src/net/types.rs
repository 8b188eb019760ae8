//! Wire DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON. Two historical client
//! schemas disagreed on `issuerId` (optional vs required) and `role`; both
//! are optional here so either backend shape decodes.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Authenticated account as returned by the auth endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Account role (e.g. `"admin"`), when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// An issued certificate. Owned by the backend; read-only on the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Backend-assigned identifier (e.g. `"CERT-1a2b3c"`).
    pub id: String,
    /// Content hash of the ledger block holding this certificate.
    pub hash: String,
    pub recipient_name: String,
    pub recipient_email: String,
    pub certificate_title: String,
    pub issue_date: String,
    /// Issuing user id. Assigned server-side from the bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_id: Option<String>,
    pub issuer_name: String,
    pub description: String,
    /// Index of the ledger block.
    pub block_number: u64,
    pub timestamp: String,
}

/// Issuer-supplied fields for a new certificate. Identity, hash, and block
/// data are assigned by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    pub recipient_name: String,
    pub recipient_email: String,
    pub certificate_title: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub issue_date: String,
    pub issuer_name: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Registration response.
///
/// Some backends answer with a full session, others with just the created
/// account.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RegisterResponse {
    Session(AuthResponse),
    Account(User),
}

impl RegisterResponse {
    /// The registered account, regardless of response shape.
    pub fn user(&self) -> &User {
        match self {
            Self::Session(auth) => &auth.user,
            Self::Account(user) => user,
        }
    }
}

/// Result of `GET /certificates/verify/{hash}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub valid: bool,
}
