//! Networking modules for the certificate ledger REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns request construction and response normalization, `transport`
//! is the seam over the actual HTTP stack, and `types` defines the JSON wire
//! schema shared with the backend.

pub mod api;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
