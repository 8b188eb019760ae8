//! Client state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `storage` abstracts the persisted key-value backend, `session` layers the
//! login-state contract on top of it, and `toast` carries the transient
//! notifications page flows surface to the user.

pub mod session;
pub mod storage;
pub mod toast;
