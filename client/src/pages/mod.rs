//! Route-level flows.
//!
//! ARCHITECTURE
//! ============
//! Each page module owns the orchestration behind one route: input
//! validation, the API calls, session updates, navigation, and the toast the
//! user sees. Rendering is left to whichever front-end drives the flow.

pub mod dashboard;
pub mod form;
pub mod issue;
pub mod login;
pub mod register;
pub mod verify;
