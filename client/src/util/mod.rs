//! Routing and navigation helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `guard` holds the framework-free access table and state machine, `auth`
//! binds it to Leptos routing, and `navigate` is the seam both the guard and
//! logout use to move the user.

pub mod auth;
pub mod guard;
pub mod navigate;
