//! # ledger-client
//!
//! Client library for the certificate ledger API.
//!
//! This crate contains the persisted session store, the REST client and its
//! transport seam, the declarative route guard, and the page-level flows
//! (login, register, issue, dashboard, verify) that turn API results into
//! user-facing notifications. Browser bindings live behind the `hydrate`
//! feature; the `cli` crate drives the same flows from a terminal.

pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Install the browser panic hook and route `log` records to the console.
#[cfg(feature = "hydrate")]
pub fn init_browser_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
