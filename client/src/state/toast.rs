//! Transient user notifications.
//!
//! Page flows never mutate prior state on failure; they report through a
//! [`Toast`] and leave the rest of the view untouched.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// A titled notification with a one-line description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub description: String,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { level: ToastLevel::Success, title: title.into(), description: description.into() }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { level: ToastLevel::Error, title: title.into(), description: description.into() }
    }

    pub fn is_success(&self) -> bool {
        self.level == ToastLevel::Success
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
