//! Client-side input validation shared by the form flows.

/// A form submission rejected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Trimmed `value`, or [`FormError::MissingField`] when blank.
///
/// # Errors
///
/// Returns [`FormError::MissingField`] naming `label` when `value` is blank.
pub fn require(label: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(label));
    }
    Ok(trimmed.to_owned())
}
