//! Field validation rules.
//!
//! Callers aggregate the returned messages instead of stopping at the
//! first violation, so each check reports a complete, static description.

/// Minimum length for names and recipients.
pub const MIN_NAME_LENGTH: usize = 3;

/// Minimum length for message bodies.
pub const MIN_TEXT_LENGTH: usize = 3;

/// Validate a participant or recipient name.
///
/// # Errors
///
/// Returns a description of the violation.
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("name must not be empty");
    }
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err("name must be at least 3 characters");
    }
    Ok(())
}

/// Validate a message recipient.
///
/// Recipients share the name floor; the reserved "everyone" target passes
/// it naturally.
///
/// # Errors
///
/// Returns a description of the violation.
pub fn validate_recipient(to: &str) -> Result<(), &'static str> {
    if to.trim().is_empty() {
        return Err("to must not be empty");
    }
    if to.chars().count() < MIN_NAME_LENGTH {
        return Err("to must be at least 3 characters");
    }
    Ok(())
}

/// Validate a message body.
///
/// # Errors
///
/// Returns a description of the violation.
pub fn validate_text(text: &str) -> Result<(), &'static str> {
    if text.trim().is_empty() {
        return Err("text must not be empty");
    }
    if text.chars().count() < MIN_TEXT_LENGTH {
        return Err("text must be at least 3 characters");
    }
    Ok(())
}
