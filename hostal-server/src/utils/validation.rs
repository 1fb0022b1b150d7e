//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! CRUD handlers. The document store does not enforce lengths itself.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: floor, room type, category, unit, product, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions and movement reasons
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: room codes, documents, phones, barcodes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 8;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Minimal shape check for an email address; uniqueness is the
/// repository's concern.
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    let Some((local, domain)) = value.split_once('@') else {
        return Err(AppError::validation("email is not a valid address"));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::validation("email is not a valid address"));
    }
    Ok(())
}

/// Password length bounds for registration and user creation.
pub fn validate_password(value: &str) -> Result<(), AppError> {
    if value.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if value.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at most {MAX_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_empty_and_oversized() {
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(MAX_NAME_LEN + 1), "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Piso 1", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn email_shape_check() {
        assert!(validate_email("admin@hostal.pe").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@hostal.pe").is_err());
        assert!(validate_email("admin@nodot").is_err());
    }

    #[test]
    fn password_bounds() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long-enough-pass").is_ok());
    }
}
