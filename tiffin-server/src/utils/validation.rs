//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - Reasonable UX limits for names, notes, addresses
//! - The OTP gateway contract (10-digit local numbers, 4-6 digit codes)

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu item, category, customer, staff
pub const MAX_NAME_LEN: usize = 200;

/// Notes and special requests (delivery note, line-item request, log note)
pub const MAX_NOTE_LEN: usize = 500;

/// Addresses and address fragments (apartment, flat number)
pub const MAX_ADDRESS_LEN: usize = 500;

/// Local phone number length (digits, without country code)
pub const PHONE_DIGITS: usize = 10;

/// OTP code length bounds
pub const OTP_MIN_DIGITS: usize = 4;
pub const OTP_MAX_DIGITS: usize = 6;

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

/// Validate a local phone number: exactly 10 ASCII digits.
pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    if phone.len() != PHONE_DIGITS || !phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::validation(format!(
            "Phone number must be exactly {PHONE_DIGITS} digits"
        )));
    }
    Ok(())
}

/// Validate an OTP code: 4-6 ASCII digits.
pub fn validate_otp(otp: &str) -> Result<(), AppError> {
    if otp.len() < OTP_MIN_DIGITS
        || otp.len() > OTP_MAX_DIGITS
        || !otp.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(AppError::validation(format!(
            "OTP must be {OTP_MIN_DIGITS}-{OTP_MAX_DIGITS} digits"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("98765").is_err()); // too short
        assert!(validate_phone("98765432101").is_err()); // too long
        assert!(validate_phone("98765abc10").is_err()); // non-digit
        assert!(validate_phone("+919876543").is_err()); // plus sign
    }

    #[test]
    fn test_validate_otp() {
        assert!(validate_otp("1234").is_ok());
        assert!(validate_otp("123456").is_ok());
        assert!(validate_otp("123").is_err());
        assert!(validate_otp("1234567").is_err());
        assert!(validate_otp("12a4").is_err());
    }

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("Burger", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }
}
