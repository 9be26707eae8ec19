//! Local validation for the signup form and phone number formatting. These
//! checks are UX only: the identity service remains the authority on whether an
//! address can receive a magic link.

use crate::features::auth::types::{RegistrationProfile, Role};
use regex::Regex;
use thiserror::Error;

/// Minimum digit count for an optional phone number.
pub const MIN_PHONE_DIGITS: usize = 10;
/// Longest formatted phone number, `(XXX) XXX-XXXX`.
pub const MAX_PHONE_CHARS: usize = 14;

/// Locally detected, user-correctable form errors. The display text is shown
/// as-is in the error banner.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your email address.")]
    EmailRequired,
    #[error("Please fill in all required fields (marked with *).")]
    MissingRequiredFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a valid phone number.")]
    InvalidPhone,
    #[error("Please accept the Terms & Conditions to continue.")]
    TermsNotAccepted,
}

/// Raw signup form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub accept_terms: bool,
}

impl SignupForm {
    /// Validates the form in a fixed order; the first failing check wins.
    ///
    /// # Errors
    /// Returns the first `ValidationError` encountered.
    pub fn validate(&self) -> Result<RegistrationProfile, ValidationError> {
        if self.email.is_empty() || self.first_name.is_empty() || self.last_name.is_empty() {
            return Err(ValidationError::MissingRequiredFields);
        }

        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }

        if !self.phone.is_empty() && phone_digits(&self.phone).len() < MIN_PHONE_DIGITS {
            return Err(ValidationError::InvalidPhone);
        }

        if !self.accept_terms {
            return Err(ValidationError::TermsNotAccepted);
        }

        Ok(RegistrationProfile {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: optional(&self.phone),
            address: optional(&self.address),
            city: optional(&self.city),
            zip_code: optional(&self.zip_code),
            role: Role::Customer,
        })
    }
}

/// Validates the login email. Format is left to the input widget.
///
/// # Errors
/// Returns `ValidationError::EmailRequired` for blank input.
pub fn validate_login_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmailRequired)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Loose email format check: something, `@`, something, `.`, something, with
/// no whitespace and no extra `@`.
pub fn is_valid_email(email: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").is_ok_and(|regex| regex.is_match(email))
}

/// Strips everything except ASCII digits.
pub fn phone_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Formats phone input as the user types, into `(XXX) XXX-XXXX`.
///
/// Fewer than 4 digits are returned bare, 4 to 6 digits become `(XXX) XXX`,
/// and 7 or more are fully formatted with anything past the tenth digit dropped.
pub fn format_phone_number(value: &str) -> String {
    let digits = phone_digits(value);
    let len = digits.len();

    if len < 4 {
        return digits;
    }
    if len < 7 {
        return format!("({}) {}", &digits[..3], &digits[3..]);
    }
    format!(
        "({}) {}-{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..len.min(MIN_PHONE_DIGITS)]
    )
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
