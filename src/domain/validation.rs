//! Form field rules shared by the session and casting use cases.

use crate::domain::DomainError;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Optional country code, then 6 to 14 digits. Spaces and dashes are stripped first.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+?\d{1,3})?\d{6,14}$").expect("valid regex"));

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_AGE: u32 = 3;
pub const MAX_AGE: u32 = 120;

fn invalid(msg: impl Into<String>) -> DomainError {
    DomainError::Validation(msg.into())
}

pub fn validate_required(value: &str, label: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{} is required", label)));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(invalid("email is required"));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(invalid(format!("invalid email format: {}", email)));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.is_empty() {
        return Err(invalid("password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(invalid(format!(
            "password needs at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(invalid("password needs an uppercase letter"));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(invalid("password needs a lowercase letter"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid("password needs a digit"));
    }
    Ok(())
}

/// Phone is optional: empty input passes.
pub fn validate_phone(phone: &str) -> Result<(), DomainError> {
    if phone.is_empty() {
        return Ok(());
    }
    let cleaned: String = phone.chars().filter(|c| *c != ' ' && *c != '-').collect();
    if !PHONE_RE.is_match(&cleaned) {
        return Err(invalid(format!("invalid phone number: {}", phone)));
    }
    Ok(())
}

/// Age is optional: empty input passes. Returns the parsed age when present.
pub fn validate_age(age: &str) -> Result<Option<u8>, DomainError> {
    let age = age.trim();
    if age.is_empty() {
        return Ok(None);
    }
    match age.parse::<u32>() {
        Ok(n) if (MIN_AGE..=MAX_AGE).contains(&n) => Ok(Some(n as u8)),
        _ => Err(invalid(format!(
            "invalid age ({}-{}): {}",
            MIN_AGE, MAX_AGE, age
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLevel {
    None,
    Weak,
    Medium,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    /// 0..=5
    pub score: u8,
    pub level: StrengthLevel,
}

pub fn password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength {
            score: 0,
            level: StrengthLevel::None,
        };
    }
    let len = password.chars().count();
    let checks = [
        len >= MIN_PASSWORD_LEN,
        len >= 12,
        password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = checks.iter().filter(|ok| **ok).count() as u8;
    let level = match score {
        0..=2 => StrengthLevel::Weak,
        3 => StrengthLevel::Medium,
        _ => StrengthLevel::Strong,
    };
    PasswordStrength { score, level }
}
