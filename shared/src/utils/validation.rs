//! Identifier and code validation

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{8,15}$").expect("valid phone regex"));

static OTP_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4,8}$").expect("valid code regex"));

/// Loose email shape check (`local@domain.tld`, no whitespace)
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

/// 8 to 15 digits with an optional leading `+`
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_REGEX.is_match(value.trim())
}

/// 4 to 8 digits
pub fn is_valid_otp_code(value: &str) -> bool {
    OTP_CODE_REGEX.is_match(value.trim())
}

/// Mask an identifier for logging (e.g. `j***@example.com`, `***4567`)
pub fn mask_identifier(identifier: &str) -> String {
    let identifier = identifier.trim();
    if let Some((local, domain)) = identifier.split_once('@') {
        let first: String = local.chars().take(1).collect();
        return format!("{}***@{}", first, domain);
    }

    let chars: Vec<char> = identifier.chars().collect();
    if chars.len() > 4 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("***{}", tail)
    } else {
        "***".to_string()
    }
}
