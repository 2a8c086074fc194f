//! Input-format validators for customer contact fields.
//!
//! These encode the persisted format invariants: email shape, 10-digit local
//! mobile number with leading digit 6–9, and 6-digit postal code with a
//! non-zero leading digit.

/// Loose email shape check: no whitespace, exactly one `@` with non-empty
/// local part, and a dot somewhere after the `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Domain needs a dot with something on both sides.
    match domain.split_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

/// 10-digit local mobile number, leading digit 6–9.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10
        && phone.bytes().all(|b| b.is_ascii_digit())
        && matches!(phone.as_bytes()[0], b'6'..=b'9')
}

/// 6-digit postal code, non-zero leading digit.
pub fn is_valid_postal_code(code: &str) -> bool {
    code.len() == 6
        && code.bytes().all(|b| b.is_ascii_digit())
        && code.as_bytes()[0] != b'0'
}
