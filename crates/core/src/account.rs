//! User account field rules (registration and profile updates).

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::validation::{check_max_len, require_text};

pub const USERNAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;

/// Minimum password length enforced at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Usernames are letters, digits and `@ . + - _` only.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    require_text("username", username, USERNAME_MAX_LEN)?;
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if !username.chars().all(allowed) {
        return Err(CoreError::validation(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, \
             and @/./+/-/_ characters",
        ));
    }
    Ok(())
}

/// Email is optional; when present it must be syntactically valid.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Ok(());
    }
    check_max_len("email", email, EMAIL_MAX_LEN)?;
    if !email.validate_email() {
        return Err(CoreError::validation("email", "Enter a valid email address"));
    }
    Ok(())
}
