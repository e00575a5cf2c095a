use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

use crate::application::errors::AccountError;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MAX_NAME_CHARS: usize = 100;

pub fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| AccountError::Hashing(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccountError::Hashing(e.to_string()))
}

/// `Ok(false)` on a mismatch, `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AccountError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AccountError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub fn validate_name(name: &str) -> Result<(), AccountError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
        return Err(AccountError::Validation(format!(
            "Name must be 1-{} characters",
            MAX_NAME_CHARS
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AccountError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid || email.len() > 254 {
        return Err(AccountError::Validation("Email address is invalid".into()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AccountError> {
    if password.len() < MIN_PASSWORD_LEN || password.len() > MAX_PASSWORD_LEN {
        return Err(AccountError::Validation(format!(
            "Password must be {}-{} characters",
            MIN_PASSWORD_LEN, MAX_PASSWORD_LEN
        )));
    }
    Ok(())
}
