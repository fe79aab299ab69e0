//! Argon2id password hashing, verification, and change-password rules.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Minimum length a new password must have.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Validate the change-password preconditions: the new password must reach
/// the minimum length and match its confirmation.
///
/// Returns every violated rule so the caller can report them together.
pub fn validate_new_password(nueva: &str, confirmacion: &str) -> Vec<String> {
    let mut errores = Vec::new();

    if nueva.trim().is_empty() {
        errores.push("La nueva contraseña es requerida".to_string());
    } else if nueva.len() < MIN_PASSWORD_LENGTH {
        errores.push(format!(
            "La nueva contraseña debe tener al menos {MIN_PASSWORD_LENGTH} caracteres"
        ));
    }

    if nueva != confirmacion {
        errores.push("Las contraseñas nuevas no coinciden".to_string());
    }

    errores
}
