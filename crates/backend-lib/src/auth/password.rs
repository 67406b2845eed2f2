// ============================
// accounts-backend/src/auth/password.rs
// ============================
//! Password hashing and verification.
use crate::error::AppError;
use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    },
    Params, Scrypt,
};
use zeroize::Zeroize;

/// One-way salted password hashing over scrypt.
///
/// Output is a PHC string, so verification reads the cost parameters back
/// from the stored hash and keeps working after `log_n` is changed.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Hasher with a custom cost exponent (`r = 8`, `p = 1`)
    pub fn with_log_n(log_n: u8) -> Result<Self, AppError> {
        let params = Params::new(
            log_n,
            Params::RECOMMENDED_R,
            Params::RECOMMENDED_P,
            Params::RECOMMENDED_LEN,
        )
        .map_err(|e| AppError::Internal(format!("invalid scrypt parameters: {e}")))?;
        Ok(Self { params })
    }

    /// Hash a plaintext password. Two calls never produce the same string.
    pub fn hash(&self, plain: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, self.params, &salt)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?
            .to_string();
        Ok(hash)
    }

    /// Hash a password and zeroize the original
    pub fn hash_secure(&self, plain: &mut String) -> Result<String, AppError> {
        let hash = self.hash(plain);
        plain.zeroize();
        hash
    }

    /// True iff `plain` produced `hash`. Unparseable hashes never verify.
    pub fn verify(&self, hash: &str, plain: &str) -> bool {
        verify_password(hash, plain)
    }
}

/// Verify a password against a hash
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}
