//! Password hashing helpers (argon2)

use crate::utils::AppError;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::password_hash::rand_core::OsRng;
use argon2::Argon2;

/// Hash a password into a PHC string
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Verify a password against a PHC hash string.
///
/// A mismatch is `Ok(false)`; only malformed hashes error.
pub fn verify_password(hash: &str, password: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid password hash: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::internal(format!(
            "Password verification failed: {e}"
        ))),
    }
}

use super::StaffRole;

/// Resolved login hashes for the two staff roles
#[derive(Debug, Clone)]
pub struct StaffCredentials {
    admin_hash: String,
    kitchen_hash: String,
}

impl StaffCredentials {
    /// Resolve hashes from configuration.
    ///
    /// 开发环境允许缺省：用默认口令现场生成哈希并告警；生产环境缺省直接报错。
    pub fn resolve(
        admin_hash: Option<String>,
        kitchen_hash: Option<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            admin_hash: resolve_hash(admin_hash, StaffRole::Admin)?,
            kitchen_hash: resolve_hash(kitchen_hash, StaffRole::Kitchen)?,
        })
    }

    /// Verify a login attempt for a role
    pub fn verify(&self, role: StaffRole, password: &str) -> Result<bool, AppError> {
        let hash = match role {
            StaffRole::Admin => &self.admin_hash,
            StaffRole::Kitchen => &self.kitchen_hash,
        };
        verify_password(hash, password)
    }
}

fn resolve_hash(hash: Option<String>, role: StaffRole) -> Result<String, AppError> {
    match hash {
        Some(h) => Ok(h),
        None => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!(
                    role = %role,
                    "⚠️  Password hash not configured! Using default dev password '{role}123'."
                );
                hash_password(&format!("{role}123"))
            }
            #[cfg(not(debug_assertions))]
            {
                Err(AppError::internal(format!(
                    "{} password hash must be configured in production",
                    role
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("tiffin123").unwrap();
        assert!(verify_password(&hash, "tiffin123").unwrap());
        assert!(!verify_password(&hash, "wrong").unwrap());
    }

    #[test]
    fn test_malformed_hash_errors() {
        assert!(verify_password("not-a-phc-string", "pw").is_err());
    }

    #[test]
    fn test_staff_credentials_verify_per_role() {
        let creds = StaffCredentials::resolve(
            Some(hash_password("adminpw").unwrap()),
            Some(hash_password("kitchenpw").unwrap()),
        )
        .unwrap();

        assert!(creds.verify(StaffRole::Admin, "adminpw").unwrap());
        assert!(!creds.verify(StaffRole::Admin, "kitchenpw").unwrap());
        assert!(creds.verify(StaffRole::Kitchen, "kitchenpw").unwrap());
    }
}
