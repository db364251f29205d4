/// Password hashing for player accounts
use crate::error::{Result, ServerError};

#[derive(Debug, Clone)]
pub struct CredentialService {
    cost: u32,
}

impl CredentialService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password using bcrypt
    ///
    /// Empty or whitespace-only passwords are rejected.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        if password.trim().is_empty() {
            return Err(ServerError::BadRequest("Password is required".to_string()));
        }
        bcrypt::hash(password, self.cost).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }
}

impl Default for CredentialService {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
