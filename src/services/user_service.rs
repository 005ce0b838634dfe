use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::credentials::Credentials;

#[derive(Error, Debug)]
pub enum UserServiceError {
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("User service unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Checks credentials. `Ok(false)` means the credentials were rejected;
/// `Err` means the check itself could not be performed.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<bool, UserServiceError>;
}

/// User store kept in memory with bcrypt password hashes.
pub struct InMemoryUserService {
    password_hashes: HashMap<String, String>,
    cost: u32,
    latency: Duration,
}

impl Default for InMemoryUserService {
    fn default() -> Self {
        Self {
            password_hashes: HashMap::new(),
            cost: bcrypt::DEFAULT_COST,
            latency: Duration::ZERO,
        }
    }
}

impl InMemoryUserService {
    pub fn new() -> Self {
        Self::default()
    }

    /// bcrypt work factor for users added afterwards.
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Delay every login to stand in for a remote call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_user(mut self, username: &str, password: &str) -> Result<Self, UserServiceError> {
        let hash = bcrypt::hash(password, self.cost)?;
        self.password_hashes.insert(username.to_string(), hash);
        debug!("Registered in-memory user: {}", username);
        Ok(self)
    }
}

#[async_trait]
impl UserService for InMemoryUserService {
    async fn login(&self, credentials: &Credentials) -> Result<bool, UserServiceError> {
        info!("Login attempt for user: {}", credentials.username);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let Some(hash) = self.password_hashes.get(&credentials.username) else {
            warn!("Login rejected: unknown user {}", credentials.username);
            return Ok(false);
        };

        let verified = bcrypt::verify(&credentials.password, hash)?;
        if verified {
            info!("User {} authenticated", credentials.username);
        } else {
            warn!("Login rejected: invalid password for user {}", credentials.username);
        }
        Ok(verified)
    }
}
