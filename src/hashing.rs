//! Slow-hash capability. The account model only ever calls through [`SlowHash`];
//! the host decides the algorithm and its cost.

use anyhow::{Result, anyhow};
use argon2::{Algorithm, Argon2, PasswordHasher, Version};
use password_hash::SaltString;

use crate::config::SlowHashSettings;

/// One-way, deliberately expensive transform of a secret into a verifiable string.
pub trait SlowHash: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String>;
}

/// Argon2id over a fresh 16-byte random salt, producing PHC strings.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: argon2::Params,
}

impl Argon2Hasher {
    pub fn new(settings: &SlowHashSettings) -> Result<Self> {
        Ok(Self { params: settings.params()? })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self { params: argon2::Params::default() }
    }
}

impl SlowHash for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes).map_err(|e| anyhow!(e.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| anyhow!(e.to_string()))?;
        let phc = self.argon2().hash_password(plaintext.as_bytes(), &salt).map_err(|e| anyhow!(e.to_string()))?.to_string();
        Ok(phc)
    }
}
