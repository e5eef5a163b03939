//! scrypt key derivation for v3 keystores
//!
//! The standard profile (`n = 2^18, r = 8, p = 1`) is what new keystores get.
//! The light profile (`n = 2^12, r = 8, p = 6`) matches what other Web3 tools
//! call "light" and exists for constrained devices and tests.

use serde::{Deserialize, Serialize};

use super::error::{KeystoreError, KeystoreResult};
use crate::secure::SecretBytes;

/// Standard scrypt cost, 2^18
pub const SCRYPT_N: u32 = 262144;
pub const SCRYPT_R: u32 = 8;
pub const SCRYPT_P: u32 = 1;

/// Light scrypt cost, 2^12
pub const LIGHT_SCRYPT_N: u32 = 4096;
pub const LIGHT_SCRYPT_P: u32 = 6;

/// Upper bound on scrypt memory, `128 * r * n` bytes (1 GiB)
pub const MAX_SCRYPT_MEMORY: u64 = 1 << 30;

/// Upper bound on total scrypt mixing, `128 * r * n * p` bytes
pub const MAX_SCRYPT_WORK: u64 = 1 << 32;

/// Derived key length
pub const SCRYPT_DKLEN: u32 = 32;

/// Salt length in bytes
pub const SALT_LENGTH: usize = 32;

/// The only KDF identifier accepted
pub const KDF_SCRYPT: &str = "scrypt";

/// scrypt cost profile for new keystores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScryptProfile {
    #[default]
    Standard,
    Light,
}

/// `crypto.kdfparams` of a v3 keystore
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScryptParams {
    /// Derived key length in bytes
    pub dklen: u32,
    /// CPU/memory cost, a power of two
    pub n: u32,
    /// Parallelization
    pub p: u32,
    /// Block size
    pub r: u32,
    /// Salt as hex string
    pub salt: String,
}

impl ScryptParams {
    /// Parameters for `profile` with the given salt
    pub fn new(profile: ScryptProfile, salt: &[u8]) -> Self {
        let (n, p) = match profile {
            ScryptProfile::Standard => (SCRYPT_N, SCRYPT_P),
            ScryptProfile::Light => (LIGHT_SCRYPT_N, LIGHT_SCRYPT_P),
        };
        Self {
            dklen: SCRYPT_DKLEN,
            n,
            p,
            r: SCRYPT_R,
            salt: hex::encode(salt),
        }
    }

    /// Check the parameters before spending time on derivation
    pub fn validate(&self) -> KeystoreResult<()> {
        // MAC and cipher key together need 32 bytes
        if self.dklen < SCRYPT_DKLEN {
            return Err(KeystoreError::Malformed(format!(
                "kdfparams.dklen must be at least {}, got {}",
                SCRYPT_DKLEN, self.dklen
            )));
        }
        if self.n <= 1 || !self.n.is_power_of_two() {
            return Err(KeystoreError::Malformed(format!(
                "kdfparams.n must be a power of two greater than 1, got {}",
                self.n
            )));
        }
        if self.r == 0 {
            return Err(KeystoreError::Malformed(
                "kdfparams.r must be positive".to_string(),
            ));
        }
        if self.p == 0 {
            return Err(KeystoreError::Malformed(
                "kdfparams.p must be positive".to_string(),
            ));
        }
        let memory = 128 * u64::from(self.r) * u64::from(self.n);
        if memory > MAX_SCRYPT_MEMORY {
            return Err(KeystoreError::Malformed(format!(
                "kdfparams n={} r={} need {} bytes, limit is {}",
                self.n, self.r, memory, MAX_SCRYPT_MEMORY
            )));
        }
        if memory.saturating_mul(u64::from(self.p)) > MAX_SCRYPT_WORK {
            return Err(KeystoreError::Malformed(format!(
                "kdfparams p={} exceeds the work limit",
                self.p
            )));
        }
        self.salt_bytes()?;
        Ok(())
    }

    pub fn salt_bytes(&self) -> KeystoreResult<Vec<u8>> {
        hex::decode(&self.salt)
            .map_err(|e| KeystoreError::Malformed(format!("invalid kdfparams.salt hex: {}", e)))
    }

    /// Derive the keystore key from `passphrase`
    pub fn derive_key(&self, passphrase: &str) -> KeystoreResult<SecretBytes> {
        self.validate()?;
        let salt = self.salt_bytes()?;
        scrypt_derive_key(passphrase, &salt, self.n, self.r, self.p, self.dklen as usize)
    }
}

/// Derive a key using scrypt
///
/// `n` must be a power of two.
pub fn scrypt_derive_key(
    passphrase: &str,
    salt: &[u8],
    n: u32,
    r: u32,
    p: u32,
    dklen: usize,
) -> KeystoreResult<SecretBytes> {
    let log_n = n.trailing_zeros() as u8;

    let params = scrypt::Params::new(log_n, r, p, dklen)
        .map_err(|e| KeystoreError::Malformed(format!("invalid scrypt parameters: {}", e)))?;

    let mut output = vec![0u8; dklen];
    scrypt::scrypt(passphrase.as_bytes(), salt, &params, &mut output)
        .map_err(|e| KeystoreError::Malformed(format!("scrypt output length: {}", e)))?;

    Ok(secrecy::SecretBox::new(Box::new(output)))
}

/// Generate a random salt
pub fn generate_salt() -> Vec<u8> {
    use rand::RngCore;
    let mut salt = vec![0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}
