//! AES-128-CTR encryption of the private key
//!
//! The cipher key is the first 16 bytes of the scrypt output. CTR mode needs no
//! padding, so the ciphertext has the private key's length.

use aes::Aes128;
use cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use serde::{Deserialize, Serialize};

use super::error::{KeystoreError, KeystoreResult};
use crate::secure::SecretBytes;

/// IV length for AES-128-CTR
pub const IV_LENGTH: usize = 16;

/// AES-128 key length
pub const AES_KEY_LENGTH: usize = 16;

/// The only cipher identifier accepted
pub const CIPHER_AES_128_CTR: &str = "aes-128-ctr";

type Aes128Ctr = Ctr128BE<Aes128>;

/// `crypto.cipherparams` of a v3 keystore
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CipherParams {
    /// IV as hex string
    pub iv: String,
}

impl CipherParams {
    pub fn new(iv: &[u8]) -> Self {
        Self {
            iv: hex::encode(iv),
        }
    }

    /// Decoded IV; must be exactly 16 bytes
    pub fn iv_bytes(&self) -> KeystoreResult<[u8; IV_LENGTH]> {
        let bytes = hex::decode(&self.iv)
            .map_err(|e| KeystoreError::Malformed(format!("invalid cipherparams.iv hex: {}", e)))?;
        bytes.as_slice().try_into().map_err(|_| {
            KeystoreError::Malformed(format!(
                "cipherparams.iv must be {} bytes, got {}",
                IV_LENGTH,
                bytes.len()
            ))
        })
    }
}

/// Encrypt `secret` under `derived_key[..16]`
pub fn encrypt_secret(secret: &[u8], derived_key: &[u8], iv: &[u8; IV_LENGTH]) -> KeystoreResult<Vec<u8>> {
    let mut ciphertext = secret.to_vec();
    apply_keystream(&mut ciphertext, derived_key, iv)?;
    Ok(ciphertext)
}

/// Decrypt `ciphertext` under `derived_key[..16]`
pub fn decrypt_secret(
    ciphertext: &[u8],
    derived_key: &[u8],
    iv: &[u8; IV_LENGTH],
) -> KeystoreResult<SecretBytes> {
    let mut plaintext = ciphertext.to_vec();
    apply_keystream(&mut plaintext, derived_key, iv)?;
    Ok(secrecy::SecretBox::new(Box::new(plaintext)))
}

fn apply_keystream(buf: &mut [u8], derived_key: &[u8], iv: &[u8; IV_LENGTH]) -> KeystoreResult<()> {
    let key: &[u8; AES_KEY_LENGTH] = derived_key
        .get(..AES_KEY_LENGTH)
        .and_then(|k| k.try_into().ok())
        .ok_or_else(|| {
            KeystoreError::Malformed(format!(
                "derived key must be at least {} bytes, got {}",
                AES_KEY_LENGTH,
                derived_key.len()
            ))
        })?;

    let mut cipher = Aes128Ctr::new(key.into(), iv.into());
    cipher.apply_keystream(buf);
    Ok(())
}

/// Generate a random IV
pub fn generate_iv() -> [u8; IV_LENGTH] {
    use rand::RngCore;
    let mut iv = [0u8; IV_LENGTH];
    rand::thread_rng().fill_bytes(&mut iv);
    iv
}
