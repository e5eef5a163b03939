//! Secp256k1 key material for commitment signing
//!
//! `KeyMaterial` holds a decrypted private key together with the EVM address
//! derived from it (`keccak256(uncompressed_pubkey[1..])[12..]`). It lives
//! only for the duration of one signing call:
//!
//! - the wrapped `k256` signing key zeroizes its scalar on drop
//! - `Debug` never prints the secret
//! - `Clone` is not implemented

use alloy_primitives::{keccak256, Address};
use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::{CryptoRng, RngCore};
use secrecy::ExposeSecret;
use zeroize::Zeroizing;

use crate::eip712::strip_hex_prefix;
use crate::error::KeyError;
use crate::secure::{IntoSecret, SecretBytes, SecretString};

/// Private key length in bytes
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// A private key and its derived identity
pub struct KeyMaterial {
    signing_key: SigningKey,
    address: Address,
}

impl KeyMaterial {
    /// Generate a fresh random key
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self::from_signing_key(SigningKey::random(rng))
    }

    /// Load from a raw 32-byte scalar
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(KeyError::InvalidEncoding);
        }
        let signing_key = SigningKey::from_slice(bytes).map_err(|_| KeyError::InvalidScalar)?;
        Ok(Self::from_signing_key(signing_key))
    }

    /// Load from a hex string (optional `0x`, surrounding whitespace ignored)
    pub fn from_hex(private_key: &SecretString) -> Result<Self, KeyError> {
        let trimmed = strip_hex_prefix(private_key.expose_secret().trim());
        if trimmed.len() != PRIVATE_KEY_LENGTH * 2 {
            return Err(KeyError::InvalidEncoding);
        }
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        hex::decode_to_slice(trimmed, bytes.as_mut_slice())
            .map_err(|_| KeyError::InvalidEncoding)?;
        Self::from_bytes(bytes.as_slice())
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = address_from_verifying_key(signing_key.verifying_key());
        Self {
            signing_key,
            address,
        }
    }

    /// EVM address of this key
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn verifying_key(&self) -> &VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Copy of the raw scalar, zeroized when the returned secret is dropped
    pub fn secret_bytes(&self) -> SecretBytes {
        let bytes = Zeroizing::new(self.signing_key.to_bytes());
        bytes.to_vec().into_secret()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("signing_key", &"[REDACTED]")
            .field("address", &self.address)
            .finish()
    }
}

/// Derive the EVM address of a public key
pub fn address_from_verifying_key(verifying_key: &VerifyingKey) -> Address {
    let uncompressed = verifying_key.as_affine().to_encoded_point(false);
    // Skip the 0x04 SEC1 tag
    let hash = keccak256(&uncompressed.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
