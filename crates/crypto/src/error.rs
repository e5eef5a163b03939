//! Cryptographic error types

use thiserror::Error;

use crate::keystore::KeystoreError;
use crate::secret_provider::SecretInputError;

/// Malformed input to the commitment digest builder
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// A message field is not a base-10 unsigned 256-bit integer
    #[error("invalid {field}: {value:?} is not a base-10 unsigned 256-bit integer")]
    InvalidInteger {
        /// Schema name of the offending field
        field: &'static str,
        /// The rejected input
        value: String,
    },

    /// The verifying contract is not 20 bytes of hex
    #[error("invalid address {0:?}: expected 40 hex digits with optional 0x prefix")]
    InvalidAddress(String),

    /// A digest is not 32 bytes of hex
    #[error("invalid digest {0:?}: expected 64 hex digits with optional 0x prefix")]
    InvalidDigest(String),
}

/// Raw private key errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Not 32 bytes of hex
    #[error("invalid private key encoding: expected 64 hex digits")]
    InvalidEncoding,

    /// Zero or not below the curve order
    #[error("invalid private key: not a valid secp256k1 scalar")]
    InvalidScalar,
}

/// Signing and verification errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The curve operation failed while signing
    #[error("signing failed: {0}")]
    Signing(String),

    /// r/s out of range, or public key recovery failed
    #[error("invalid signature")]
    InvalidSignature,

    /// Signature is not exactly 65 bytes
    #[error("invalid signature encoding: expected {expected} bytes, got {actual}")]
    InvalidEncoding { expected: usize, actual: usize },

    /// Signature is not valid hex
    #[error("invalid signature encoding: {0}")]
    InvalidHex(String),

    /// Recovery parameter is not in the legacy 27/28 range
    #[error("unexpected recovery id {0}: expected 27 or 28")]
    UnexpectedRecoveryConvention(u8),
}

/// Top-level error for the commitment signing core
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Keystore(#[from] KeystoreError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    SecretInput(#[from] SecretInputError),
}

/// Result type for the commitment signing core
pub type Result<T> = std::result::Result<T, CryptoError>;
