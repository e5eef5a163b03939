//! Keystore error types

use std::path::PathBuf;

use thiserror::Error;

use crate::error::KeyError;

/// Errors that can occur during keystore operations
///
/// A wrong passphrase and a tampered ciphertext both surface as
/// [`KeystoreError::Decryption`]. Nothing here ever carries the passphrase or a
/// derived value.
#[derive(Error, Debug)]
pub enum KeystoreError {
    /// The document is not a well-formed scrypt/aes-128-ctr v3 keystore
    #[error("malformed keystore: {0}")]
    Malformed(String),

    /// MAC mismatch, invalid decrypted scalar or address mismatch
    #[error("keystore decryption failed: wrong passphrase or corrupted keystore")]
    Decryption,

    /// Refusing to overwrite an existing file
    #[error("keystore already exists at path: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// The private key handed to the builder is unusable
    #[error(transparent)]
    Key(#[from] KeyError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for KeystoreError {
    fn from(e: serde_json::Error) -> Self {
        KeystoreError::Malformed(e.to_string())
    }
}

/// Result type for keystore operations
pub type KeystoreResult<T> = Result<T, KeystoreError>;
