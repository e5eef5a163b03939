//! Web3 Secret Storage (version 3) keystores
//!
//! The format Ethereum wallets use for a single secp256k1 key:
//!
//! - scrypt key derivation from a passphrase
//! - AES-128-CTR encryption of the 32-byte private key
//! - Keccak-256 MAC over the second half of the derived key and the ciphertext
//! - JSON serialization with a UUID `id` and the owner `address`
//!
//! Decryption failures are deliberately coarse. A wrong passphrase and a
//! corrupted file both yield [`KeystoreError::Decryption`].
//!
//! # Example
//!
//! ```rust,no_run
//! use zzz_crypto::keystore::{create_keystore, open_keystore, ScryptProfile};
//! use zzz_crypto::secure::IntoSecret;
//!
//! let private_key = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
//!     .to_string()
//!     .into_secret();
//! let passphrase = "my-strong-passphrase".to_string().into_secret();
//!
//! create_keystore("./keys/player.json", &private_key, &passphrase, ScryptProfile::Standard)?;
//!
//! let bytes = std::fs::read("./keys/player.json")?;
//! let key = open_keystore(&bytes, &passphrase)?;
//! println!("{}", key.address());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cipher;
mod encrypted;
mod error;
mod kdf;
mod mac;

use std::path::Path;

use alloy_primitives::Address;
use tracing::info;

use crate::key::KeyMaterial;
use crate::secure::SecretString;

pub use cipher::{decrypt_secret, encrypt_secret, CipherParams};
pub use encrypted::{CryptoModule, EncryptedKeystore, KeystoreBuilder, KEYSTORE_VERSION};
pub use error::{KeystoreError, KeystoreResult};
pub use kdf::{scrypt_derive_key, ScryptParams, ScryptProfile};
pub use mac::{compute_mac, verify_mac};

/// Encrypt a hex private key into a new keystore file at `path`.
///
/// Returns the address of the stored key. Fails with
/// [`KeystoreError::AlreadyExists`] rather than replacing a file.
pub fn create_keystore<P: AsRef<Path>>(
    path: P,
    private_key: &SecretString,
    passphrase: &SecretString,
    profile: ScryptProfile,
) -> KeystoreResult<Address> {
    let path = path.as_ref();
    let key = KeyMaterial::from_hex(private_key)?;
    let keystore = KeystoreBuilder::new(&key, passphrase)
        .profile(profile)
        .build()?;
    keystore.save(path)?;
    info!(path = %path.display(), address = %key.address(), "created keystore");
    Ok(key.address())
}

/// Decrypt a keystore document held in memory
pub fn open_keystore(bytes: &[u8], passphrase: &SecretString) -> KeystoreResult<KeyMaterial> {
    EncryptedKeystore::from_json(bytes)?.decrypt(passphrase)
}
