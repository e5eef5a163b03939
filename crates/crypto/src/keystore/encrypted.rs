//! Web3 Secret Storage (version 3) keystore document
//!
//! Combines the scrypt parameters, the AES-128-CTR ciphertext and the Keccak
//! MAC into the JSON layout used by Ethereum wallets:
//!
//! ```text
//! { "address", "crypto": { "cipher", "ciphertext", "cipherparams": { "iv" },
//!   "kdf", "kdfparams": { "dklen", "n", "p", "r", "salt" }, "mac" }, "id", "version": 3 }
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use alloy_primitives::Address;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::cipher::{
    decrypt_secret, encrypt_secret, generate_iv, CipherParams, CIPHER_AES_128_CTR,
};
use super::error::{KeystoreError, KeystoreResult};
use super::kdf::{generate_salt, ScryptParams, ScryptProfile, KDF_SCRYPT};
use super::mac::{compute_mac, verify_mac, MAC_LENGTH};
use crate::eip712::parse_address;
use crate::key::{KeyMaterial, PRIVATE_KEY_LENGTH};
use crate::secure::SecretString;

/// Schema version written and accepted
pub const KEYSTORE_VERSION: u32 = 3;

/// A version 3 encrypted keystore
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncryptedKeystore {
    /// Owner address, 40 lowercase hex digits without `0x`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Older clients wrote this key capitalized
    #[serde(alias = "Crypto")]
    pub crypto: CryptoModule,
    /// UUID of this keystore
    pub id: String,
    pub version: u32,
}

/// The `crypto` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CryptoModule {
    pub cipher: String,
    /// Encrypted private key as hex
    pub ciphertext: String,
    pub cipherparams: CipherParams,
    pub kdf: String,
    pub kdfparams: ScryptParams,
    /// Hex MAC over `derived_key[16..32] || ciphertext`
    pub mac: String,
}

impl EncryptedKeystore {
    /// Encrypt `key` with the standard scrypt profile
    pub fn encrypt(key: &KeyMaterial, passphrase: &SecretString) -> KeystoreResult<Self> {
        KeystoreBuilder::new(key, passphrase).build()
    }

    /// Parse a keystore document without decrypting it
    pub fn from_json(bytes: &[u8]) -> KeystoreResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> KeystoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load keystore from a file
    pub fn load<P: AsRef<Path>>(path: P) -> KeystoreResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading keystore");
        let contents = fs::read(path)?;
        Self::from_json(&contents)
    }

    /// Save keystore to a new file
    ///
    /// The file is created with restricted permissions (0600). An existing
    /// file is never overwritten, and a failed write removes what was created.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> KeystoreResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = match options.open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(KeystoreError::AlreadyExists(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = file
            .write_all(json.as_bytes())
            .and_then(|()| file.sync_all())
        {
            drop(file);
            let _ = fs::remove_file(path);
            return Err(e.into());
        }

        debug!(path = %path.display(), id = %self.id, "saved keystore");
        Ok(())
    }

    /// Check structure and parameters without touching the passphrase
    pub fn validate(&self) -> KeystoreResult<()> {
        if self.version != KEYSTORE_VERSION {
            return Err(KeystoreError::Malformed(format!(
                "unsupported keystore version {}",
                self.version
            )));
        }
        if self.crypto.kdf != KDF_SCRYPT {
            return Err(KeystoreError::Malformed(format!(
                "unsupported kdf {:?}",
                self.crypto.kdf
            )));
        }
        if self.crypto.cipher != CIPHER_AES_128_CTR {
            return Err(KeystoreError::Malformed(format!(
                "unsupported cipher {:?}",
                self.crypto.cipher
            )));
        }
        self.crypto.kdfparams.validate()?;
        self.crypto.cipherparams.iv_bytes()?;
        self.ciphertext()?;
        self.mac()?;
        self.address()?;
        Ok(())
    }

    /// Decrypt the private key
    ///
    /// A wrong passphrase, a modified ciphertext or MAC, an invalid decrypted
    /// scalar and an `address` that does not match the key all fail with
    /// [`KeystoreError::Decryption`].
    pub fn decrypt(&self, passphrase: &SecretString) -> KeystoreResult<KeyMaterial> {
        self.validate()?;

        let params = &self.crypto.kdfparams;
        debug!(n = params.n, r = params.r, p = params.p, "deriving keystore key");
        let derived_key = params.derive_key(passphrase.expose_secret())?;
        let dk_bytes = derived_key.expose_secret();

        let ciphertext = self.ciphertext()?;
        verify_mac(dk_bytes, &ciphertext, &self.mac()?)?;

        let iv = self.crypto.cipherparams.iv_bytes()?;
        let plaintext = decrypt_secret(&ciphertext, dk_bytes, &iv)?;
        let key = KeyMaterial::from_bytes(plaintext.expose_secret())
            .map_err(|_| KeystoreError::Decryption)?;

        if let Some(expected) = self.address()? {
            if expected != key.address() {
                return Err(KeystoreError::Decryption);
            }
        }

        debug!(address = %key.address(), "decrypted keystore");
        Ok(key)
    }

    /// Declared owner address, if the document carries one
    pub fn address(&self) -> KeystoreResult<Option<Address>> {
        self.address
            .as_deref()
            .map(|a| {
                parse_address(a)
                    .map_err(|_| KeystoreError::Malformed(format!("invalid address {:?}", a)))
            })
            .transpose()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kdf_params(&self) -> &ScryptParams {
        &self.crypto.kdfparams
    }

    fn ciphertext(&self) -> KeystoreResult<Vec<u8>> {
        let bytes = hex::decode(&self.crypto.ciphertext)
            .map_err(|e| KeystoreError::Malformed(format!("invalid ciphertext hex: {}", e)))?;
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(KeystoreError::Malformed(format!(
                "ciphertext must be {} bytes, got {}",
                PRIVATE_KEY_LENGTH,
                bytes.len()
            )));
        }
        Ok(bytes)
    }

    fn mac(&self) -> KeystoreResult<Vec<u8>> {
        let bytes = hex::decode(&self.crypto.mac)
            .map_err(|e| KeystoreError::Malformed(format!("invalid mac hex: {}", e)))?;
        if bytes.len() != MAC_LENGTH {
            return Err(KeystoreError::Malformed(format!(
                "mac must be {} bytes, got {}",
                MAC_LENGTH,
                bytes.len()
            )));
        }
        Ok(bytes)
    }
}

/// Builder for creating EncryptedKeystore instances
pub struct KeystoreBuilder<'a> {
    key: &'a KeyMaterial,
    passphrase: &'a SecretString,
    profile: ScryptProfile,
    uuid: Option<Uuid>,
}

impl<'a> KeystoreBuilder<'a> {
    pub fn new(key: &'a KeyMaterial, passphrase: &'a SecretString) -> Self {
        Self {
            key,
            passphrase,
            profile: ScryptProfile::Standard,
            uuid: None,
        }
    }

    /// Set the scrypt cost profile
    pub fn profile(mut self, profile: ScryptProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set a custom UUID (normally a random v4)
    pub fn uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = Some(uuid);
        self
    }

    pub fn build(self) -> KeystoreResult<EncryptedKeystore> {
        let salt = generate_salt();
        let iv = generate_iv();

        let kdfparams = ScryptParams::new(self.profile, &salt);
        debug!(n = kdfparams.n, r = kdfparams.r, p = kdfparams.p, "deriving keystore key");
        let derived_key = kdfparams.derive_key(self.passphrase.expose_secret())?;
        let dk_bytes = derived_key.expose_secret();

        let secret = self.key.secret_bytes();
        let ciphertext = encrypt_secret(secret.expose_secret(), dk_bytes, &iv)?;
        let mac = compute_mac(dk_bytes, &ciphertext)?;

        let crypto = CryptoModule {
            cipher: CIPHER_AES_128_CTR.to_string(),
            ciphertext: hex::encode(&ciphertext),
            cipherparams: CipherParams::new(&iv),
            kdf: KDF_SCRYPT.to_string(),
            kdfparams,
            mac: hex::encode(mac),
        };

        let id = self.uuid.unwrap_or_else(Uuid::new_v4);

        Ok(EncryptedKeystore {
            address: Some(hex::encode(self.key.address().as_slice())),
            crypto,
            id: id.to_string(),
            version: KEYSTORE_VERSION,
        })
    }
}
