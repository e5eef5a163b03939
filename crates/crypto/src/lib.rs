//! Commitment signing core for ZigZagZog
//!
//! This crate provides:
//! - EIP-712 digests for `ChoicesMessage` commitments under the ZigZagZog domain
//! - Web3 Secret Storage (v3) keystores with scrypt and AES-128-CTR
//! - Deterministic secp256k1 signing with legacy `v` (27/28)
//! - Signer recovery and verification
//! - Injected secret input for passphrases and raw keys

pub mod commitment;
pub mod eip712;
pub mod error;
pub mod key;
pub mod keystore;
pub mod secret_provider;
pub mod secure;
pub mod signature;
pub mod signer;
pub mod verifier;

// Commitment exports
pub use commitment::SignedCommitment;

// Digest exports
pub use eip712::{
    build_digest, CommitmentMessage, Digest, DomainParameters, DEFAULT_CHAIN_ID,
    DEFAULT_VERIFYING_CONTRACT, PROTOCOL_NAME, PROTOCOL_VERSION,
};

// Key and signature exports
pub use key::{address_from_verifying_key, KeyMaterial};
pub use signature::{RecoverableSignature, RecoveryConvention, LEGACY_RECOVERY_OFFSET, SIGNATURE_LENGTH};
pub use signer::{sign, sign_legacy};
pub use verifier::{recover_signer, verify};

// Error exports
pub use error::{CryptoError, EncodingError, KeyError, Result, SignatureError};

// Keystore exports
pub use keystore::{
    create_keystore, open_keystore, EncryptedKeystore, KeystoreBuilder, KeystoreError,
    ScryptProfile,
};

// Secret input exports
pub use secret_provider::{
    FileSecretProvider, SecretInputError, SecretProvider, StaticSecretProvider,
    TerminalSecretProvider,
};
pub use secure::{ExposeSecret, IntoSecret, SecretBytes, SecretString};

pub use alloy_primitives::Address;
