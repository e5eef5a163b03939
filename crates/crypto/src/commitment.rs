//! Caller-facing commitment operations
//!
//! These tie the digest builder, keystore and signer together in the shape
//! a game client needs: hash a set of choices, sign them with a keystore,
//! and check which player signed a submitted commitment.

use std::path::Path;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::eip712::{build_digest, CommitmentMessage, Digest, DomainParameters};
use crate::error::Result;
use crate::key::KeyMaterial;
use crate::keystore::EncryptedKeystore;
use crate::secret_provider::SecretProvider;
use crate::secure::SecretString;
use crate::signature::RecoverableSignature;
use crate::{signer, verifier};

/// Prompt shown when a keystore passphrase has to be asked for
pub const PASSPHRASE_PROMPT: &str = "Keystore passphrase: ";

/// A commitment in its JSON exchange form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedCommitment {
    #[serde(flatten)]
    pub message: CommitmentMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<RecoverableSignature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<Address>,
}

impl SignedCommitment {
    pub fn unsigned(message: CommitmentMessage) -> Self {
        Self {
            message,
            signature: None,
            signer: None,
        }
    }
}

/// Digest of `message` as lowercase hex
pub fn hash(chain_id: u64, verifying_contract: &str, message: &CommitmentMessage) -> Result<String> {
    Ok(digest(chain_id, verifying_contract, message)?.to_hex())
}

/// Sign `message` with the key in `keystore_file`.
///
/// The passphrase comes from `passphrase` when given, otherwise from
/// `provider`. Returns the legacy-convention signature as hex.
pub fn sign(
    keystore_file: &Path,
    passphrase: Option<SecretString>,
    provider: &dyn SecretProvider,
    chain_id: u64,
    verifying_contract: &str,
    message: &CommitmentMessage,
) -> Result<String> {
    let digest = digest(chain_id, verifying_contract, message)?;
    let key = open_keystore_file(keystore_file, passphrase, provider)?;
    Ok(signer::sign_legacy(&digest, &key)?.to_hex())
}

/// Recover the address that signed `message`
pub fn verify(
    chain_id: u64,
    verifying_contract: &str,
    message: &CommitmentMessage,
    signature_hex: &str,
) -> Result<Address> {
    let digest = digest(chain_id, verifying_contract, message)?;
    let signature = RecoverableSignature::from_hex(signature_hex)?;
    Ok(verifier::recover_signer(&digest, &signature)?)
}

/// Load and decrypt a keystore file, asking `provider` only if no passphrase is given
pub fn open_keystore_file(
    path: &Path,
    passphrase: Option<SecretString>,
    provider: &dyn SecretProvider,
) -> Result<KeyMaterial> {
    // Parse first so a bad file fails before anyone is prompted
    let keystore = EncryptedKeystore::load(path)?;
    keystore.validate()?;

    let passphrase = match passphrase {
        Some(passphrase) => passphrase,
        None => provider.passphrase(PASSPHRASE_PROMPT)?,
    };

    let key = keystore.decrypt(&passphrase)?;
    debug!(path = %path.display(), address = %key.address(), "opened keystore");
    Ok(key)
}

fn digest(chain_id: u64, verifying_contract: &str, message: &CommitmentMessage) -> Result<Digest> {
    let domain = DomainParameters::new(chain_id, verifying_contract)?;
    Ok(build_digest(&domain, message))
}
