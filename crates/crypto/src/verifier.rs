//! Signer recovery for commitment signatures

use alloy_primitives::Address;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use tracing::debug;

use crate::eip712::Digest;
use crate::error::SignatureError;
use crate::key::address_from_verifying_key;
use crate::signature::RecoverableSignature;

/// Recover the address that produced `signature` over `digest`.
///
/// Only legacy signatures (`v` of 27 or 28) are accepted. The recovery byte
/// is normalized on a copy. High-S signatures recover to the same address
/// `ecrecover` would return.
pub fn recover_signer(
    digest: &Digest,
    signature: &RecoverableSignature,
) -> Result<Address, SignatureError> {
    let canonical = signature.to_canonical()?;

    let mut ecdsa =
        Signature::from_slice(canonical.rs()).map_err(|_| SignatureError::InvalidSignature)?;
    let mut recovery_id =
        RecoveryId::from_byte(canonical.v()).ok_or(SignatureError::InvalidSignature)?;

    if let Some(normalized) = ecdsa.normalize_s() {
        ecdsa = normalized;
        recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
    }

    let verifying_key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &ecdsa, recovery_id)
        .map_err(|_| SignatureError::InvalidSignature)?;

    let address = address_from_verifying_key(&verifying_key);
    debug!(digest = %digest, signer = %address, "recovered signer");
    Ok(address)
}

/// Whether `signature` over `digest` was produced by `expected`.
///
/// Malformed signatures are reported as errors, not as `false`.
pub fn verify(
    digest: &Digest,
    signature: &RecoverableSignature,
    expected: Address,
) -> Result<bool, SignatureError> {
    Ok(recover_signer(digest, signature)? == expected)
}
