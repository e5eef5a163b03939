//! Recoverable ECDSA signing of commitment digests
//!
//! Signatures are deterministic (RFC 6979) and low-S normalized, so the same
//! key and digest always produce the same 65 bytes.

use tracing::debug;

use crate::eip712::Digest;
use crate::error::SignatureError;
use crate::key::KeyMaterial;
use crate::signature::{RecoverableSignature, RecoveryConvention};

/// Sign `digest` and encode `v` in the requested convention
pub fn sign(
    digest: &Digest,
    key: &KeyMaterial,
    convention: RecoveryConvention,
) -> Result<RecoverableSignature, SignatureError> {
    let (signature, recovery_id) = key
        .signing_key()
        .sign_prehash_recoverable(digest.as_bytes())
        .map_err(|e| SignatureError::Signing(e.to_string()))?;

    // ecrecover cannot express an x-reduced recovery id
    if recovery_id.is_x_reduced() {
        return Err(SignatureError::Signing(
            "recovery id is not representable".to_string(),
        ));
    }

    let bytes = signature.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);

    let canonical = RecoverableSignature::new(r, s, recovery_id.to_byte());
    let signature = match convention {
        RecoveryConvention::Canonical => canonical,
        RecoveryConvention::Legacy => canonical.to_legacy(),
    };

    debug!(signer = %key.address(), digest = %digest, v = signature.v(), "signed digest");
    Ok(signature)
}

/// Sign with `v` in {27, 28}, the form the game contract expects
pub fn sign_legacy(digest: &Digest, key: &KeyMaterial) -> Result<RecoverableSignature, SignatureError> {
    sign(digest, key, RecoveryConvention::Legacy)
}
