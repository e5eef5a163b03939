//! Keccak-256 MAC for keystore integrity
//!
//! The MAC is `keccak256(derived_key[16..32] || ciphertext)`. It is checked
//! before decryption, so it detects a wrong passphrase and a modified
//! ciphertext alike.

use alloy_primitives::keccak256;

use super::error::{KeystoreError, KeystoreResult};

/// MAC length in bytes
pub const MAC_LENGTH: usize = 32;

/// Compute the MAC over `derived_key[16..32] || ciphertext`
pub fn compute_mac(derived_key: &[u8], ciphertext: &[u8]) -> KeystoreResult<[u8; MAC_LENGTH]> {
    let mac_key = derived_key.get(16..32).ok_or_else(|| {
        KeystoreError::Malformed(format!(
            "derived key must be at least 32 bytes, got {}",
            derived_key.len()
        ))
    })?;

    let mut preimage = Vec::with_capacity(mac_key.len() + ciphertext.len());
    preimage.extend_from_slice(mac_key);
    preimage.extend_from_slice(ciphertext);

    Ok(keccak256(&preimage).0)
}

/// Verify `expected` against the recomputed MAC.
///
/// A mismatch is reported as [`KeystoreError::Decryption`].
pub fn verify_mac(derived_key: &[u8], ciphertext: &[u8], expected: &[u8]) -> KeystoreResult<()> {
    let computed = compute_mac(derived_key, ciphertext)?;

    if constant_time_eq(&computed, expected) {
        Ok(())
    } else {
        Err(KeystoreError::Decryption)
    }
}

/// Constant-time comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_mac() {
        let mut derived_key = [0xAA; 32];
        derived_key[16..].copy_from_slice(&[0xFF; 16]);

        let mac = compute_mac(&derived_key, &[0xCC; 32]).unwrap();
        assert_eq!(
            hex::encode(mac),
            "3ba3eec84fc139b95da1292bd0e43ea70d5b87666c736b527b8ad06298bfaa5c"
        );
    }

    #[test]
    fn test_verify_mac() {
        let derived_key = [0x11; 32];
        let ciphertext = [0x22; 32];
        let mac = compute_mac(&derived_key, &ciphertext).unwrap();

        assert!(verify_mac(&derived_key, &ciphertext, &mac).is_ok());
        assert!(matches!(
            verify_mac(&derived_key, &ciphertext, &[0u8; 32]),
            Err(KeystoreError::Decryption)
        ));
        assert!(matches!(
            verify_mac(&[0x33; 32], &ciphertext, &mac),
            Err(KeystoreError::Decryption)
        ));
    }

    #[test]
    fn test_mac_uses_second_half_of_key() {
        let ciphertext = [0xCC; 32];

        let mut key1 = [0xAA; 32];
        let mut key2 = [0xBB; 32];
        key1[16..].copy_from_slice(&[0xFF; 16]);
        key2[16..].copy_from_slice(&[0xFF; 16]);
        assert_eq!(
            compute_mac(&key1, &ciphertext).unwrap(),
            compute_mac(&key2, &ciphertext).unwrap()
        );

        key2[16..].copy_from_slice(&[0xEE; 16]);
        assert_ne!(
            compute_mac(&key1, &ciphertext).unwrap(),
            compute_mac(&key2, &ciphertext).unwrap()
        );
    }

    #[test]
    fn test_mac_detects_ciphertext_change() {
        let derived_key = [0x11; 32];
        let mut ciphertext = [0x22; 32];
        let mac = compute_mac(&derived_key, &ciphertext).unwrap();

        ciphertext[31] ^= 0x01;
        assert!(verify_mac(&derived_key, &ciphertext, &mac).is_err());
    }

    #[test]
    fn test_short_key_rejected() {
        assert!(matches!(
            compute_mac(&[0u8; 20], &[]),
            Err(KeystoreError::Malformed(_))
        ));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(&[1, 2, 3], &[1, 2, 3]));
        assert!(!constant_time_eq(&[1, 2, 3], &[1, 2, 4]));
        assert!(!constant_time_eq(&[1, 2, 3], &[1, 2]));
    }
}
