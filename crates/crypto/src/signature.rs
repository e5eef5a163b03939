//! 65-byte recoverable ECDSA signatures
//!
//! Layout is `r (32) || s (32) || v (1)`. Two conventions exist for `v`:
//! canonical (`0`/`1`, what the curve library yields) and legacy (`27`/`28`,
//! the offset introduced by an early Ethereum client and still expected by
//! `ecrecover`-based contracts). Conversions between them return new values
//! and never touch the source bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::eip712::strip_hex_prefix;
use crate::error::SignatureError;

/// Encoded signature length
pub const SIGNATURE_LENGTH: usize = 65;

/// Offset applied to `v` by the legacy convention
pub const LEGACY_RECOVERY_OFFSET: u8 = 27;

/// Wire convention of the recovery byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryConvention {
    /// `v` in {0, 1}
    Canonical,
    /// `v` in {27, 28}
    #[default]
    Legacy,
}

/// An `r || s || v` signature
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecoverableSignature([u8; SIGNATURE_LENGTH]);

impl RecoverableSignature {
    /// Assemble from components
    pub fn new(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(&r);
        bytes[32..64].copy_from_slice(&s);
        bytes[64] = v;
        Self(bytes)
    }

    /// Parse exactly 65 bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        let array: [u8; SIGNATURE_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| SignatureError::InvalidEncoding {
                    expected: SIGNATURE_LENGTH,
                    actual: bytes.len(),
                })?;
        Ok(Self(array))
    }

    /// Parse from hex, with or without a `0x` prefix
    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(strip_hex_prefix(s.trim()))
            .map_err(|e| SignatureError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// Lowercase hex without a `0x` prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn r(&self) -> [u8; 32] {
        let mut r = [0u8; 32];
        r.copy_from_slice(&self.0[..32]);
        r
    }

    pub fn s(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        s.copy_from_slice(&self.0[32..64]);
        s
    }

    /// `r || s` without the recovery byte
    pub fn rs(&self) -> &[u8] {
        &self.0[..64]
    }

    pub fn v(&self) -> u8 {
        self.0[64]
    }

    /// Convention the recovery byte is in, if any
    pub fn convention(&self) -> Option<RecoveryConvention> {
        match self.v() {
            0 | 1 => Some(RecoveryConvention::Canonical),
            27 | 28 => Some(RecoveryConvention::Legacy),
            _ => None,
        }
    }

    /// Copy with `v` shifted into the legacy range.
    ///
    /// Only `v < 2` is shifted, so an already-legacy signature comes back unchanged.
    pub fn to_legacy(&self) -> Self {
        let mut out = *self;
        if out.0[64] < 2 {
            out.0[64] += LEGACY_RECOVERY_OFFSET;
        }
        out
    }

    /// Copy with `v` in the canonical range.
    ///
    /// Fails unless `v` is 27 or 28.
    pub fn to_canonical(&self) -> Result<Self, SignatureError> {
        let v = self.v();
        if !matches!(v, 27 | 28) {
            return Err(SignatureError::UnexpectedRecoveryConvention(v));
        }
        let mut out = *self;
        out.0[64] = v - LEGACY_RECOVERY_OFFSET;
        Ok(out)
    }
}

impl fmt::Display for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecoverableSignature({})", self.to_hex())
    }
}

impl FromStr for RecoverableSignature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for RecoverableSignature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecoverableSignature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig_with_v(v: u8) -> RecoverableSignature {
        RecoverableSignature::new([0x11; 32], [0x22; 32], v)
    }

    #[test]
    fn test_layout() {
        let sig = sig_with_v(27);
        assert_eq!(sig.r(), [0x11; 32]);
        assert_eq!(sig.s(), [0x22; 32]);
        assert_eq!(sig.v(), 27);
        assert_eq!(sig.rs().len(), 64);
        assert_eq!(sig.to_hex().len(), 130);
    }

    #[test]
    fn test_from_bytes_length() {
        assert!(RecoverableSignature::from_bytes(&[0u8; 65]).is_ok());
        assert_eq!(
            RecoverableSignature::from_bytes(&[0u8; 64]).unwrap_err(),
            SignatureError::InvalidEncoding {
                expected: 65,
                actual: 64
            }
        );
        assert_eq!(
            RecoverableSignature::from_bytes(&[0u8; 66]).unwrap_err(),
            SignatureError::InvalidEncoding {
                expected: 65,
                actual: 66
            }
        );
    }

    #[test]
    fn test_from_hex() {
        let sig = sig_with_v(28);
        let prefixed = format!("0x{}", sig.to_hex());
        assert_eq!(RecoverableSignature::from_hex(&prefixed).unwrap(), sig);
        assert_eq!(sig.to_hex().parse::<RecoverableSignature>().unwrap(), sig);
        assert!(matches!(
            RecoverableSignature::from_hex("not-hex"),
            Err(SignatureError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_convention() {
        assert_eq!(sig_with_v(0).convention(), Some(RecoveryConvention::Canonical));
        assert_eq!(sig_with_v(1).convention(), Some(RecoveryConvention::Canonical));
        assert_eq!(sig_with_v(27).convention(), Some(RecoveryConvention::Legacy));
        assert_eq!(sig_with_v(28).convention(), Some(RecoveryConvention::Legacy));
        assert_eq!(sig_with_v(2).convention(), None);
        assert_eq!(sig_with_v(55).convention(), None);
    }

    #[test]
    fn test_to_legacy_never_double_offsets() {
        assert_eq!(sig_with_v(0).to_legacy().v(), 27);
        assert_eq!(sig_with_v(1).to_legacy().v(), 28);
        assert_eq!(sig_with_v(27).to_legacy().v(), 27);
        assert_eq!(sig_with_v(1).to_legacy().to_legacy().v(), 28);
    }

    #[test]
    fn test_to_canonical_is_pure() {
        let legacy = sig_with_v(28);
        let canonical = legacy.to_canonical().unwrap();
        assert_eq!(canonical.v(), 1);
        assert_eq!(legacy.v(), 28);
        assert_eq!(canonical.rs(), legacy.rs());
    }

    #[test]
    fn test_to_canonical_rejects_other_conventions() {
        for v in [0u8, 1, 2, 26, 29, 255] {
            assert_eq!(
                sig_with_v(v).to_canonical().unwrap_err(),
                SignatureError::UnexpectedRecoveryConvention(v)
            );
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let sig = sig_with_v(27);
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, format!("\"{}\"", sig.to_hex()));
        let restored: RecoverableSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, sig);
    }
}
