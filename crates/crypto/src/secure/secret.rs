//! Type aliases and conversions around the `secrecy` crate

use secrecy::{SecretBox, SecretString as SecrecySecretString};

/// A secret byte buffer that is zeroized on drop.
///
/// Used for decrypted private keys and scrypt output.
///
/// # Example
///
/// ```rust
/// use zzz_crypto::secure::{ExposeSecret, SecretBytes};
///
/// let secret = SecretBytes::new(Box::new(vec![1, 2, 3, 4]));
/// assert_eq!(secret.expose_secret(), &vec![1, 2, 3, 4]);
/// ```
pub type SecretBytes = SecretBox<Vec<u8>>;

/// A secret string that is zeroized on drop.
///
/// Used for passphrases and hex-encoded private keys read from the user.
///
/// # Example
///
/// ```rust
/// use zzz_crypto::secure::{ExposeSecret, SecretString};
///
/// let passphrase: SecretString = "correct horse".to_string().into();
/// assert_eq!(passphrase.expose_secret(), "correct horse");
/// ```
pub type SecretString = SecrecySecretString;

/// Extension trait for creating secret values.
pub trait IntoSecret {
    /// The secret type this converts into.
    type Secret;

    /// Convert into a secret value.
    fn into_secret(self) -> Self::Secret;
}

impl IntoSecret for String {
    type Secret = SecretString;

    fn into_secret(self) -> Self::Secret {
        self.into()
    }
}

impl IntoSecret for Vec<u8> {
    type Secret = SecretBytes;

    fn into_secret(self) -> Self::Secret {
        SecretBox::new(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_into_secret_string() {
        let secret = "my-passphrase".to_string().into_secret();
        assert_eq!(secret.expose_secret(), "my-passphrase");
    }

    #[test]
    fn test_into_secret_bytes() {
        let secret = vec![1, 2, 3].into_secret();
        assert_eq!(secret.expose_secret(), &vec![1, 2, 3]);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = "hunter2-passphrase".to_string().into_secret();
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("hunter2"));
    }
}
