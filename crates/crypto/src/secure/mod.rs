//! Secret wrappers for passphrases, raw private keys and derived key bytes
//!
//! Everything sensitive that crosses an API boundary in this crate travels in
//! a `secrecy` box: zeroized on drop, `[REDACTED]` in debug output, and only
//! readable through `expose_secret()`.

mod secret;

pub use secrecy::ExposeSecret;
pub use secret::{IntoSecret, SecretBytes, SecretString};
