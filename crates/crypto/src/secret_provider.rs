//! Secret input for keystore operations
//!
//! Signing and key creation never read the terminal directly. They ask a
//! [`SecretProvider`], so interactive tools, scripts and tests each supply
//! secrets their own way:
//!
//! - [`TerminalSecretProvider`] prompts without echo
//! - [`FileSecretProvider`] reads files and falls back to another provider
//! - [`StaticSecretProvider`] returns fixed values

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use secrecy::ExposeSecret;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::secure::{IntoSecret, SecretString};

/// What went wrong while obtaining a secret
#[derive(Debug, Error)]
pub enum SecretInputError {
    /// Terminal or file could not be read (including an interrupted prompt)
    #[error("failed to read {what}: {source}")]
    Io {
        what: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{0} is empty")]
    Empty(&'static str),

    /// Confirmation prompt did not match
    #[error("passphrases do not match")]
    Mismatch,

    /// The provider has no way to supply this secret
    #[error("no {0} available")]
    Unavailable(&'static str),
}

/// Source of passphrases and raw private keys
pub trait SecretProvider {
    /// Passphrase for an existing keystore
    fn passphrase(&self, prompt: &str) -> Result<SecretString, SecretInputError>;

    /// Passphrase for a keystore about to be created
    fn new_passphrase(&self, prompt: &str) -> Result<SecretString, SecretInputError> {
        self.passphrase(prompt)
    }

    /// Hex private key to import
    fn private_key(&self, prompt: &str) -> Result<SecretString, SecretInputError>;
}

/// Prompts on the controlling terminal with echo disabled
#[derive(Debug, Clone, Default)]
pub struct TerminalSecretProvider {
    confirm_new: bool,
}

impl TerminalSecretProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask new passphrases twice
    pub fn with_confirmation(mut self) -> Self {
        self.confirm_new = true;
        self
    }

    fn prompt(what: &'static str, prompt: &str) -> Result<SecretString, SecretInputError> {
        rpassword::prompt_password(prompt)
            .map(IntoSecret::into_secret)
            .map_err(|source| SecretInputError::Io { what, source })
    }
}

impl SecretProvider for TerminalSecretProvider {
    fn passphrase(&self, prompt: &str) -> Result<SecretString, SecretInputError> {
        Self::prompt("passphrase", prompt)
    }

    fn new_passphrase(&self, prompt: &str) -> Result<SecretString, SecretInputError> {
        let passphrase = Self::prompt("passphrase", prompt)?;
        if passphrase.expose_secret().is_empty() {
            return Err(SecretInputError::Empty("passphrase"));
        }

        if self.confirm_new {
            let confirmation = Self::prompt("passphrase confirmation", "Confirm passphrase: ")?;
            if passphrase.expose_secret() != confirmation.expose_secret() {
                return Err(SecretInputError::Mismatch);
            }
        }

        Ok(passphrase)
    }

    fn private_key(&self, prompt: &str) -> Result<SecretString, SecretInputError> {
        let key = Self::prompt("private key", prompt)?;
        if key.expose_secret().trim().is_empty() {
            return Err(SecretInputError::Empty("private key"));
        }
        Ok(key)
    }
}

/// Fixed secrets for tests and non-interactive callers
#[derive(Debug, Default)]
pub struct StaticSecretProvider {
    passphrase: Option<SecretString>,
    private_key: Option<SecretString>,
}

impl StaticSecretProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into().into_secret());
        self
    }

    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into().into_secret());
        self
    }

    fn copy(
        secret: &Option<SecretString>,
        what: &'static str,
    ) -> Result<SecretString, SecretInputError> {
        secret
            .as_ref()
            .map(|s| s.expose_secret().to_owned().into_secret())
            .ok_or(SecretInputError::Unavailable(what))
    }
}

impl SecretProvider for StaticSecretProvider {
    fn passphrase(&self, _prompt: &str) -> Result<SecretString, SecretInputError> {
        Self::copy(&self.passphrase, "passphrase")
    }

    fn private_key(&self, _prompt: &str) -> Result<SecretString, SecretInputError> {
        Self::copy(&self.private_key, "private key")
    }
}

/// Reads secrets from files, asking `fallback` for anything without a file
#[derive(Debug)]
pub struct FileSecretProvider<F = TerminalSecretProvider> {
    passphrase_file: Option<PathBuf>,
    private_key_file: Option<PathBuf>,
    fallback: F,
}

impl<F: SecretProvider> FileSecretProvider<F> {
    pub fn new(fallback: F) -> Self {
        Self {
            passphrase_file: None,
            private_key_file: None,
            fallback,
        }
    }

    pub fn passphrase_file(mut self, path: Option<PathBuf>) -> Self {
        self.passphrase_file = path;
        self
    }

    pub fn private_key_file(mut self, path: Option<PathBuf>) -> Self {
        self.private_key_file = path;
        self
    }
}

impl<F: SecretProvider> SecretProvider for FileSecretProvider<F> {
    fn passphrase(&self, prompt: &str) -> Result<SecretString, SecretInputError> {
        match &self.passphrase_file {
            Some(path) => read_secret_file(path, "passphrase"),
            None => self.fallback.passphrase(prompt),
        }
    }

    fn new_passphrase(&self, prompt: &str) -> Result<SecretString, SecretInputError> {
        match &self.passphrase_file {
            Some(path) => read_secret_file(path, "passphrase"),
            None => self.fallback.new_passphrase(prompt),
        }
    }

    fn private_key(&self, prompt: &str) -> Result<SecretString, SecretInputError> {
        match &self.private_key_file {
            Some(path) => read_secret_file(path, "private key"),
            None => self.fallback.private_key(prompt),
        }
    }
}

/// Read a secret from the first line of `path`.
///
/// Only the line terminator is removed. Leading and trailing spaces are part
/// of the secret.
pub fn read_secret_file(path: &Path, what: &'static str) -> Result<SecretString, SecretInputError> {
    let contents = Zeroizing::new(
        fs::read_to_string(path).map_err(|source| SecretInputError::Io { what, source })?,
    );

    let secret = contents.lines().next().unwrap_or_default();
    if secret.is_empty() {
        return Err(SecretInputError::Empty(what));
    }

    Ok(secret.to_string().into_secret())
}
