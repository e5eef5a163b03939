//! zzz - command-line collaborator for ZigZagZog commitments
//!
//! Thin wrappers around `zzz-crypto`: argument parsing, client defaults,
//! secret prompting and output formatting. All cryptography lives in the core crate.

pub mod client_config;
pub mod key_cli;
pub mod sig_cli;

use std::path::PathBuf;

pub use client_config::ClientConfig;
pub use key_cli::{execute_keyfile_command, KeyfileCommand};
pub use sig_cli::{execute_sig_command, SigCommand};

/// Environment variable overriding the home directory
pub const ZZZ_HOME_ENV: &str = "ZZZ_HOME";

/// Home directory name under the user's home
pub const DEFAULT_HOME_DIR: &str = ".zzz";

/// Returns the default home directory for zzz.
///
/// Resolution order:
/// 1. `ZZZ_HOME` environment variable (if set)
/// 2. `~/.zzz` (default)
pub fn default_home_dir() -> PathBuf {
    if let Ok(home) = std::env::var(ZZZ_HOME_ENV) {
        return PathBuf::from(home);
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_HOME_DIR)
}
