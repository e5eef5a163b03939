//! Commitment signing CLI
//!
//! - `hash`: print the EIP-712 digest of a commitment
//! - `sign`: sign a commitment with a keystore (legacy `v`, hex output)
//! - `verify`: recover the signer of a commitment signature
//!
//! Passphrases are never taken from the command line. They are read from
//! `--password-file` or prompted for without echo.

pub mod common;
pub mod hash;
pub mod sign;
pub mod verify;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Subcommand;

pub use common::CommitmentArgs;

/// Commitment subcommands
#[derive(Subcommand)]
pub enum SigCommand {
    /// Produce a commitment hash
    Hash {
        #[command(flatten)]
        commitment: CommitmentArgs,

        /// Output format [default: client config, then text]
        #[arg(long, value_parser = common::OUTPUT_FORMATS)]
        output: Option<String>,
    },

    /// Sign ZigZagZog commitments
    Sign {
        #[command(flatten)]
        commitment: CommitmentArgs,

        /// Path to the keystore file [default: client config]
        #[arg(long)]
        keyfile: Option<PathBuf>,

        /// Read the keystore passphrase from file instead of prompting
        #[arg(long)]
        password_file: Option<PathBuf>,

        /// Output format [default: client config, then text]
        #[arg(long, value_parser = common::OUTPUT_FORMATS)]
        output: Option<String>,
    },

    /// Verify ZigZagZog commitments
    Verify {
        #[command(flatten)]
        commitment: CommitmentArgs,

        /// Signed message to verify (65 bytes hex, v in 27/28)
        #[arg(long)]
        sig: String,

        /// Fail unless the signature was produced by this address
        #[arg(long, value_name = "ADDRESS")]
        expected: Option<String>,

        /// Output format [default: client config, then text]
        #[arg(long, value_parser = common::OUTPUT_FORMATS)]
        output: Option<String>,
    },
}

/// Execute a sig command
pub fn execute_sig_command(home: &Path, command: SigCommand) -> Result<()> {
    match command {
        SigCommand::Hash { commitment, output } => hash::execute(home, &commitment, output),

        SigCommand::Sign {
            commitment,
            keyfile,
            password_file,
            output,
        } => sign::execute(home, &commitment, keyfile, password_file, output),

        SigCommand::Verify {
            commitment,
            sig,
            expected,
            output,
        } => verify::execute(home, &commitment, &sig, expected, output),
    }
}
