//! Keystore management CLI
//!
//! - `create`: encrypt a private key into a new Web3 v3 keystore
//! - `inspect`: show the public parts of a keystore without decrypting it

pub mod create;
pub mod inspect;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

/// Keystore subcommands
#[derive(Subcommand)]
pub enum KeyfileCommand {
    /// Create a new keystore file
    Create {
        /// Path of the keystore to write (must not exist)
        #[arg(long)]
        outfile: PathBuf,

        /// Read the hex private key from file instead of prompting
        #[arg(long, conflicts_with = "generate")]
        private_key_file: Option<PathBuf>,

        /// Generate a fresh random private key
        #[arg(long)]
        generate: bool,

        /// Read the new passphrase from file instead of prompting
        #[arg(long)]
        password_file: Option<PathBuf>,

        /// Use light scrypt parameters (n=4096, p=6)
        #[arg(long)]
        light_kdf: bool,
    },

    /// Show the address, id and KDF parameters of a keystore
    Inspect {
        /// Path to the keystore file
        #[arg(long)]
        keyfile: PathBuf,

        /// Output format
        #[arg(long, default_value = "text", value_parser = crate::sig_cli::common::OUTPUT_FORMATS)]
        output: String,
    },
}

/// Execute a keyfile command
pub fn execute_keyfile_command(command: KeyfileCommand) -> Result<()> {
    match command {
        KeyfileCommand::Create {
            outfile,
            private_key_file,
            generate,
            password_file,
            light_kdf,
        } => create::execute(&outfile, private_key_file, generate, password_file, light_kdf),

        KeyfileCommand::Inspect { keyfile, output } => inspect::execute(&keyfile, &output),
    }
}
