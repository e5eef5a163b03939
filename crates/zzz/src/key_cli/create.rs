//! `zzz keyfile create`

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;
use zzz_crypto::{
    FileSecretProvider, KeyMaterial, KeystoreBuilder, ScryptProfile, SecretProvider,
    TerminalSecretProvider,
};

const PRIVATE_KEY_PROMPT: &str = "Private key (hex): ";
const NEW_PASSPHRASE_PROMPT: &str = "New keystore passphrase: ";

pub fn execute(
    outfile: &Path,
    private_key_file: Option<PathBuf>,
    generate: bool,
    password_file: Option<PathBuf>,
    light_kdf: bool,
) -> Result<()> {
    if outfile.exists() {
        bail!("Keystore already exists: {}", outfile.display());
    }

    let provider = FileSecretProvider::new(TerminalSecretProvider::new().with_confirmation())
        .private_key_file(private_key_file)
        .passphrase_file(password_file);

    let key = if generate {
        KeyMaterial::generate(&mut rand::thread_rng())
    } else {
        let private_key = provider.private_key(PRIVATE_KEY_PROMPT)?;
        KeyMaterial::from_hex(&private_key).context("Invalid private key")?
    };

    let passphrase = provider.new_passphrase(NEW_PASSPHRASE_PROMPT)?;

    let profile = if light_kdf {
        ScryptProfile::Light
    } else {
        ScryptProfile::Standard
    };

    let keystore = KeystoreBuilder::new(&key, &passphrase)
        .profile(profile)
        .build()
        .context("Failed to encrypt keystore")?;
    keystore
        .save(outfile)
        .with_context(|| format!("Failed to write keystore {}", outfile.display()))?;

    info!(path = %outfile.display(), ?profile, "created keystore");

    println!("Keystore:  {}", outfile.display());
    println!("Address:   {}", key.address().to_checksum(None));

    Ok(())
}
