//! `zzz sig sign`

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::info;
use zzz_crypto::commitment;
use zzz_crypto::{FileSecretProvider, RecoverableSignature, TerminalSecretProvider};

use super::common::{CommitmentArgs, CommitmentOutput};
use crate::client_config::ClientConfig;

pub fn execute(
    home: &Path,
    args: &CommitmentArgs,
    keyfile: Option<PathBuf>,
    password_file: Option<PathBuf>,
    output: Option<String>,
) -> Result<()> {
    let config = ClientConfig::load(home)?;
    let resolved = args.resolve(&config)?;

    let keyfile = config
        .effective_keyfile(keyfile)
        .ok_or_else(|| anyhow!("No keystore given: pass --keyfile or set `keyfile` in client.toml"))?;

    let provider =
        FileSecretProvider::new(TerminalSecretProvider::new()).passphrase_file(password_file);

    let signature = commitment::sign(
        &keyfile,
        None,
        &provider,
        resolved.chain_id,
        &resolved.zzz_address,
        &resolved.message,
    )
    .with_context(|| format!("Failed to sign with keystore {}", keyfile.display()))?;

    info!(keyfile = %keyfile.display(), chain_id = resolved.chain_id, "signed commitment");

    match config.effective_output(output.as_deref()) {
        "json" => {
            let signer = commitment::verify(
                resolved.chain_id,
                &resolved.zzz_address,
                &resolved.message,
                &signature,
            )?;
            let mut out = CommitmentOutput::new(&resolved);
            out.commitment.signature = Some(RecoverableSignature::from_hex(&signature)?);
            out.commitment.signer = Some(signer);
            out.print()?;
        }
        _ => println!("{}", signature),
    }

    Ok(())
}
