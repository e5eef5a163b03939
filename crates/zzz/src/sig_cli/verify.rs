//! `zzz sig verify`

use std::path::Path;

use anyhow::{bail, Context, Result};
use zzz_crypto::commitment;
use zzz_crypto::{Address, RecoverableSignature};

use super::common::{CommitmentArgs, CommitmentOutput};
use crate::client_config::ClientConfig;

pub fn execute(
    home: &Path,
    args: &CommitmentArgs,
    sig: &str,
    expected: Option<String>,
    output: Option<String>,
) -> Result<()> {
    let config = ClientConfig::load(home)?;
    let resolved = args.resolve(&config)?;

    let expected = expected
        .map(|a| a.parse::<Address>().with_context(|| format!("Invalid --expected address: {}", a)))
        .transpose()?;

    let signer = commitment::verify(resolved.chain_id, &resolved.zzz_address, &resolved.message, sig)
        .context("Failed to verify signature")?;

    match config.effective_output(output.as_deref()) {
        "json" => {
            let mut out = CommitmentOutput::new(&resolved);
            out.commitment.signature = Some(RecoverableSignature::from_hex(sig)?);
            out.commitment.signer = Some(signer);
            out.print()?;
        }
        _ => println!("{}", signer.to_checksum(None)),
    }

    if let Some(expected) = expected {
        if expected != signer {
            bail!(
                "Signature was produced by {}, expected {}",
                signer.to_checksum(None),
                expected.to_checksum(None)
            );
        }
    }

    Ok(())
}
