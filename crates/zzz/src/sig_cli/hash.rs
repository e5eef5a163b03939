//! `zzz sig hash`

use std::path::Path;

use anyhow::Result;
use zzz_crypto::commitment;

use super::common::{CommitmentArgs, CommitmentOutput};
use crate::client_config::ClientConfig;

pub fn execute(home: &Path, args: &CommitmentArgs, output: Option<String>) -> Result<()> {
    let config = ClientConfig::load(home)?;
    let resolved = args.resolve(&config)?;

    let digest = commitment::hash(resolved.chain_id, &resolved.zzz_address, &resolved.message)?;

    match config.effective_output(output.as_deref()) {
        "json" => {
            let mut out = CommitmentOutput::new(&resolved);
            out.digest = Some(digest);
            out.print()?;
        }
        _ => println!("{}", digest),
    }

    Ok(())
}
