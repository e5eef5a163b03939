//! `zzz keyfile inspect`

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use zzz_crypto::keystore::ScryptParams;
use zzz_crypto::EncryptedKeystore;

#[derive(Serialize)]
struct KeyfileInfo<'a> {
    path: String,
    address: Option<String>,
    id: &'a str,
    kdf: &'a ScryptParams,
}

pub fn execute(keyfile: &Path, output: &str) -> Result<()> {
    let keystore = EncryptedKeystore::load(keyfile)
        .with_context(|| format!("Failed to load keystore {}", keyfile.display()))?;
    keystore.validate()?;

    let info = KeyfileInfo {
        path: keyfile.display().to_string(),
        address: keystore.address()?.map(|a| a.to_checksum(None)),
        id: keystore.id(),
        kdf: keystore.kdf_params(),
    };

    if output == "json" {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Keystore:  {}", info.path);
    println!("Address:   {}", info.address.as_deref().unwrap_or("(not recorded)"));
    println!("ID:        {}", info.id);
    println!(
        "KDF:       scrypt n={} r={} p={} dklen={}",
        info.kdf.n, info.kdf.r, info.kdf.p, info.kdf.dklen
    );

    Ok(())
}
