//! Arguments shared by the `sig` subcommands

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use zzz_crypto::{CommitmentMessage, SignedCommitment};

use crate::client_config::ClientConfig;

/// Output formats accepted by `--output`
pub const OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

/// Domain and message fields of a commitment
#[derive(Args, Debug, Clone)]
pub struct CommitmentArgs {
    /// Chain ID of the network you are signing for [default: client config, then 1]
    #[arg(long)]
    pub chain_id: Option<u64>,

    /// Address of the ZigZagZog contract [default: client config, then the zero address]
    #[arg(long = "zzz", value_name = "ADDRESS")]
    pub zzz_address: Option<String>,

    /// Commitment nonce
    #[arg(long, default_value = "0")]
    pub nonce: String,

    /// Game number
    #[arg(long, default_value = "0")]
    pub game: String,

    /// Round number
    #[arg(long, default_value = "0")]
    pub round: String,

    /// Number of circles in commitment
    #[arg(long, default_value = "0")]
    pub circles: String,

    /// Number of squares in commitment
    #[arg(long, default_value = "0")]
    pub squares: String,

    /// Number of triangles in commitment
    #[arg(long, default_value = "0")]
    pub triangles: String,
}

/// A commitment with its domain resolved against the client config
#[derive(Debug, Clone)]
pub struct ResolvedCommitment {
    pub chain_id: u64,
    pub zzz_address: String,
    pub message: CommitmentMessage,
}

impl CommitmentArgs {
    pub fn resolve(&self, config: &ClientConfig) -> Result<ResolvedCommitment> {
        let message = CommitmentMessage::from_decimal(
            &self.nonce,
            &self.game,
            &self.round,
            &self.circles,
            &self.squares,
            &self.triangles,
        )
        .context("Invalid commitment")?;

        Ok(ResolvedCommitment {
            chain_id: self.chain_id.unwrap_or(config.chain_id),
            zzz_address: self
                .zzz_address
                .clone()
                .unwrap_or_else(|| config.zzz_address.clone()),
            message,
        })
    }
}

/// JSON output of the `sig` subcommands
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentOutput {
    pub chain_id: u64,
    pub verifying_contract: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(flatten)]
    pub commitment: SignedCommitment,
}

impl CommitmentOutput {
    pub fn new(resolved: &ResolvedCommitment) -> Self {
        Self {
            chain_id: resolved.chain_id,
            verifying_contract: resolved.zzz_address.clone(),
            digest: None,
            commitment: SignedCommitment::unsigned(resolved.message),
        }
    }

    pub fn print(&self) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}
