//! zzz CLI
//!
//! Hash, sign and verify ZigZagZog commitments from the command line.

use alloy_primitives::Address;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use zzz::{
    default_home_dir, execute_keyfile_command, execute_sig_command, ClientConfig, KeyfileCommand,
    SigCommand,
};

/// ZigZagZog commitment tool
#[derive(Parser)]
#[command(name = "zzz")]
#[command(version)]
#[command(about = "Sign and verify ZigZagZog commitments", long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Directory for client config
    #[arg(long, global = true, default_value_os_t = default_home_dir())]
    home: PathBuf,

    /// The logging level (trace|debug|info|warn|error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// The logging format (json|plain)
    #[arg(long, global = true, default_value = "plain")]
    log_format: String,

    /// Disable colored logs
    #[arg(long, global = true, default_value = "false")]
    log_no_color: bool,

    /// Print out full error chain on errors
    #[arg(long, global = true, default_value = "false")]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash, sign and verify commitments
    Sig {
        #[command(subcommand)]
        command: SigCommand,
    },

    /// Manage keystore files
    Keyfile {
        #[command(subcommand)]
        command: KeyfileCommand,
    },

    /// Manage client configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print version information
    Version {
        /// Output format (text|json)
        #[arg(long, default_value = "text")]
        output: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current client configuration
    Show,

    /// Write a client configuration file
    Init {
        /// Default chain ID
        #[arg(long)]
        chain_id: Option<u64>,

        /// Default ZigZagZog contract address
        #[arg(long = "zzz", value_name = "ADDRESS")]
        zzz_address: Option<String>,

        /// Default keystore for signing
        #[arg(long)]
        keyfile: Option<PathBuf>,

        /// Replace an existing client.toml
        #[arg(long, default_value = "false")]
        overwrite: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, &cli.log_format, cli.log_no_color);

    let result = match cli.command {
        Commands::Sig { command } => execute_sig_command(&cli.home, command),

        Commands::Keyfile { command } => execute_keyfile_command(command),

        Commands::Config { command } => cmd_config(&cli.home, command),

        Commands::Version { output } => cmd_version(&output),
    };

    if let Err(e) = &result {
        if cli.trace {
            eprintln!("Error: {:?}", e);
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only command output
fn init_tracing(log_level: &str, log_format: &str, no_color: bool) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color);

    match log_format {
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn cmd_config(home: &Path, command: ConfigCommands) -> Result<()> {
    let config_path = ClientConfig::config_path(home);

    match command {
        ConfigCommands::Show => {
            let config = ClientConfig::load(home)?;
            if !config_path.exists() {
                println!("# {} not found, showing defaults", config_path.display());
            }
            println!("{}", toml::to_string_pretty(&config)?);
        }

        ConfigCommands::Init {
            chain_id,
            zzz_address,
            keyfile,
            overwrite,
        } => {
            if config_path.exists() && !overwrite {
                anyhow::bail!(
                    "Client config already exists at {}. Use --overwrite to replace it.",
                    config_path.display()
                );
            }

            let mut config = ClientConfig::default();
            if let Some(chain_id) = chain_id {
                config.chain_id = chain_id;
            }
            if let Some(address) = zzz_address {
                address
                    .parse::<Address>()
                    .with_context(|| format!("Invalid --zzz address: {}", address))?;
                config.zzz_address = address;
            }
            if let Some(keyfile) = keyfile {
                config.keyfile = keyfile.display().to_string();
            }

            config.save(home)?;
            info!(path = %config_path.display(), "wrote client config");
            println!("Client config written to {}", config_path.display());
        }
    }

    Ok(())
}

fn cmd_version(output: &str) -> Result<()> {
    let version_info = VersionInfo::new();

    match output {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&version_info)?);
        }
        _ => {
            println!("{}: {}", version_info.name, version_info.version);
            println!("git commit: {}", version_info.git_commit);
            println!("protocol: {} {}", version_info.protocol, version_info.protocol_version);
            println!("rust version: {}", version_info.rust_version);
        }
    }

    Ok(())
}

// =============================================================================
// Version Info
// =============================================================================

#[derive(serde::Serialize)]
struct VersionInfo {
    name: String,
    version: String,
    git_commit: String,
    protocol: String,
    protocol_version: String,
    rust_version: String,
}

impl VersionInfo {
    fn new() -> Self {
        Self {
            name: "zzz".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            git_commit: option_env!("GIT_COMMIT").unwrap_or("unknown").to_string(),
            protocol: zzz_crypto::PROTOCOL_NAME.to_string(),
            protocol_version: zzz_crypto::PROTOCOL_VERSION.to_string(),
            rust_version: option_env!("CARGO_PKG_RUST_VERSION")
                .unwrap_or("unknown")
                .to_string(),
        }
    }
}
