//! splitter: create token splitters and trigger their distributions.

mod config;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use alloy_primitives::Address;
use anyhow::{bail, Context};
use clap::Parser;
use serde_json::json;

use config::CliConfig;
use splitter_chain::JsonRpcClient;
use splitter_core::{SplitterError, SplitterService};
use splitter_types::{parse_address, NetworkId, RecipientSpec};
use splitter_utils::{init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "splitter", about = "Create and operate ERC-20 splitter contracts")]
struct Cli {
    /// Network: "arbitrum-sepolia" or "arbitrum" (or a chain id).
    /// When a config file is provided, defaults to the file's network value.
    #[arg(long, env = "SPLITTER_NETWORK")]
    network: Option<NetworkId>,

    /// JSON-RPC endpoint (defaults to the network's public endpoint).
    #[arg(long, env = "SPLITTER_RPC_URL")]
    rpc_url: Option<String>,

    /// Account the node signs transactions with.
    #[arg(long, env = "SPLITTER_FROM", value_parser = parse_address)]
    from: Option<Address>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "SPLITTER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Deploy a new splitter. Shares are whole percentages totalling 100.
    Create {
        /// Recipients as <address>:<share>, e.g. 0xabc…:50
        #[arg(required = true, num_args = 1..)]
        recipients: Vec<RecipientSpec>,
    },
    /// Show a splitter's recipients, balance and entitlements.
    Status { splitter: String },
    /// Distribute a splitter's balance to its recipients.
    Distribute { splitter: String },
    /// Show the implementation contract the factory clones.
    Implementation,
}

fn load_config(cli: &Cli) -> anyhow::Result<CliConfig> {
    let base = match &cli.config {
        Some(path) => CliConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => CliConfig::default(),
    };
    Ok(CliConfig {
        network: cli.network.unwrap_or(base.network),
        rpc_url: cli.rpc_url.clone().or(base.rpc_url),
        from: cli.from.or(base.from),
        log_format: cli.log_format.unwrap_or(base.log_format),
        log_level: cli.log_level.clone().unwrap_or(base.log_level),
        ..base
    })
}

/// Log a flow error with its classification before handing it to anyhow.
fn report(e: SplitterError) -> anyhow::Error {
    tracing::error!(kind = e.kind().as_str(), retryable = e.is_retryable(), "{e}");
    anyhow::Error::new(e)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format, &config.log_level);

    let network = config.network;
    let mut client = JsonRpcClient::with_timeouts(
        config.rpc_url(),
        config.request_timeout(),
        config.request_timeout().min(std::time::Duration::from_secs(10)),
    )?;
    if let Some(from) = config.from {
        client = client.with_signer(from);
    }

    let chain_id = client
        .chain_id()
        .await
        .with_context(|| format!("querying chain id from {}", client.url()))?;
    if chain_id != network.chain_id() {
        bail!(
            "{} is on chain {chain_id}, but network {network} is chain {}",
            client.url(),
            network.chain_id()
        );
    }
    tracing::info!(%network, rpc = client.url(), signer = ?client.signer(), "connected");

    let service = SplitterService::with_addresses(
        Arc::new(client),
        network,
        config.factory_address(),
        config.token_address(),
        config.tracker_config(),
    );

    match cli.command {
        Command::Create { recipients } => {
            let created = service.create_splitter(&recipients).await.map_err(report)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&created)?);
            } else {
                println!("{}", output::render_creation(&created, network));
            }
        }
        Command::Status { splitter } => {
            let snapshot = service.read_splitter(&splitter).await.map_err(report)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("{}", output::render_snapshot(&snapshot, network));
            }
        }
        Command::Distribute { splitter } => {
            let outcome = service.distribute_address(&splitter).await.map_err(report)?;
            if cli.json {
                let value = json!({
                    "splitter": outcome.distributed.splitter,
                    "transaction_hash": outcome.distributed.transaction_hash,
                    "balance": outcome.distributed.balance,
                    "refreshed": outcome.refreshed.as_ref().ok(),
                    "refresh_error": outcome.refreshed.as_ref().err().map(ToString::to_string),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", output::render_distribution(&outcome, network));
            }
        }
        Command::Implementation => {
            let implementation = service.factory().implementation().await.map_err(report)?;
            if cli.json {
                println!("{}", json!({ "implementation": implementation }));
            } else {
                println!("{implementation}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_recipients() {
        let cli = Cli::try_parse_from([
            "splitter",
            "create",
            "0x1111111111111111111111111111111111111111:70",
            "0x2222222222222222222222222222222222222222:30",
        ])
        .unwrap();
        match cli.command {
            Command::Create { recipients } => {
                assert_eq!(recipients.len(), 2);
                assert_eq!(recipients[0].share, 70);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn rejects_unknown_network_flag() {
        let parsed = Cli::try_parse_from(["splitter", "--network", "goerli", "implementation"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"network = \"arbitrum\"\nlog_level = \"debug\"\nrpc_url = \"http://file:8545\"\n",
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from([
            "splitter",
            "--config",
            path,
            "--rpc-url",
            "http://flag:8545",
            "status",
            "0x1111111111111111111111111111111111111111",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();

        assert_eq!(config.network, NetworkId::ArbitrumOne);
        assert_eq!(config.rpc_url(), "http://flag:8545");
        assert_eq!(config.log_level, "debug");
    }
}
