//! Command Line Interface for inspecting Uniswap V2 pairs.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use pairscope_protocols::prelude::*;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser)]
#[command(name = "pairscope")]
#[command(about = "Inspect Uniswap V2 liquidity pairs via multicall", long_about = None)]
struct Cli {
    #[command(flatten)]
    endpoint: EndpointArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct EndpointArgs {
    /// JSON-RPC endpoint (overrides PAIRSCOPE_RPC_URL)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Multicall aggregator address (overrides PAIRSCOPE_MULTICALL_ADDRESS)
    #[arg(long, global = true)]
    multicall: Option<String>,

    /// Timeout per network round in seconds (overrides PAIRSCOPE_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch tokens, reserves and LP supply of a pair
    Inspect {
        /// Pair contract address
        address: String,

        /// Read at this block instead of the latest one
        #[arg(long)]
        block: Option<u64>,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that an address is well-formed and holds a contract
    Validate {
        /// Address to check
        address: String,
    },
}

fn build_config(args: &EndpointArgs) -> Result<RpcConfig> {
    let mut config = RpcConfig::from_env().context("invalid PAIRSCOPE_* environment")?;
    if let Some(url) = &args.rpc_url {
        config = config.with_rpc_url(url);
    }
    if let Some(multicall) = &args.multicall {
        let address = parse_address(multicall)
            .map_err(|_| anyhow::anyhow!("--multicall is not a valid address: {multicall}"))?;
        config = config.with_multicall_address(address);
    }
    if let Some(secs) = args.timeout_secs {
        anyhow::ensure!(secs > 0, "--timeout-secs must be positive");
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

/// Prints the fixed message for `err` and returns a failing exit code.
fn report(err: &InspectError) -> ExitCode {
    tracing::debug!(kind = %err.kind(), error = %err, "Lookup failed");
    eprintln!("❌ {}", err.user_message());
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli.endpoint)?;
    tracing::info!(
        rpc_url = %config.rpc_url,
        multicall = %config.multicall_address,
        "Using endpoint"
    );
    let inspector = PairInspector::connect(config).context("failed to create rpc client")?;

    match &cli.command {
        Commands::Inspect {
            address,
            block,
            json,
        } => {
            let block = block.map_or(BlockTag::Latest, BlockTag::Number);
            let snapshot = match inspector.inspect_at(address, block).await {
                Ok(snapshot) => snapshot,
                Err(e) => return Ok(report(&e)),
            };

            if *json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!(
                    "📊 {}/{} pair at block {}",
                    snapshot.token0.symbol, snapshot.token1.symbol, snapshot.block_number
                );
                print!("{}", render::render_table(&snapshot));
            }
        }
        Commands::Validate { address } => match inspector.validate(address).await {
            Ok(contract) => println!("✅ {contract} is a deployed contract"),
            Err(e) => return Ok(report(&e)),
        },
    }

    Ok(ExitCode::SUCCESS)
}
