use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;

use stonfi_rs::normalize::normalize_response;
use stonfi_rs::StonfiClient;

#[derive(Parser, Debug)]
#[command(version, about = "CLI for the STON.fi DEX HTTP API")]
struct Args {
    /// API base URL
    #[arg(long, default_value = stonfi_rs::client::BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all assets on the exchange
    Assets,
    /// Fetch one asset by contract address
    Asset {
        #[arg(long)]
        address: String,
    },
    /// Search assets by name or symbol
    Search {
        #[arg(long)]
        query: String,
        #[arg(long)]
        condition: Option<String>,
        #[arg(long)]
        wallet: Option<String>,
    },
    /// Query assets by condition with an unconditional allow-list
    QueryAssets {
        #[arg(long)]
        condition: Option<String>,
        /// May be repeated
        #[arg(long = "unconditional-asset")]
        unconditional_assets: Vec<String>,
        #[arg(long)]
        wallet: Option<String>,
    },
    /// List all liquidity pools
    Pools,
    /// Fetch one pool by address
    Pool {
        #[arg(long)]
        address: String,
    },
    /// List all farms
    Farms,
    /// Fetch one farm by minter address
    Farm {
        #[arg(long)]
        address: String,
    },
    /// List farms staking a pool's LP token
    FarmsByPool {
        #[arg(long)]
        address: String,
    },
    /// Fetch the status of a submitted swap
    SwapStatus {
        #[arg(long)]
        router: String,
        #[arg(long)]
        owner: String,
        #[arg(long)]
        query_id: String,
    },
    /// Simulate a direct swap
    SwapSimulate {
        #[arg(long)]
        offer: String,
        #[arg(long)]
        ask: String,
        #[arg(long)]
        units: String,
        #[arg(long, default_value = "0.01")]
        slippage: String,
    },
    /// Simulate a reverse swap (desired ask amount known)
    ReverseSwapSimulate {
        #[arg(long)]
        offer: String,
        #[arg(long)]
        ask: String,
        #[arg(long)]
        units: String,
        #[arg(long, default_value = "0.01")]
        slippage: String,
    },
    /// List assets held by a wallet, or one asset with --asset
    WalletAssets {
        #[arg(long)]
        wallet: String,
        #[arg(long)]
        asset: Option<String>,
    },
    /// List pools a wallet provides liquidity to, or one pool with --pool
    WalletPools {
        #[arg(long)]
        wallet: String,
        #[arg(long)]
        pool: Option<String>,
    },
    /// List farms a wallet stakes in, or one farm with --farm
    WalletFarms {
        #[arg(long)]
        wallet: String,
        #[arg(long)]
        farm: Option<String>,
    },
    /// Wallet operation history over a time range (default: last 24h)
    WalletOperations {
        #[arg(long)]
        wallet: String,
        #[arg(long)]
        since: Option<DateTime<Utc>>,
        #[arg(long)]
        until: Option<DateTime<Utc>>,
    },
    /// Exchange-wide statistics over a time range (default: last 24h)
    StatsDex {
        #[arg(long)]
        since: Option<DateTime<Utc>>,
        #[arg(long)]
        until: Option<DateTime<Utc>>,
    },
    /// Historical operations over a time range (default: last 24h)
    StatsOperations {
        #[arg(long)]
        since: Option<DateTime<Utc>>,
        #[arg(long)]
        until: Option<DateTime<Utc>>,
    },
    /// Per-pool statistics over a time range (default: last 24h)
    StatsPools {
        #[arg(long)]
        since: Option<DateTime<Utc>>,
        #[arg(long)]
        until: Option<DateTime<Utc>>,
    },
}

fn time_range(
    since: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let until = until.unwrap_or_else(Utc::now);
    let since = since.unwrap_or(until - Duration::hours(24));
    (since, until)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run().await {
        error_message(&format!("{:#}", err));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    if std::env::var("STONFI_API_KEY").unwrap_or_default().is_empty() {
        anyhow::bail!("STONFI_API_KEY environment variable is not set");
    }

    let args = Args::parse();
    let client = StonfiClient::with_base_url(&args.base_url)?;

    match args.command {
        Command::Assets => {
            info_message("Fetching all DEX assets...");
            let assets = client.get_assets().await.context("fetching assets")?;
            success_message("Assets fetched successfully!");
            print_json("Assets", &assets)?;
        }
        Command::Asset { address } => {
            info_message(&format!("Fetching asset {}...", address));
            let asset = client.get_asset(&address).await.context("fetching asset")?;
            success_message("Asset fetched successfully!");
            print_json("Asset", &asset)?;
        }
        Command::Search {
            query,
            condition,
            wallet,
        } => {
            info_message(&format!("Searching assets for '{}'...", query));
            let found = client
                .search_assets(&query, condition.as_deref(), wallet.as_deref())
                .await
                .context("searching assets")?;
            success_message("Search completed successfully!");
            print_json("Search results", &found)?;
        }
        Command::QueryAssets {
            condition,
            unconditional_assets,
            wallet,
        } => {
            info_message("Querying assets...");
            let found = client
                .query_assets(condition.as_deref(), &unconditional_assets, wallet.as_deref())
                .await
                .context("querying assets")?;
            success_message("Query completed successfully!");
            print_json("Query results", &found)?;
        }
        Command::Pools => {
            info_message("Fetching all DEX pools...");
            let pools = client.get_pools().await.context("fetching pools")?;
            success_message("Pools fetched successfully!");
            print_json("Pools", &pools)?;
        }
        Command::Pool { address } => {
            info_message(&format!("Fetching pool {}...", address));
            let pool = client.get_pool(&address).await.context("fetching pool")?;
            success_message("Pool fetched successfully!");
            print_json("Pool", &pool)?;
        }
        Command::Farms => {
            info_message("Fetching all DEX farms...");
            let farms = client.get_farms().await.context("fetching farms")?;
            success_message("Farms fetched successfully!");
            print_json("Farms", &farms)?;
        }
        Command::Farm { address } => {
            info_message(&format!("Fetching farm {}...", address));
            let farm = client.get_farm(&address).await.context("fetching farm")?;
            success_message("Farm fetched successfully!");
            print_json("Farm", &farm)?;
        }
        Command::FarmsByPool { address } => {
            info_message(&format!("Fetching farms for pool {}...", address));
            let farms = client
                .get_farms_by_pool(&address)
                .await
                .context("fetching farms by pool")?;
            success_message("Farms fetched successfully!");
            print_json("Farms", &farms)?;
        }
        Command::SwapStatus {
            router,
            owner,
            query_id,
        } => {
            info_message(&format!("Fetching swap status for query {}...", query_id));
            let status = client
                .get_swap_status(&router, &owner, &query_id)
                .await
                .context("fetching swap status")?;
            success_message("Swap status fetched successfully!");
            print_json("Swap status", &status)?;
        }
        Command::SwapSimulate {
            offer,
            ask,
            units,
            slippage,
        } => {
            info_message(&format!(
                "Simulating swap: {} -> {}, units: {}, slippage: {}",
                offer, ask, units, slippage
            ));
            let simulation = client
                .simulate_swap(&offer, &ask, &units, &slippage)
                .await
                .context("simulating swap")?;
            success_message("Swap simulation completed successfully!");
            print_json("Swap simulation", &simulation)?;
        }
        Command::ReverseSwapSimulate {
            offer,
            ask,
            units,
            slippage,
        } => {
            info_message(&format!(
                "Simulating reverse swap: {} -> {}, units: {}, slippage: {}",
                offer, ask, units, slippage
            ));
            let simulation = client
                .simulate_reverse_swap(&offer, &ask, &units, &slippage)
                .await
                .context("simulating reverse swap")?;
            success_message("Reverse swap simulation completed successfully!");
            print_json("Reverse swap simulation", &simulation)?;
        }
        Command::WalletAssets { wallet, asset } => match asset {
            Some(asset) => {
                info_message(&format!("Fetching asset {} for wallet {}...", asset, wallet));
                let found = client
                    .get_wallet_asset(&wallet, &asset)
                    .await
                    .context("fetching wallet asset")?;
                success_message("Wallet asset fetched successfully!");
                print_json("Wallet asset", &found)?;
            }
            None => {
                info_message(&format!("Fetching wallet assets for {}...", wallet));
                let found = client
                    .get_wallet_assets(&wallet)
                    .await
                    .context("fetching wallet assets")?;
                success_message("Wallet assets fetched successfully!");
                print_json("Wallet assets", &found)?;
            }
        },
        Command::WalletPools { wallet, pool } => match pool {
            Some(pool) => {
                info_message(&format!("Fetching pool {} for wallet {}...", pool, wallet));
                let found = client
                    .get_wallet_pool(&wallet, &pool)
                    .await
                    .context("fetching wallet pool")?;
                success_message("Wallet pool fetched successfully!");
                print_json("Wallet pool", &found)?;
            }
            None => {
                info_message(&format!("Fetching wallet pools for {}...", wallet));
                let found = client
                    .get_wallet_pools(&wallet)
                    .await
                    .context("fetching wallet pools")?;
                success_message("Wallet pools fetched successfully!");
                print_json("Wallet pools", &found)?;
            }
        },
        Command::WalletFarms { wallet, farm } => match farm {
            Some(farm) => {
                info_message(&format!("Fetching farm {} for wallet {}...", farm, wallet));
                let found = client
                    .get_wallet_farm(&wallet, &farm)
                    .await
                    .context("fetching wallet farm")?;
                success_message("Wallet farm fetched successfully!");
                print_json("Wallet farm", &found)?;
            }
            None => {
                info_message(&format!("Fetching wallet farms for {}...", wallet));
                let found = client
                    .get_wallet_farms(&wallet)
                    .await
                    .context("fetching wallet farms")?;
                success_message("Wallet farms fetched successfully!");
                print_json("Wallet farms", &found)?;
            }
        },
        Command::WalletOperations {
            wallet,
            since,
            until,
        } => {
            let (since, until) = time_range(since, until);
            info_message(&format!(
                "Fetching operations for wallet {} ({} to {})...",
                wallet, since, until
            ));
            let operations = client
                .get_wallet_operations(&wallet, since, until)
                .await
                .context("fetching wallet operations")?;
            success_message("Wallet operations fetched successfully!");
            print_json("Wallet operations", &operations)?;
        }
        Command::StatsDex { since, until } => {
            let (since, until) = time_range(since, until);
            info_message(&format!("Fetching DEX stats ({} to {})...", since, until));
            let stats = client
                .get_dex_stats(since, until)
                .await
                .context("fetching DEX stats")?;
            success_message("DEX stats fetched successfully!");
            print_json("DEX stats", &stats)?;
        }
        Command::StatsOperations { since, until } => {
            let (since, until) = time_range(since, until);
            info_message(&format!(
                "Fetching operation stats ({} to {})...",
                since, until
            ));
            let stats = client
                .get_operations_stats(since, until)
                .await
                .context("fetching operation stats")?;
            success_message("Operation stats fetched successfully!");
            print_json("Operations", &stats)?;
        }
        Command::StatsPools { since, until } => {
            let (since, until) = time_range(since, until);
            info_message(&format!("Fetching pool stats ({} to {})...", since, until));
            let stats = client
                .get_pool_stats(since, until)
                .await
                .context("fetching pool stats")?;
            success_message("Pool stats fetched successfully!");
            print_json("Pool stats", &stats)?;
        }
    }

    Ok(())
}

/// Print a typed result as indented camelCase JSON with nulls flattened,
/// so terminal output matches the normalized display convention.
fn print_json<T: Serialize>(title: &str, data: &T) -> Result<()> {
    let raw = serde_json::to_vec(data).context("serializing result")?;
    let normalized = normalize_response(&raw).context("normalizing result")?;
    let value: serde_json::Value =
        serde_json::from_slice(&normalized).context("re-reading normalized result")?;
    println!("\n{}:", title.cyan().bold());
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn info_message(message: &str) {
    println!("\n{} {}", "[INFO]".yellow(), message);
}

fn success_message(message: &str) {
    println!("\n{} {}", "[SUCCESS]".green(), message);
}

fn error_message(message: &str) {
    eprintln!("\n{} {}", "[ERROR]".red(), message);
}
