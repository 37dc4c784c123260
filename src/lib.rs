//! # stonfi-rs
//!
//! A Rust client library for the STON.fi decentralized-exchange HTTP API.
//! Typed request/response structures and one method per endpoint for listing
//! assets, pools and farms, simulating swaps, and wallet-scoped queries.
//!
//! ## Endpoint coverage
//!
//! | Area | Calls |
//! |------|-------|
//! | Assets | `get_assets`, `get_asset`, `search_assets`, `query_assets` |
//! | Pools | `get_pools`, `get_pool` |
//! | Farms | `get_farms`, `get_farm`, `get_farms_by_pool` |
//! | Swaps | `get_swap_status`, `simulate_swap`, `simulate_reverse_swap` |
//! | Wallets | `get_wallet_assets/asset`, `get_wallet_pools/pool`, `get_wallet_farms/farm`, `get_wallet_operations` |
//! | Stats | `get_dex_stats`, `get_operations_stats`, `get_pool_stats` |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stonfi_rs::StonfiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StonfiClient::new()?;
//!
//!     let pools = client.get_pools().await?;
//!     for pool in pools.pool_list {
//!         println!("{}: {} / {}", pool.address, pool.reserve0, pool.reserve1);
//!     }
//!
//!     let sim = client
//!         .simulate_swap("EQ...offer", "EQ...ask", "1000000000", "0.01")
//!         .await?;
//!     println!("expected: {} (impact {})", sim.ask_units, sim.price_impact);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! The library includes a binary for convenient CLI usage:
//!
//! ```bash
//! # List every pool on the exchange
//! cargo run --release -- pools
//!
//! # Simulate a swap
//! cargo run --release -- swap-simulate --offer EQ...a --ask EQ...b --units 1000000000
//!
//! # DEX-wide stats for the last 24 hours
//! cargo run --release -- stats-dex
//! ```
//!
//! The stats endpoints accept a time range no older than the mainnet launch
//! date and spanning at most 24 hours; ranges are validated locally before
//! any request is sent.

pub mod client;
pub mod error;
pub mod models;
pub mod normalize;

pub use client::{validate_time_range, StonfiClient};
pub use error::Error;
pub use models::{
    Asset, AssetKind, AssetListResponse, AssetResponse, DexStatsResponse, Farm, FarmListResponse,
    FarmResponse, Operation, OperationsResponse, Pool, PoolListResponse, PoolResponse,
    PoolStatsResponse, SwapSimulationResponse, SwapStatusResponse, WalletAsset,
    WalletAssetListResponse, WalletOperationsResponse,
};
pub use normalize::{normalize_request, normalize_response, QueryParams};
