use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Asset;

/// Exchange-wide aggregates over one queried time range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexStats {
    pub tvl: String,
    pub volume_usd: String,
    pub trades: u64,
    pub unique_wallets: u64,
}

/// Response for `/v1/stats/dex`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexStatsResponse {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub stats: DexStats,
}

/// One historical DEX operation (swap or liquidity change).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub pool_address: String,
    pub router_address: String,
    pub wallet_address: String,
    pub operation_type: String,
    pub success: bool,
    pub exit_code: String,
    pub asset0_address: String,
    pub asset0_amount: String,
    pub asset0_delta: String,
    pub asset0_reserve: String,
    pub asset1_address: String,
    pub asset1_amount: String,
    pub asset1_delta: String,
    pub asset1_reserve: String,
    pub lp_token_supply: String,
    pub lp_token_delta: String,
    pub lp_fee_amount: String,
    pub protocol_fee_amount: String,
    pub referral_fee_amount: String,
    #[serde(default)]
    pub referral_address: String,
    #[serde(default)]
    pub destination_wallet_address: String,
    #[serde(default)]
    pub fee_asset_address: String,
    pub wallet_tx_hash: String,
    pub wallet_tx_lt: String,
    pub wallet_tx_timestamp: String,
    pub pool_tx_hash: String,
    pub pool_tx_lt: i64,
    pub pool_tx_timestamp: String,
}

/// Operation plus the metadata of both assets involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationEntry {
    pub operation: Operation,
    #[serde(default)]
    pub asset0_info: Option<Asset>,
    #[serde(default)]
    pub asset1_info: Option<Asset>,
}

/// Response for `/v1/stats/operations` and the wallet operation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationsResponse {
    pub operations: Vec<OperationEntry>,
}

/// Per-pool market summary for one queried time range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolDayStats {
    pub pool_address: String,
    pub router_address: String,
    pub url: String,
    pub base_id: String,
    pub base_name: String,
    pub base_symbol: String,
    pub quote_id: String,
    pub quote_name: String,
    pub quote_symbol: String,
    pub last_price: String,
    pub base_volume: String,
    pub quote_volume: String,
    pub base_liquidity: String,
    pub quote_liquidity: String,
    pub lp_price: String,
    pub lp_price_usd: String,
    #[serde(default)]
    pub apy: Option<String>,
}

/// Response for `/v1/stats/pools`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolStatsResponse {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub stats: Vec<PoolDayStats>,
    #[serde(default)]
    pub unique_wallets_count: u64,
}
