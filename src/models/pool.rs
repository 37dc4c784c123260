use serde::{Deserialize, Serialize};

/// A liquidity pair holding two reserve balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    pub address: String,
    pub router_address: String,
    pub reserve0: String,
    pub reserve1: String,
    pub token0_address: String,
    pub token1_address: String,
    pub lp_total_supply: String,
    #[serde(default)]
    pub lp_total_supply_usd: Option<String>,
    pub lp_fee: String,
    pub protocol_fee: String,
    pub ref_fee: String,
    #[serde(default)]
    pub protocol_fee_address: String,
    #[serde(default)]
    pub collected_token0_protocol_fee: String,
    #[serde(default)]
    pub collected_token1_protocol_fee: String,
    #[serde(default)]
    pub lp_price_usd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apy_1d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apy_7d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apy_30d: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
}

/// Response for `/v1/pools/{addr_str}` and the wallet-scoped single pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolResponse {
    pub pool: Pool,
}

/// Response for `/v1/pools` and the wallet-scoped pool listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolListResponse {
    pub pool_list: Vec<Pool>,
}
