use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-reward-token accounting inside a farm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmReward {
    pub address: String,
    pub status: String,
    pub remaining_rewards: String,
    pub reward_rate_24h: String,
}

/// A staking farm rewarding liquidity-pool token holders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    pub minter_address: String,
    pub pool_address: String,
    pub reward_token_address: String,
    pub status: String,
    #[serde(default)]
    pub min_stake_duration_s: String,
    #[serde(default)]
    pub locked_total_lp: String,
    #[serde(default)]
    pub locked_total_lp_usd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apy: Option<String>,
    /// Stake-position NFTs; shape varies per farm version, kept untyped.
    #[serde(default)]
    pub nft_infos: Vec<Value>,
    #[serde(default)]
    pub rewards: Vec<FarmReward>,
}

/// Response for `/v1/farms/{addr_str}` and the wallet-scoped single farm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmResponse {
    pub farm: Farm,
}

/// Response for `/v1/farms`, `/v1/farms_by_pool/{addr_str}` and the
/// wallet-scoped farm listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmListResponse {
    pub farm_list: Vec<Farm>,
}
