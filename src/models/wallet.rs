use serde::{Deserialize, Serialize};

use crate::models::stats::OperationEntry;

/// Display metadata nested inside a wallet asset entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletAssetMeta {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub decimals: u32,
}

/// An asset as seen from a wallet's perspective: listing entries from
/// `/v1/assets/search`, `/v1/assets/query` and `/v1/wallets/{addr_str}/assets`
/// carry a balance and nested metadata instead of the flat [`crate::Asset`]
/// shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletAsset {
    pub contract_address: String,
    pub kind: String,
    #[serde(default)]
    pub dex_price_usd: Option<String>,
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub balance: Option<String>,
    #[serde(default)]
    pub meta: Option<WalletAssetMeta>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Response for the wallet-scoped asset listings above.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletAssetListResponse {
    pub asset_list: Vec<WalletAsset>,
}

/// Response for `/v1/wallets/{addr_str}/operations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletOperationsResponse {
    pub operations: Vec<OperationEntry>,
}
