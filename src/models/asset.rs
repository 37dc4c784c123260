use serde::{Deserialize, Serialize};

/// Kind of asset tracked by the DEX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    Ton,
    Wton,
    Jetton,
}

/// A fungible asset (TON or jetton) listed on the exchange.
///
/// Amounts and prices are decimal strings as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub contract_address: String,
    pub kind: AssetKind,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dex_price_usd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_party_price_usd: Option<String>,
    #[serde(default)]
    pub default_symbol: bool,
    #[serde(default)]
    pub taxable: bool,
    #[serde(default)]
    pub blacklisted: bool,
    #[serde(default)]
    pub community: bool,
    #[serde(default)]
    pub deprecated: bool,
}

/// Response for `/v1/assets/{addr_str}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetResponse {
    pub asset: Asset,
}

/// Response for `/v1/assets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetListResponse {
    pub asset_list: Vec<Asset>,
}
