use serde::{Deserialize, Serialize};

/// Response for `/v1/swap/simulate` and `/v1/reverse_swap/simulate`.
///
/// A dry-run computation of expected output amount and price impact for a
/// hypothetical trade, performed server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapSimulationResponse {
    pub ask_address: String,
    pub ask_jetton_wallet: String,
    pub ask_units: String,
    pub fee_address: String,
    pub fee_percent: String,
    pub fee_units: String,
    pub min_ask_units: String,
    pub offer_address: String,
    pub offer_jetton_wallet: String,
    pub offer_units: String,
    pub pool_address: String,
    pub price_impact: String,
    pub router_address: String,
    pub slippage_tolerance: String,
    pub swap_rate: String,
}

/// Response for `/v1/swap/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapStatusResponse {
    #[serde(rename = "@type", default)]
    pub type_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub balance_deltas: Option<String>,
    #[serde(default)]
    pub coins: Option<String>,
    #[serde(default)]
    pub exit_code: Option<String>,
    #[serde(default)]
    pub logical_time: Option<String>,
    #[serde(default)]
    pub query_id: Option<String>,
    #[serde(default)]
    pub tx_hash: Option<String>,
}
