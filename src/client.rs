use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Error;
use crate::models::*;
use crate::normalize::{encode_query, normalize_request, QueryParams};

/// Production API endpoint.
pub const BASE_URL: &str = "https://api.ston.fi";

const USER_AGENT_VALUE: &str = concat!("stonfi-rs/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Typed client for the STON.fi DEX HTTP API.
///
/// One method per endpoint; each builds a URL via path templating, issues the
/// request and decodes the JSON body into a fixed struct. Safe to share
/// across tasks — the underlying transport is `Clone` and every call builds
/// its own parameter map.
pub struct StonfiClient {
    base_url: String,
    http: reqwest::Client,
}

impl StonfiClient {
    /// Create a client against the production API.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(BASE_URL)
    }

    /// Create a client against a custom base URL.
    ///
    /// Fails with [`Error::InvalidConfiguration`] unless the URL is a
    /// well-formed absolute http(s) URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .default_headers(default_headers())
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::InvalidConfiguration(e.to_string()))?;
        Self::with_client(base_url, http)
    }

    /// Create a client with a caller-built transport (custom timeouts,
    /// proxies). The transport is used as-is.
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| Error::InvalidConfiguration(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidConfiguration(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path_template: &str,
        params: QueryParams,
    ) -> Result<T, Error> {
        let (path, query) = normalize_request(path_template, params);
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&encode_query(&query));
        }

        debug!(%method, %url, "dispatching API request");
        let response = self.http.request(method, &url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(Error::Request {
                status: Some(status.as_u16()),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(Error::Decode)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: QueryParams) -> Result<T, Error> {
        self.request(Method::GET, path, params).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, params: QueryParams) -> Result<T, Error> {
        self.request(Method::POST, path, params).await
    }

    /// Fetch all assets listed on the exchange.
    pub async fn get_assets(&self) -> Result<AssetListResponse, Error> {
        self.get("/v1/assets", QueryParams::new()).await
    }

    /// Fetch a single asset by contract address.
    pub async fn get_asset(&self, asset_address: &str) -> Result<AssetResponse, Error> {
        self.get("/v1/assets/{addr_str}", one("addr_str", asset_address))
            .await
    }

    /// Search assets by display name or symbol, optionally filtered by a
    /// condition expression and scoped to a wallet.
    pub async fn search_assets(
        &self,
        search_string: &str,
        condition: Option<&str>,
        wallet_address: Option<&str>,
    ) -> Result<WalletAssetListResponse, Error> {
        let mut params = one("search_string", search_string);
        if let Some(condition) = condition {
            params.insert("condition".to_string(), vec![condition.to_string()]);
        }
        if let Some(wallet) = wallet_address {
            params.insert("wallet_address".to_string(), vec![wallet.to_string()]);
        }
        self.get("/v1/assets/search", params).await
    }

    /// Query assets by condition, with an unconditional allow-list and an
    /// optional wallet scope for balances.
    pub async fn query_assets(
        &self,
        condition: Option<&str>,
        unconditional_assets: &[String],
        wallet_address: Option<&str>,
    ) -> Result<WalletAssetListResponse, Error> {
        let mut params = QueryParams::new();
        if let Some(condition) = condition {
            params.insert("condition".to_string(), vec![condition.to_string()]);
        }
        if !unconditional_assets.is_empty() {
            params.insert(
                "unconditional_assets".to_string(),
                unconditional_assets.to_vec(),
            );
        }
        if let Some(wallet) = wallet_address {
            params.insert("wallet_address".to_string(), vec![wallet.to_string()]);
        }
        self.get("/v1/assets/query", params).await
    }

    /// Fetch all liquidity pools.
    pub async fn get_pools(&self) -> Result<PoolListResponse, Error> {
        self.get("/v1/pools", QueryParams::new()).await
    }

    /// Fetch a single pool by address.
    pub async fn get_pool(&self, pool_address: &str) -> Result<PoolResponse, Error> {
        self.get("/v1/pools/{addr_str}", one("addr_str", pool_address))
            .await
    }

    /// Fetch all farms.
    pub async fn get_farms(&self) -> Result<FarmListResponse, Error> {
        self.get("/v1/farms", QueryParams::new()).await
    }

    /// Fetch a single farm by minter address.
    pub async fn get_farm(&self, farm_address: &str) -> Result<FarmResponse, Error> {
        self.get("/v1/farms/{addr_str}", one("addr_str", farm_address))
            .await
    }

    /// Fetch the farms staking a given pool's LP token.
    pub async fn get_farms_by_pool(&self, pool_address: &str) -> Result<FarmListResponse, Error> {
        self.get("/v1/farms_by_pool/{addr_str}", one("addr_str", pool_address))
            .await
    }

    /// Fetch the status of a swap previously submitted through a router.
    pub async fn get_swap_status(
        &self,
        router_address: &str,
        owner_address: &str,
        query_id: &str,
    ) -> Result<SwapStatusResponse, Error> {
        let mut params = one("routerAddress", router_address);
        params.insert("ownerAddress".to_string(), vec![owner_address.to_string()]);
        params.insert("queryId".to_string(), vec![query_id.to_string()]);
        self.get("/v1/swap/status", params).await
    }

    /// Simulate a direct swap: given an offered amount, compute the expected
    /// ask units and price impact.
    pub async fn simulate_swap(
        &self,
        offer_address: &str,
        ask_address: &str,
        units: &str,
        slippage_tolerance: &str,
    ) -> Result<SwapSimulationResponse, Error> {
        let params = swap_params(offer_address, ask_address, units, slippage_tolerance);
        self.post("/v1/swap/simulate", params).await
    }

    /// Simulate a reverse swap: given a desired ask amount, compute the
    /// offer units required.
    pub async fn simulate_reverse_swap(
        &self,
        offer_address: &str,
        ask_address: &str,
        units: &str,
        slippage_tolerance: &str,
    ) -> Result<SwapSimulationResponse, Error> {
        let params = swap_params(offer_address, ask_address, units, slippage_tolerance);
        self.post("/v1/reverse_swap/simulate", params).await
    }

    /// Fetch all assets held by a wallet.
    pub async fn get_wallet_assets(
        &self,
        wallet_address: &str,
    ) -> Result<WalletAssetListResponse, Error> {
        self.get("/v1/wallets/{addr_str}/assets", one("addr_str", wallet_address))
            .await
    }

    /// Fetch one asset as held by a wallet.
    pub async fn get_wallet_asset(
        &self,
        wallet_address: &str,
        asset_address: &str,
    ) -> Result<AssetResponse, Error> {
        let mut params = one("addr_str", wallet_address);
        params.insert("asset_str".to_string(), vec![asset_address.to_string()]);
        self.get("/v1/wallets/{addr_str}/assets/{asset_str}", params)
            .await
    }

    /// Fetch all pools a wallet provides liquidity to.
    pub async fn get_wallet_pools(
        &self,
        wallet_address: &str,
    ) -> Result<PoolListResponse, Error> {
        self.get("/v1/wallets/{addr_str}/pools", one("addr_str", wallet_address))
            .await
    }

    /// Fetch one pool position of a wallet.
    pub async fn get_wallet_pool(
        &self,
        wallet_address: &str,
        pool_address: &str,
    ) -> Result<PoolResponse, Error> {
        let mut params = one("addr_str", wallet_address);
        params.insert("pool_str".to_string(), vec![pool_address.to_string()]);
        self.get("/v1/wallets/{addr_str}/pools/{pool_str}", params)
            .await
    }

    /// Fetch all farms a wallet stakes in.
    pub async fn get_wallet_farms(
        &self,
        wallet_address: &str,
    ) -> Result<FarmListResponse, Error> {
        self.get("/v1/wallets/{addr_str}/farms", one("addr_str", wallet_address))
            .await
    }

    /// Fetch one farm position of a wallet.
    pub async fn get_wallet_farm(
        &self,
        wallet_address: &str,
        farm_address: &str,
    ) -> Result<FarmResponse, Error> {
        let mut params = one("addr_str", wallet_address);
        params.insert("farm_str".to_string(), vec![farm_address.to_string()]);
        self.get("/v1/wallets/{addr_str}/farms/{farm_str}", params)
            .await
    }

    /// Fetch a wallet's operation history over a validated time range.
    pub async fn get_wallet_operations(
        &self,
        wallet_address: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<WalletOperationsResponse, Error> {
        validate_time_range(since, until)?;
        let mut params = one("addr_str", wallet_address);
        insert_time_range(&mut params, since, until);
        self.get("/v1/wallets/{addr_str}/operations", params).await
    }

    /// Fetch exchange-wide aggregate statistics for a time range.
    pub async fn get_dex_stats(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<DexStatsResponse, Error> {
        validate_time_range(since, until)?;
        let mut params = QueryParams::new();
        insert_time_range(&mut params, since, until);
        self.get("/v1/stats/dex", params).await
    }

    /// Fetch historical swap operations for a time range.
    pub async fn get_operations_stats(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<OperationsResponse, Error> {
        validate_time_range(since, until)?;
        let mut params = QueryParams::new();
        insert_time_range(&mut params, since, until);
        self.get("/v1/stats/operations", params).await
    }

    /// Fetch per-pool market statistics for a time range.
    pub async fn get_pool_stats(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<PoolStatsResponse, Error> {
        validate_time_range(since, until)?;
        let mut params = QueryParams::new();
        insert_time_range(&mut params, since, until);
        self.get("/v1/stats/pools", params).await
    }
}

fn default_headers() -> HeaderMap {
    // Accept-Encoding is handled by the enabled reqwest compression features,
    // which also decompress transparently.
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers
}

fn one(key: &str, value: &str) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert(key.to_string(), vec![value.to_string()]);
    params
}

fn swap_params(
    offer_address: &str,
    ask_address: &str,
    units: &str,
    slippage_tolerance: &str,
) -> QueryParams {
    let mut params = one("offer_address", offer_address);
    params.insert("ask_address".to_string(), vec![ask_address.to_string()]);
    params.insert("units".to_string(), vec![units.to_string()]);
    params.insert(
        "slippage_tolerance".to_string(),
        vec![slippage_tolerance.to_string()],
    );
    params
}

fn insert_time_range(params: &mut QueryParams, since: DateTime<Utc>, until: DateTime<Utc>) {
    params.insert("since".to_string(), vec![since.to_rfc3339()]);
    params.insert("until".to_string(), vec![until.to_rfc3339()]);
}

/// Mainnet launch; the stats endpoints serve no data before this date.
pub fn earliest_stats_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 11, 17, 0, 0, 0).unwrap()
}

/// Check a stats/history time range locally before any network I/O:
/// `until` strictly after `since`, span at most 24 hours, nothing before the
/// mainnet launch date.
pub fn validate_time_range(since: DateTime<Utc>, until: DateTime<Utc>) -> Result<(), Error> {
    if until <= since {
        return Err(Error::Validation(format!(
            "until must be after since (since: {}, until: {})",
            since, until
        )));
    }
    if until - since > chrono::Duration::hours(24) {
        return Err(Error::Validation(format!(
            "time range must span at most 24 hours (span: {})",
            until - since
        )));
    }
    let earliest = earliest_stats_date();
    if since < earliest {
        return Err(Error::Validation(format!(
            "time range must start after the mainnet launch date {} (since: {})",
            earliest, since
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            StonfiClient::with_base_url("not a url"),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            StonfiClient::with_base_url("ftp://api.ston.fi"),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = StonfiClient::with_base_url("https://api.ston.fi/").unwrap();
        assert_eq!(client.base_url(), "https://api.ston.fi");
    }

    #[test]
    fn time_range_must_be_forward() {
        let err = validate_time_range(utc(2024, 1, 2, 0), utc(2024, 1, 1, 0)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        // Zero-width ranges are rejected too.
        let err = validate_time_range(utc(2024, 1, 1, 0), utc(2024, 1, 1, 0)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn time_range_spans_at_most_24_hours() {
        assert!(validate_time_range(utc(2024, 1, 1, 0), utc(2024, 1, 2, 0)).is_ok());
        let err = validate_time_range(utc(2024, 1, 1, 0), utc(2024, 1, 2, 1)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn time_range_must_be_after_launch() {
        let err = validate_time_range(utc(2022, 11, 16, 0), utc(2022, 11, 16, 12)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(validate_time_range(utc(2022, 11, 17, 0), utc(2022, 11, 17, 12)).is_ok());
    }

    #[tokio::test]
    async fn get_asset_decodes_typed_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/assets/EQAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAM9c")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "asset": {
                        "contract_address": "EQAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAM9c",
                        "kind": "Ton",
                        "symbol": "TON",
                        "display_name": "TON",
                        "image_url": "https://asset.ston.fi/img/ton",
                        "decimals": 9,
                        "priority": 100,
                        "tags": ["default_symbol"],
                        "dex_price_usd": "6.730000000000000",
                        "default_symbol": true
                    }
                }"#,
            )
            .create_async()
            .await;

        let client = StonfiClient::with_base_url(&server.url()).unwrap();
        let response = client
            .get_asset("EQAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAM9c")
            .await
            .unwrap();
        assert_eq!(response.asset.symbol, "TON");
        assert_eq!(response.asset.kind, AssetKind::Ton);
        assert_eq!(response.asset.decimals, 9);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_yields_request_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/assets")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let client = StonfiClient::with_base_url(&server.url()).unwrap();
        let err = client.get_assets().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        match err {
            Error::Request { message, .. } => assert_eq!(message, "internal error"),
            other => panic!("expected Request error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_yields_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/pools")
            .with_status(200)
            .with_body("{not json")
            .create_async()
            .await;

        let client = StonfiClient::with_base_url(&server.url()).unwrap();
        let err = client.get_pools().await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn simulate_swap_posts_snake_cased_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/swap/simulate")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("offer_address".into(), "OFFER".into()),
                mockito::Matcher::UrlEncoded("ask_address".into(), "ASK".into()),
                mockito::Matcher::UrlEncoded("units".into(), "1000000".into()),
                mockito::Matcher::UrlEncoded("slippage_tolerance".into(), "0.01".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{
                    "ask_address": "ASK",
                    "ask_jetton_wallet": "W1",
                    "ask_units": "995",
                    "fee_address": "F",
                    "fee_percent": "0.003",
                    "fee_units": "3",
                    "min_ask_units": "985",
                    "offer_address": "OFFER",
                    "offer_jetton_wallet": "W2",
                    "offer_units": "1000000",
                    "pool_address": "P",
                    "price_impact": "0.001",
                    "router_address": "R",
                    "slippage_tolerance": "0.01",
                    "swap_rate": "0.000995"
                }"#,
            )
            .create_async()
            .await;

        let client = StonfiClient::with_base_url(&server.url()).unwrap();
        let sim = client
            .simulate_swap("OFFER", "ASK", "1000000", "0.01")
            .await
            .unwrap();
        assert_eq!(sim.ask_units, "995");
        assert_eq!(sim.price_impact, "0.001");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn query_assets_serializes_multi_value_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/assets/query")
            .match_query(mockito::Matcher::Exact(
                "unconditional_assets=A&unconditional_assets=B&wallet_address=W".into(),
            ))
            .with_status(200)
            .with_body(r#"{"asset_list": []}"#)
            .create_async()
            .await;

        let client = StonfiClient::with_base_url(&server.url()).unwrap();
        let response = client
            .query_assets(None, &["A".to_string(), "B".to_string()], Some("W"))
            .await
            .unwrap();
        assert!(response.asset_list.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn dex_stats_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/stats/dex")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{
                    "since": "2024-01-01T00:00:00Z",
                    "until": "2024-01-02T00:00:00Z",
                    "stats": {
                        "tvl": "1000000",
                        "volume_usd": "250000",
                        "trades": 4123,
                        "unique_wallets": 812
                    }
                }"#,
            )
            .create_async()
            .await;

        let client = StonfiClient::with_base_url(&server.url()).unwrap();
        let stats = client
            .get_dex_stats(utc(2024, 1, 1, 0), utc(2024, 1, 2, 0))
            .await
            .unwrap();
        assert_eq!(stats.stats.trades, 4123);
        assert_eq!(stats.since, utc(2024, 1, 1, 0));
    }

    #[tokio::test]
    async fn stats_validation_fails_before_any_request() {
        // Deliberately unroutable base URL: a validation failure must never
        // touch the socket.
        let client = StonfiClient::with_base_url("http://127.0.0.1:1").unwrap();
        let err = client
            .get_pool_stats(utc(2024, 1, 2, 0), utc(2024, 1, 1, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn wallet_asset_path_substitutes_both_placeholders() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/wallets/WALLET/assets/ASSET")
            .with_status(200)
            .with_body(
                r#"{"asset": {"contract_address": "ASSET", "kind": "Jetton", "symbol": "X"}}"#,
            )
            .create_async()
            .await;

        let client = StonfiClient::with_base_url(&server.url()).unwrap();
        let response = client.get_wallet_asset("WALLET", "ASSET").await.unwrap();
        assert_eq!(response.asset.contract_address, "ASSET");
        mock.assert_async().await;
    }
}
