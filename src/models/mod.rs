pub mod asset;
pub mod farm;
pub mod pool;
pub mod stats;
pub mod swap;
pub mod wallet;

pub use asset::{Asset, AssetKind, AssetListResponse, AssetResponse};
pub use farm::{Farm, FarmListResponse, FarmResponse, FarmReward};
pub use pool::{Pool, PoolListResponse, PoolResponse};
pub use stats::{
    DexStats, DexStatsResponse, Operation, OperationEntry, OperationsResponse, PoolDayStats,
    PoolStatsResponse,
};
pub use swap::{SwapSimulationResponse, SwapStatusResponse};
pub use wallet::{WalletAsset, WalletAssetListResponse, WalletAssetMeta, WalletOperationsResponse};
