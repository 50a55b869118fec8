//! Raydium CLMM pool price feed.
//!
//! `models::pool` decodes the fixed 1544-byte pool account and `utils::price`
//! turns its Q64.64 square-root price into a decimal-adjusted `f64`. Both are
//! pure. `dex::raydium_clmm` and `scheduler` wire them to an RPC node and a
//! polling loop.

pub mod config;
pub mod dex;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod utils;

pub use error::{DecodeError, FeedError};
pub use models::pool::{decode_pool_state, PoolState, RewardInfo, Uint128, POOL_STATE_LEN};
pub use utils::price::{calculate_price, price_from_sqrt_x64};
