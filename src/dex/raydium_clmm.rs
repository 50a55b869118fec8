use log::{debug, info, Level};
use solana_account_decoder::UiAccountEncoding;
use solana_client::rpc_client::RpcClient;
use solana_client::rpc_config::RpcAccountInfoConfig;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::SourceConfig;
use crate::error::FeedError;
use crate::models::pool::{decode_pool_state, PoolState};
use crate::models::update::{PriceUpdate, UpdateMap, ValueId, RAYDIUM_CLMM_DATA_SOURCE_ID};
use crate::scheduler::{error_log_handler, Scheduler};
use crate::utils::price::calculate_price;

/// Anything that can hand back the raw data of an account.
pub trait AccountSource: Send + Sync {
    fn get_account_data(&self, address: &Pubkey) -> Result<Vec<u8>, FeedError>;
}

pub struct RpcAccountSource {
    client: RpcClient,
}

impl RpcAccountSource {
    pub fn new(rpc_url: String) -> Self {
        Self::with_client(RpcClient::new_with_commitment(
            rpc_url,
            CommitmentConfig::confirmed(),
        ))
    }

    pub fn with_client(client: RpcClient) -> Self {
        Self { client }
    }
}

impl AccountSource for RpcAccountSource {
    fn get_account_data(&self, address: &Pubkey) -> Result<Vec<u8>, FeedError> {
        let config = RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            ..RpcAccountInfoConfig::default()
        };

        let response = self
            .client
            .get_account_with_config(address, config)
            .map_err(|e| FeedError::Fetch(e.to_string()))?;

        let account = response
            .value
            .ok_or(FeedError::AccountNotFound(*address))?;

        Ok(account.data)
    }
}

/// Polls a single Raydium CLMM pool and publishes its price under `value_id`.
pub struct ClmmDataSource {
    value_id: ValueId,
    pool_address: Pubkey,
    update_frequency: Duration,
    source: Arc<dyn AccountSource>,
}

impl ClmmDataSource {
    /// Fails on a malformed pool address or update frequency; both are
    /// configuration errors and are not worth retrying.
    pub fn new(config: &SourceConfig, source: Arc<dyn AccountSource>) -> Result<Self, FeedError> {
        Ok(Self {
            value_id: config.id.clone(),
            pool_address: config.pool_address()?,
            update_frequency: config.update_interval()?,
            source,
        })
    }

    pub fn pool_address(&self) -> Pubkey {
        self.pool_address
    }

    pub fn update_frequency(&self) -> Duration {
        self.update_frequency
    }

    pub fn get_pool_state(&self) -> Result<PoolState, FeedError> {
        let data = self.source.get_account_data(&self.pool_address)?;
        debug!(
            "Fetched {} bytes for pool {}",
            data.len(),
            self.pool_address
        );

        Ok(decode_pool_state(&data)?)
    }

    pub fn get_update(&self) -> Result<UpdateMap, FeedError> {
        let pool_state = self.get_pool_state()?;
        let price = calculate_price(&pool_state);

        let mut updates = UpdateMap::new();
        updates.insert(
            self.value_id.clone(),
            PriceUpdate::new(self.value_id.clone(), RAYDIUM_CLMM_DATA_SOURCE_ID, price),
        );
        Ok(updates)
    }

    /// Runs until the receiving side of `updates` is dropped.
    pub async fn run(self, updates: mpsc::Sender<UpdateMap>) {
        info!(
            "Polling Raydium CLMM pool {} every {:?}",
            self.pool_address, self.update_frequency
        );

        let frequency = self.update_frequency;
        let data_source = Arc::new(self);
        let scheduler = Scheduler::new(
            frequency,
            move || data_source.get_update(),
            error_log_handler(RAYDIUM_CLMM_DATA_SOURCE_ID, Level::Warn),
        );
        scheduler.run(updates).await;
    }
}
