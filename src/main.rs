use anyhow::{Context, Result};
use colored::*;
use dotenv::dotenv;
use std::sync::Arc;
use tokio::sync::mpsc;

use raydium_clmm_feed::config::Config;
use raydium_clmm_feed::dex::raydium_clmm::{ClmmDataSource, RpcAccountSource};
use raydium_clmm_feed::utils::webhook;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    colored::control::set_override(true);

    let config = Config::load().context("Failed to load configuration")?;

    // Invalid addresses and frequencies are fatal here, before any fetch.
    let source = Arc::new(RpcAccountSource::new(
        config.source.http_provider_url.clone(),
    ));
    let data_source = ClmmDataSource::new(&config.source, source)?;

    println!(
        "{} Starting Raydium CLMM price feed for pool {}",
        "[INFO]".bright_green(),
        data_source.pool_address()
    );
    println!(
        "{} Publishing {} every {:?}",
        "[INFO]".bright_green(),
        config.source.id,
        data_source.update_frequency()
    );

    let (tx, mut rx) = mpsc::channel(16);
    let feed = tokio::spawn(data_source.run(tx));

    let http_client = reqwest::Client::new();
    while let Some(updates) = rx.recv().await {
        for update in updates.values() {
            println!(
                "{} {} {} = {:.9} ({})",
                "[UPDATE]".bright_cyan(),
                update.time.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                update.value_id,
                update.value,
                update.data_source_id
            );

            if let Some(url) = &config.webhook_url {
                if let Err(e) = webhook::send_update(&http_client, url, update).await {
                    println!(
                        "{} Failed to deliver update: {}",
                        "[ERROR]".bright_red(),
                        e
                    );
                }
            }
        }
    }

    feed.await.context("price feed task panicked")?;
    Ok(())
}
