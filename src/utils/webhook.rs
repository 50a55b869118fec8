use anyhow::Result;
use log::warn;
use reqwest::Client;

use crate::models::update::PriceUpdate;

/// POSTs `update` as JSON to a downstream consumer.
pub async fn send_update(client: &Client, url: &str, update: &PriceUpdate) -> Result<()> {
    let response = client.post(url).json(update).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        warn!(
            "Webhook rejected update for {}: {} {}",
            update.value_id, status, body
        );
    }

    Ok(())
}
