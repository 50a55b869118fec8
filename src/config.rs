//! Data source configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::FeedError;
use crate::models::update::ValueId;

pub const DEFAULT_UPDATE_FREQUENCY: &str = "5s";
pub const DEFAULT_VALUE_ID: &str = "RAYDIUM_CLMM_PRICE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Identifier the computed price is published under
    pub id: ValueId,

    /// Polling interval in Go duration syntax, e.g. "500ms", "5s", "1m30s"
    pub update_frequency: String,

    /// Solana JSON-RPC endpoint
    pub http_provider_url: String,

    /// Base-58 address of the CLMM pool account
    pub contract_address: String,
}

impl SourceConfig {
    pub fn pool_address(&self) -> Result<Pubkey, FeedError> {
        Pubkey::from_str(&self.contract_address).map_err(|e| FeedError::InvalidAddress {
            address: self.contract_address.clone(),
            reason: e.to_string(),
        })
    }

    pub fn update_interval(&self) -> Result<Duration, FeedError> {
        let interval = parse_duration(&self.update_frequency)?;
        if interval.is_zero() {
            return Err(FeedError::InvalidUpdateFrequency(
                self.update_frequency.clone(),
            ));
        }
        Ok(interval)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub source: SourceConfig,

    /// Downstream endpoint that receives every update as JSON
    pub webhook_url: Option<String>,
}

impl Config {
    /// Reads `CLMM_FEED_CONFIG` if set, otherwise falls back to plain environment variables.
    pub fn load() -> Result<Self> {
        match env::var("CLMM_FEED_CONFIG") {
            Ok(path) => Self::load_file(&path),
            Err(_) => Self::from_env(),
        }
    }

    pub fn load_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse config JSON")
    }

    pub fn from_env() -> Result<Self> {
        let source = SourceConfig {
            id: env::var("VALUE_ID").unwrap_or_else(|_| DEFAULT_VALUE_ID.to_string()),
            update_frequency: env::var("UPDATE_FREQUENCY")
                .unwrap_or_else(|_| DEFAULT_UPDATE_FREQUENCY.to_string()),
            http_provider_url: env::var("SOLANA_RPC_URL").context("SOLANA_RPC_URL must be set")?,
            contract_address: env::var("CLMM_POOL_ADDRESS")
                .context("CLMM_POOL_ADDRESS must be set")?,
        };

        Ok(Self {
            source,
            webhook_url: env::var("UPDATE_WEBHOOK_URL").ok(),
        })
    }
}

/// Parses a Go-style duration string: a sequence of decimal numbers, each with a
/// unit suffix (`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`). A bare `"0"` is allowed.
pub fn parse_duration(input: &str) -> Result<Duration, FeedError> {
    let invalid = || FeedError::InvalidUpdateFrequency(input.to_string());

    let s = input.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() || s.starts_with('-') {
        return Err(invalid());
    }

    let mut nanos = 0f64;
    let mut rest = s;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        let (number, tail) = rest.split_at(number_end);
        if number.is_empty() || number == "." {
            return Err(invalid());
        }
        let value: f64 = number.parse().map_err(|_| invalid())?;

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        let scale = match unit {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3_600e9,
            _ => return Err(invalid()),
        };

        nanos += value * scale;
        rest = tail;
    }

    if !nanos.is_finite() || nanos > u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(Duration::from_nanos(nanos.round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(frequency: &str, address: &str) -> SourceConfig {
        SourceConfig {
            id: "SOLUSDC".to_string(),
            update_frequency: frequency.to_string(),
            http_provider_url: "https://api.mainnet-beta.solana.com".to_string(),
            contract_address: address.to_string(),
        }
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5_400));
        assert_eq!(parse_duration("250us").unwrap(), Duration::from_micros(250));
        assert_eq!(parse_duration("10ns").unwrap(), Duration::from_nanos(10));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_duration_rejects_malformed() {
        for bad in ["", "5", "s", "-5s", "5x", "1..5s", ".s", "5 s"] {
            assert!(parse_duration(bad).is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_zero_update_interval_rejected() {
        let config = source("0s", "So11111111111111111111111111111111111111112");
        assert!(matches!(
            config.update_interval(),
            Err(FeedError::InvalidUpdateFrequency(_))
        ));
    }

    #[test]
    fn test_pool_address() {
        let config = source("5s", "So11111111111111111111111111111111111111112");
        assert_eq!(
            config.pool_address().unwrap().to_string(),
            "So11111111111111111111111111111111111111112"
        );

        let config = source("5s", "not-a-pubkey");
        assert!(matches!(
            config.pool_address(),
            Err(FeedError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_config_from_json() {
        let config = Config::from_json(
            r#"{
                "source": {
                    "id": "SOLUSDC",
                    "update_frequency": "2s",
                    "http_provider_url": "http://localhost:8899",
                    "contract_address": "So11111111111111111111111111111111111111112"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.source.update_interval().unwrap(), Duration::from_secs(2));
        assert_eq!(config.webhook_url, None);
    }
}
