use chrono::{DateTime, DurationRound, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type ValueId = String;

pub const RAYDIUM_CLMM_DATA_SOURCE_ID: &str = "raydium_clmm";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub value_id: ValueId,
    pub data_source_id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub time: DateTime<Utc>,
    pub value: f64,
}

impl PriceUpdate {
    pub fn new(value_id: ValueId, data_source_id: &str, value: f64) -> Self {
        Self {
            value_id,
            data_source_id: data_source_id.to_string(),
            time: now_millis(),
            value,
        }
    }
}

pub type UpdateMap = HashMap<ValueId, PriceUpdate>;

/// Current UTC time truncated to millisecond resolution.
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(chrono::Duration::milliseconds(1))
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_time_has_millisecond_resolution() {
        let update = PriceUpdate::new("SOLUSDC".to_string(), RAYDIUM_CLMM_DATA_SOURCE_ID, 4.0);
        assert_eq!(update.time.timestamp_subsec_nanos() % 1_000_000, 0);
        assert_eq!(update.data_source_id, "raydium_clmm");
    }

    #[test]
    fn test_update_serializes_time_as_millis() {
        let update = PriceUpdate::new("SOLUSDC".to_string(), RAYDIUM_CLMM_DATA_SOURCE_ID, 4000.0);
        let json = serde_json::to_value(&update).unwrap();

        assert_eq!(json["value_id"], "SOLUSDC");
        assert_eq!(json["value"], 4000.0);
        assert_eq!(json["time"], update.time.timestamp_millis());

        let back: PriceUpdate = serde_json::from_value(json).unwrap();
        assert_eq!(back, update);
    }
}
