use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 由 geo-IP 服務取得的大略座標；其他欄位 (city, country...) 一律丟棄
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One predicted ISS pass, kept as the raw element of the upstream `response`
/// array. Elements are not validated, so the accessors return `None` when a
/// field is missing or not an integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlyOver(serde_json::Value);

impl FlyOver {
    pub fn new(risetime: i64, duration: i64) -> Self {
        Self(serde_json::json!({
            "risetime": risetime,
            "duration": duration,
        }))
    }

    pub fn from_value(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Epoch seconds.
    pub fn risetime(&self) -> Option<i64> {
        self.0.get("risetime").and_then(|v| v.as_i64())
    }

    /// Seconds.
    pub fn duration(&self) -> Option<i64> {
        self.0.get("duration").and_then(|v| v.as_i64())
    }

    pub fn rise_at(&self) -> Option<DateTime<Utc>> {
        self.risetime()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}
