//! Core data types for the hydration event store
//!
//! This module defines the fundamental types used throughout the storage layer:
//! - `DrinkEvent`: A persisted row of the drink log
//! - `NewDrink`: What the bottle sends for one drink
//! - `DrinkRecord`: The projection served to the dashboard
//!
//! Field names on the wire follow the bottle firmware (`amountDrank`,
//! `rtcTime`, `drinkNumber`).
//!
//! Numeric fields of an incoming drink are read leniently: anything that
//! converts to the expected type without loss is accepted, so `"8.5"` is an
//! amount and `3.0` or `"3"` is a drink number. `2.5` is not a drink number.

use serde::{de, Deserialize, Deserializer, Serialize};

/// A single drink as reported by the bottle
///
/// `rtc_time` and `drink_number` come from the device and are never
/// interpreted by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewDrink {
    /// Volume drunk, in fluid ounces
    #[serde(deserialize_with = "lenient_f64")]
    pub amount_drank: f64,
    /// Timestamp from the device's real-time clock
    pub rtc_time: String,
    /// Device-assigned sequence number
    #[serde(deserialize_with = "lenient_i64")]
    pub drink_number: i64,
}

/// A JSON scalar that may carry a number
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberLike::deserialize(deserializer)
        .map_err(|_| de::Error::custom("expected a number"))?
    {
        NumberLike::Int(i) => Ok(i as f64),
        NumberLike::Float(f) => Ok(f),
        NumberLike::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("'{}' is not a number", s))),
    }
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match NumberLike::deserialize(deserializer)
        .map_err(|_| de::Error::custom("expected an integer"))?
    {
        NumberLike::Int(i) => Ok(i),
        NumberLike::Float(f) => integral(f)
            .ok_or_else(|| de::Error::custom(format!("{} is not an integer", f))),
        NumberLike::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("'{}' is not an integer", s))),
    }
}

/// `f` as an i64 when it has no fractional part and fits
fn integral(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; i64::MAX is not
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.is_finite() && f.fract() == 0.0 && f >= -LIMIT && f < LIMIT).then(|| f as i64)
}

impl NewDrink {
    pub fn new(amount_drank: f64, rtc_time: impl Into<String>, drink_number: i64) -> Self {
        Self {
            amount_drank,
            rtc_time: rtc_time.into(),
            drink_number,
        }
    }
}

/// A drink event as stored in the log
///
/// Rows are immutable once written; `id` is assigned by SQLite and
/// strictly increases with insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrinkEvent {
    pub id: i64,
    pub amount_drank: f64,
    pub rtc_time: String,
    /// ISO-8601 receipt time assigned by the server
    pub server_timestamp: String,
    pub drink_number: i64,
}

impl DrinkEvent {
    /// Project this event into the shape served by `/api/drinks`
    pub fn to_record(&self) -> DrinkRecord {
        DrinkRecord {
            amount: self.amount_drank,
            timestamp: self.server_timestamp.clone(),
            drink_number: self.drink_number,
        }
    }
}

/// One entry of the drink listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrinkRecord {
    pub amount: f64,
    /// The server timestamp, never the device RTC time
    pub timestamp: String,
    #[serde(rename = "drinkNumber")]
    pub drink_number: i64,
}
