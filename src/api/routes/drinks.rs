//! Drink Routes
//!
//! Endpoints used by the bottle and the dashboard.
//!
//! - POST /log_drink - Record one drink
//! - GET /api/drinks - All drinks, oldest first

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::api::dto::LogDrinkResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::{DrinkRecord, NewDrink};

/// POST /log_drink
///
/// Record a single drink reported by the bottle. Identical payloads are
/// recorded twice; there is no idempotency key.
pub async fn log_drink(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewDrink>, JsonRejection>,
) -> ApiResult<Json<LogDrinkResponse>> {
    let Json(drink) = payload?;

    validate_drink(&drink)?;

    let event = state.store.append(&drink)?;

    tracing::info!(
        id = event.id,
        amount_drank = event.amount_drank,
        rtc_time = %event.rtc_time,
        drink_number = event.drink_number,
        server_timestamp = %event.server_timestamp,
        "Drink logged"
    );

    Ok(Json(LogDrinkResponse::logged(drink)))
}

/// GET /api/drinks
///
/// Every logged drink as `{amount, timestamp, drinkNumber}`, in the order
/// it was received. An empty log yields `[]`.
pub async fn list_drinks(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<DrinkRecord>>> {
    let records = state.store.list_all()?;
    tracing::debug!(count = records.len(), "Listed drinks");
    Ok(Json(records))
}

/// Validate an ingested drink
///
/// Type errors are already rejected by deserialization; this covers the
/// value checks.
fn validate_drink(drink: &NewDrink) -> ApiResult<()> {
    if drink.rtc_time.is_empty() {
        return Err(ApiError::Validation("rtcTime cannot be empty".to_string()));
    }

    if !drink.amount_drank.is_finite() {
        return Err(ApiError::Validation(
            "amountDrank must be a finite number".to_string(),
        ));
    }

    if drink.amount_drank < 0.0 {
        return Err(ApiError::Validation(
            "amountDrank cannot be negative".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_drink_valid() {
        assert!(validate_drink(&NewDrink::new(8.5, "12:01:00", 1)).is_ok());
    }

    #[test]
    fn test_validate_drink_zero_amount() {
        assert!(validate_drink(&NewDrink::new(0.0, "12:01:00", 1)).is_ok());
    }

    #[test]
    fn test_validate_drink_negative_amount() {
        assert!(validate_drink(&NewDrink::new(-1.0, "12:01:00", 1)).is_err());
    }

    #[test]
    fn test_validate_drink_infinite_amount() {
        assert!(validate_drink(&NewDrink::new(f64::INFINITY, "12:01:00", 1)).is_err());
    }

    #[test]
    fn test_validate_drink_empty_rtc_time() {
        assert!(validate_drink(&NewDrink::new(8.5, "", 1)).is_err());
    }

    #[test]
    fn test_validate_drink_whitespace_rtc_time() {
        assert!(validate_drink(&NewDrink::new(8.5, "   ", 1)).is_ok());
    }

    #[test]
    fn test_validate_drink_rtc_time_is_opaque() {
        assert!(validate_drink(&NewDrink::new(8.5, "not a time at all", 1)).is_ok());
    }

    #[test]
    fn test_validate_drink_number_unbounded() {
        assert!(validate_drink(&NewDrink::new(8.5, "t", -3)).is_ok());
        assert!(validate_drink(&NewDrink::new(8.5, "t", i64::MAX)).is_ok());
    }
}
