//! Export Routes
//!
//! Full dump of the drink log for backup and analysis.
//!
//! - GET /api/drinks/export - Every stored row as CSV

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Local;
use std::sync::Arc;

use crate::api::dto::ExportParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::DrinkEvent;

const CSV_HEADER: [&str; 5] = ["id", "amountDrank", "rtcTime", "serverTimestamp", "drinkNumber"];

/// GET /api/drinks/export
pub async fn export_drinks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    if !params.format.eq_ignore_ascii_case("csv") {
        return Err(ApiError::Validation(format!(
            "Unsupported export format '{}', expected 'csv'",
            params.format
        )));
    }

    let events = state.store.list_events()?;
    let body = format_csv(&events)?;

    let filename = format!("drinks_export_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));

    tracing::info!(rows = events.len(), filename = %filename, "Exported drink log");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}

/// Render events as CSV; the header row is always present
fn format_csv(events: &[DrinkEvent]) -> ApiResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for event in events {
        writer.serialize(event).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("CSV flush failed: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| ApiError::Internal(format!("CSV is not UTF-8: {}", e)))
}

fn csv_error(e: csv::Error) -> ApiError {
    ApiError::Internal(format!("CSV encoding failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_csv_empty_has_header() {
        let csv = format_csv(&[]).unwrap();
        assert_eq!(csv, "id,amountDrank,rtcTime,serverTimestamp,drinkNumber\n");
    }

    #[test]
    fn test_format_csv_rows() {
        let events = vec![
            DrinkEvent {
                id: 1,
                amount_drank: 8.5,
                rtc_time: "12:01:00".to_string(),
                server_timestamp: "2026-10-19T12:01:02.000000+00:00".to_string(),
                drink_number: 1,
            },
            DrinkEvent {
                id: 2,
                amount_drank: 0.0,
                rtc_time: "12:30, late".to_string(),
                server_timestamp: "2026-10-19T12:30:05.000000+00:00".to_string(),
                drink_number: 2,
            },
        ];

        let csv = format_csv(&events).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1,8.5,12:01:00,2026-10-19T12:01:02.000000+00:00,1");
        // Fields containing commas are quoted
        assert_eq!(lines[2], "2,0.0,\"12:30, late\",2026-10-19T12:30:05.000000+00:00,2");
    }
}
