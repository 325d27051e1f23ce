//! Dashboard Routes
//!
//! The dashboard is a fixed page plus a script; neither is templated.
//! All totals and the chart are computed in the browser from
//! `/api/drinks`.
//!
//! - GET /dashboard - HTML page
//! - GET /static/dashboard.js - Polling and chart script

use axum::{http::header, response::Html, response::IntoResponse};

/// Dashboard page, embedded at compile time
pub const DASHBOARD_HTML: &str = include_str!("../../../static/dashboard.html");

/// Dashboard script, embedded at compile time
pub const DASHBOARD_JS: &str = include_str!("../../../static/dashboard.js");

/// GET /dashboard
pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// GET /static/dashboard.js
pub async fn dashboard_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        DASHBOARD_JS,
    )
}
