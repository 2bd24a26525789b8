use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use kabuview_core::{DateRange, HistoryService, Ticker};

use crate::error::ApiError;

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Clone)]
pub struct AppState {
    pub service: HistoryService,
}

/// One query per user action: ticker text plus the two date pickers.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub ticker: String,
    pub start: String,
    pub end: String,
}

impl DashboardQuery {
    fn parse(&self) -> Result<(Ticker, DateRange), ApiError> {
        let ticker = Ticker::parse(&self.ticker)?;
        let range = DateRange::parse(&self.start, &self.end)?;
        Ok((ticker, range))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/dashboard", get(dashboard))
        .route("/api/export.csv", get(export_csv))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, ApiError> {
    let (ticker, range) = query.parse()?;
    info!(ticker = %ticker, "dashboard request");

    let dashboard = state.service.dashboard(&ticker, &range).await?;
    Ok(Json(dashboard).into_response())
}

async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, ApiError> {
    let (ticker, range) = query.parse()?;
    info!(ticker = %ticker, "csv export request");

    let export = state.service.export_csv(&ticker, &range).await?;
    let disposition = format!("attachment; filename=\"{}\"", export.filename);

    Ok((
        [
            (header::CONTENT_TYPE, String::from("text/csv; charset=utf-8")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.bytes,
    )
        .into_response())
}
