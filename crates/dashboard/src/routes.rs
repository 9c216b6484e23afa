//! Dashboard HTTP routes and handlers.

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Query;
use moves_core::{MarketFilter, ALL_MARKETS};
use moves_presentation::{classify_daily, filter_markets, market_names, Figure};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::DashboardError;
use crate::page::render_page;
use crate::state::AppState;

// ── Query params ─────────────────────────────────────────────────────────

/// `?market=A&market=B`; no parameter selects every market, an empty
/// value (`?market=`) selects none.
#[derive(Debug, Deserialize)]
pub struct FigureQuery {
    #[serde(default)]
    market: Vec<String>,
}

impl FigureQuery {
    fn filter(self) -> MarketFilter {
        if self.market.is_empty() {
            return MarketFilter::All;
        }
        MarketFilter::from_selection(self.market.into_iter().filter(|m| !m.is_empty()))
    }
}

// ── Route definitions ────────────────────────────────────────────────────

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/markets", get(api_markets))
        .route("/api/figure", get(api_figure))
        .route("/health", get(health))
        .with_state(state)
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn index(State(state): State<AppState>) -> Result<Html<String>, DashboardError> {
    let rows = state.source.load()?;
    Ok(Html(render_page(&market_names(&rows), &state.style)?))
}

async fn api_markets(State(state): State<AppState>) -> Result<Json<Vec<String>>, DashboardError> {
    let rows = state.source.load()?;
    let mut markets = vec![ALL_MARKETS.to_string()];
    markets.extend(market_names(&rows));
    Ok(Json(markets))
}

async fn api_figure(
    State(state): State<AppState>,
    Query(params): Query<FigureQuery>,
) -> Result<Json<Figure>, DashboardError> {
    let filter = params.filter();
    let rows = state.source.load()?;
    let counts = classify_daily(filter_markets(&rows, &filter), &state.thresholds);
    debug!(?filter, rows = rows.len(), days = counts.len(), "Recomputed movement counts");

    Ok(Json(Figure::movement_counts(&counts, &state.thresholds, &state.style)))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{CsvSummarySource, SummarySource};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use moves_core::{DailySummary, Result, Thresholds};
    use moves_presentation::ChartStyle;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    struct MemorySource(Mutex<Vec<DailySummary>>);

    impl SummarySource for MemorySource {
        fn load(&self) -> Result<Vec<DailySummary>> {
            Ok(self.0.lock().unwrap().clone())
        }
    }

    fn row(market: &str, day: u32, pct_max: Option<f64>) -> DailySummary {
        DailySummary {
            date: NaiveDate::from_ymd_opt(2018, 1, day).unwrap(),
            price_w_mean: 100.0,
            market: market.to_string(),
            price_maximum: 100.0,
            pct_avg_price_change: pct_max,
            pct_max_price_change: pct_max,
        }
    }

    fn rows() -> Vec<DailySummary> {
        vec![
            row("AAA", 1, None),
            row("AAA", 2, Some(0.04)),
            row("BBB", 1, None),
            row("BBB", 2, Some(-0.04)),
        ]
    }

    fn state_with(source: Arc<dyn SummarySource>) -> AppState {
        AppState::new(source, Thresholds::default(), ChartStyle::default())
    }

    async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
        let response = router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// (downs, stills, ups) of the second date.
    fn second_day(figure: &Value) -> (u64, u64, u64) {
        let y = |i: usize| figure["data"][i]["y"][1].as_u64().unwrap();
        (y(0), y(1), y(2))
    }

    #[tokio::test]
    async fn test_figure_all_markets_by_default() {
        let state = state_with(Arc::new(MemorySource(Mutex::new(rows()))));
        let (status, figure) = get_json(state, "/api/figure").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(figure["data"][0]["x"][1], "2018-01-02");
        assert_eq!(second_day(&figure), (1, 0, 1));
    }

    #[tokio::test]
    async fn test_figure_sentinel_selection() {
        let state = state_with(Arc::new(MemorySource(Mutex::new(rows()))));
        let (_, figure) = get_json(state, "/api/figure?market=AAA&market=ALL%20MARKETS").await;
        assert_eq!(second_day(&figure), (1, 0, 1));
    }

    #[tokio::test]
    async fn test_figure_single_market() {
        let state = state_with(Arc::new(MemorySource(Mutex::new(rows()))));
        let (_, figure) = get_json(state.clone(), "/api/figure?market=AAA").await;
        assert_eq!(second_day(&figure), (0, 0, 1));

        let (_, figure) = get_json(state, "/api/figure?market=BBB").await;
        assert_eq!(second_day(&figure), (1, 0, 0));
    }

    #[tokio::test]
    async fn test_figure_empty_selection() {
        let state = state_with(Arc::new(MemorySource(Mutex::new(rows()))));
        let (status, figure) = get_json(state, "/api/figure?market=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(figure["data"][0]["x"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_figure_reflects_reloaded_data() {
        let source = Arc::new(MemorySource(Mutex::new(rows())));
        let state = state_with(source.clone());

        source.0.lock().unwrap().push(row("CCC", 2, Some(0.0)));
        let (_, figure) = get_json(state, "/api/figure").await;
        assert_eq!(second_day(&figure), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_markets_list() {
        let state = state_with(Arc::new(MemorySource(Mutex::new(rows()))));
        let (status, markets) = get_json(state, "/api/markets").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(markets, json!(["ALL MARKETS", "AAA", "BBB"]));
    }

    #[tokio::test]
    async fn test_missing_summary_file_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = CsvSummarySource::new(dir.path().join("df.csv"));
        let (status, body) = get_json(state_with(Arc::new(source)), "/api/figure").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("aggregate"));
    }

    #[tokio::test]
    async fn test_index_page() {
        let state = state_with(Arc::new(MemorySource(Mutex::new(rows()))));
        let response = router(state)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains(r#"<option value="AAA">AAA</option>"#));
        assert!(page.contains(r#"<option value="BBB">BBB</option>"#));
    }

    #[tokio::test]
    async fn test_health() {
        let state = state_with(Arc::new(MemorySource(Mutex::new(Vec::new()))));
        let (status, body) = get_json(state, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
