use super::state::{AppState, BulkAction, SelectReply, SelectRequest};
use crate::fetch::{ExportFormat, FetchError};
use crate::style;
use crate::view::ScanFilter;
use crate::viz::ChartKind;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[derive(Debug, Deserialize)]
struct ListQuery {
    filter: Option<ScanFilter>,
}

#[derive(Debug, Deserialize)]
struct IdQuery {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ExportQuery {
    format: ExportFormat,
}

#[derive(Debug, Deserialize)]
struct ChartQuery {
    scan: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DiscoveryQuery {
    id: String,
    #[serde(rename = "eventType")]
    event_type: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/scans", get(scans_handler))
        .route("/stopscan", get(stop_handler))
        .route("/scandelete", get(delete_handler))
        .route("/select", post(select_handler))
        .route("/selected/stop", post(bulk_stop_handler))
        .route("/selected/delete", post(bulk_delete_handler))
        .route("/selected/rerun", get(rerun_handler))
        .route("/selected/export", get(export_handler))
        .route("/viz/discovery", get(discovery_handler))
        .route("/viz/{kind}", get(chart_page_handler).post(chart_handler))
        .route("/theme", post(theme_handler))
        .layer(cors)
        .with_state(state)
}

/// Start the dashboard server
pub async fn serve(
    state: AppState,
    port: u16,
    open_browser: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Dashboard using backend {}", state.config.backend.url);
    let app = router(Arc::new(state));

    let addr = format!("127.0.0.1:{}", port);
    let url = format!("http://{}", addr);

    style::header("Starting reconview dashboard...");
    style::status(&format!("Open in browser: {}", style::url(&url)));
    style::hint("Press Ctrl+C to stop");

    if open_browser {
        if let Err(e) = open::that(&url) {
            style::warning(&format!("Could not open browser: {}", e));
        }
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Backend-style acknowledgement: `["SUCCESS", ""]` or `["ERROR", msg]`.
fn ack(result: Result<(), FetchError>) -> Response {
    match result {
        Ok(()) => Json(json!(["SUCCESS", ""])).into_response(),
        Err(e) => (StatusCode::BAD_GATEWAY, Json(json!(["ERROR", e.to_string()]))).into_response(),
    }
}

async fn index_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    Html(state.scan_list_page(query.filter).await)
}

async fn scans_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.scans().await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => (StatusCode::BAD_GATEWAY, Json(json!(["ERROR", e.to_string()]))).into_response(),
    }
}

async fn stop_handler(State(state): State<Arc<AppState>>, Query(query): Query<IdQuery>) -> Response {
    ack(state.stop(&query.id).await)
}

async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Response {
    ack(state.delete(&query.id).await)
}

async fn select_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectRequest>,
) -> Json<SelectReply> {
    Json(state.select(&request))
}

async fn bulk_stop_handler(State(state): State<Arc<AppState>>) -> Response {
    ack(state.bulk(BulkAction::Stop).await.map(|_| ()))
}

async fn bulk_delete_handler(State(state): State<Arc<AppState>>) -> Response {
    ack(state.bulk(BulkAction::Delete).await.map(|_| ()))
}

async fn rerun_handler(State(state): State<Arc<AppState>>) -> Redirect {
    match state.rerun_url() {
        Some(url) => Redirect::to(&url),
        None => Redirect::to("/"),
    }
}

async fn export_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Response {
    match state.export(query.format).await {
        Some(Ok((name, bytes))) => (
            [
                (header::CONTENT_TYPE, "application/octet-stream".to_string()),
                (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", name)),
            ],
            bytes,
        )
            .into_response(),
        // The failure is queued as a notice for the scan list.
        Some(Err(_)) | None => Redirect::to("/").into_response(),
    }
}

async fn chart_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(query): Query<ChartQuery>,
    body: String,
) -> Response {
    let Some(kind) = ChartKind::parse(&kind) else {
        return (StatusCode::NOT_FOUND, format!("unknown chart type: {}", kind)).into_response();
    };
    // Layout is CPU-bound and grows with the posted data.
    let rendered = tokio::task::spawn_blocking(move || {
        state.render_chart(kind, &body, query.scan.as_deref())
    })
    .await;
    match rendered {
        Ok(Ok(svg)) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        Ok(Err(e)) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("chart rendering failed: {}", e))
            .into_response(),
    }
}

async fn chart_page_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Response {
    match ChartKind::parse(&kind).and_then(|kind| state.chart_page(kind)) {
        Some(html) => Html(html).into_response(),
        None => (StatusCode::NOT_FOUND, format!("no {} chart rendered yet", kind)).into_response(),
    }
}

async fn discovery_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DiscoveryQuery>,
) -> impl IntoResponse {
    Html(state.discovery_page(&query.id, &query.event_type).await)
}

async fn theme_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.toggle_theme() {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
