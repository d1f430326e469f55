use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::access::{AccessGuard, BulkEntry, Caller, GuardedRecommendation, LookupStatus};
use crate::catalog::{CatalogStore, InterventionTemplate, SchemeDefinition};
use crate::config::Config;
use crate::engine::RecommendationEngine;
use crate::error::{CatalogKind, EngineError};
use crate::records::{ClaimRecord, RecordFilter};
use crate::summary::ClaimSummary;

#[derive(Clone)]
pub struct ApiState {
    config: Arc<Config>,
    store: Arc<CatalogStore>,
    engine: Arc<RecommendationEngine>,
}

impl ApiState {
    pub fn new(config: Config, store: CatalogStore, engine: RecommendationEngine) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            engine: Arc::new(engine),
        }
    }

    fn guard(&self) -> AccessGuard<'_> {
        AccessGuard::new(&self.store, &self.engine)
    }
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        if err.is_operator_fault() {
            error!(error = %err, "recommendation engine misconfigured");
            return Self::internal("recommendation service is misconfigured");
        }
        let status = match err {
            EngineError::UnauthorizedRole(_) => {
                warn!(error = %err, "rejected request");
                StatusCode::FORBIDDEN
            }
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordsRequest {
    #[serde(flatten)]
    caller: Caller,
    #[serde(default)]
    filter: RecordFilter,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendRequest {
    #[serde(flatten)]
    caller: Caller,
    record_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SummaryRequest {
    #[serde(flatten)]
    caller: Caller,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    catalog_fingerprint: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordsResponse {
    status: LookupStatus,
    records: Vec<ClaimRecord>,
}

#[derive(Debug, Serialize)]
struct BulkResponse {
    entries: Vec<BulkEntry>,
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/config", get(show_config))
        .route("/v1/catalog/schemes", get(catalog_schemes))
        .route("/v1/catalog/interventions", get(catalog_interventions))
        .route("/v1/records", post(records))
        .route("/v1/recommend", post(recommend))
        .route("/v1/recommend/bulk", post(recommend_bulk))
        .route("/v1/summary", post(summary))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server(
    config: Config,
    store: CatalogStore,
    engine: RecommendationEngine,
    bind: SocketAddr,
) -> Result<()> {
    let app = build_router(ApiState::new(config, store, engine));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<ApiState>) -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "ok",
        catalog_fingerprint: state.store.fingerprint(),
    })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config.as_ref().clone())
}

async fn catalog_schemes(State(state): State<ApiState>) -> ApiResult<Vec<SchemeDefinition>> {
    let schemes = state
        .store
        .schemes()
        .ok_or(EngineError::MissingCatalog(CatalogKind::Schemes))?;
    Ok(ok(schemes.to_vec()))
}

async fn catalog_interventions(
    State(state): State<ApiState>,
) -> ApiResult<Vec<InterventionTemplate>> {
    let interventions = state
        .store
        .interventions()
        .ok_or(EngineError::MissingCatalog(CatalogKind::Interventions))?;
    Ok(ok(interventions.to_vec()))
}

async fn records(
    State(state): State<ApiState>,
    Json(request): Json<RecordsRequest>,
) -> ApiResult<RecordsResponse> {
    let view = state.guard().view(&request.caller)?;
    let records = request
        .filter
        .apply(view.records())
        .into_iter()
        .cloned()
        .collect();
    Ok(ok(RecordsResponse {
        status: view.status(),
        records,
    }))
}

async fn recommend(
    State(state): State<ApiState>,
    Json(request): Json<RecommendRequest>,
) -> ApiResult<GuardedRecommendation> {
    let outcome = state
        .guard()
        .recommend(&request.caller, request.record_id.as_deref())?;
    Ok(ok(outcome))
}

async fn recommend_bulk(
    State(state): State<ApiState>,
    Json(request): Json<RecordsRequest>,
) -> ApiResult<BulkResponse> {
    let entries = state
        .guard()
        .recommend_bulk(&request.caller, &request.filter)?;
    Ok(ok(BulkResponse { entries }))
}

async fn summary(
    State(state): State<ApiState>,
    Json(request): Json<SummaryRequest>,
) -> ApiResult<ClaimSummary> {
    Ok(ok(state.guard().summary(&request.caller)?))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::defaults::builtin_interventions;
    use crate::regions::RegionProfile;

    fn state() -> ApiState {
        let config = Config::default();
        let store = CatalogStore::builtin().unwrap();
        let engine = RecommendationEngine::standard(RegionProfile::from_config(&config.regions));
        ApiState::new(config, store, engine)
    }

    async fn call(state: ApiState, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_fingerprint() {
        let (status, body) = call(state(), Method::GET, "/health", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["data"]["catalogFingerprint"].as_str().unwrap().len(), 64);
    }

    #[tokio::test]
    async fn admin_recommendation_ranks_schemes() {
        let (status, body) = call(
            state(),
            Method::POST,
            "/v1/recommend",
            json!({ "role": "admin", "recordId": "FRA-OD-001" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "evaluated");
        assert_eq!(body["data"]["schemes"][0]["scheme"]["id"], "SCH002");
        assert_eq!(body["data"]["schemes"][0]["matchScore"], 98);
    }

    #[tokio::test]
    async fn beneficiary_without_claim_gets_marker() {
        let (status, body) = call(
            state(),
            Method::POST,
            "/v1/recommend",
            json!({ "role": "beneficiary", "ownerRecordId": "FRA-XX-999" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "no_record_found");
        assert_eq!(body["data"]["schemes"], json!([]));
    }

    #[tokio::test]
    async fn unknown_role_is_forbidden() {
        let (status, body) = call(
            state(),
            Method::POST,
            "/v1/records",
            json!({ "role": "surveyor" }),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn unknown_record_is_bad_request() {
        let (status, _) = call(
            state(),
            Method::POST,
            "/v1/recommend",
            json!({ "role": "admin", "recordId": "missing" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_catalog_is_internal_and_generic() {
        let config = Config::default();
        let store = CatalogStore::new(
            CatalogStore::builtin().unwrap().records().to_vec(),
            None,
            Some(builtin_interventions()),
        )
        .unwrap();
        let engine = RecommendationEngine::standard(RegionProfile::from_config(&config.regions));
        let (status, body) = call(
            ApiState::new(config, store, engine),
            Method::POST,
            "/v1/recommend",
            json!({ "role": "admin", "recordId": "FRA-OD-001" }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "recommendation service is misconfigured");
    }

    #[tokio::test]
    async fn records_respect_filter_and_view() {
        let (_, body) = call(
            state(),
            Method::POST,
            "/v1/records",
            json!({ "role": "admin", "filter": { "state": "Odisha" } }),
        )
        .await;
        assert_eq!(body["data"]["records"].as_array().unwrap().len(), 2);

        let (_, body) = call(
            state(),
            Method::POST,
            "/v1/records",
            json!({ "role": "user", "ownerRecordId": "FRA-MH-001" }),
        )
        .await;
        let records = body["data"]["records"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], "FRA-MH-001");
    }

    #[tokio::test]
    async fn bulk_and_summary_cover_the_admin_view() {
        let (_, body) = call(
            state(),
            Method::POST,
            "/v1/recommend/bulk",
            json!({ "role": "admin" }),
        )
        .await;
        assert_eq!(body["data"]["entries"].as_array().unwrap().len(), 6);

        let (_, body) = call(state(), Method::POST, "/v1/summary", json!({ "role": "admin" })).await;
        assert_eq!(body["data"]["totalClaims"], 6);
    }

    #[tokio::test]
    async fn beneficiary_listing_reports_missing_record() {
        let (_, body) = call(
            state(),
            Method::POST,
            "/v1/records",
            json!({ "role": "beneficiary", "ownerRecordId": "NOPE" }),
        )
        .await;
        assert_eq!(body["data"]["status"], "no_record_found");
        assert_eq!(body["data"]["records"], json!([]));

        let (_, body) = call(
            state(),
            Method::POST,
            "/v1/records",
            json!({
                "role": "beneficiary",
                "ownerRecordId": "FRA-OD-001",
                "filter": { "state": "Nowhere" }
            }),
        )
        .await;
        assert_eq!(body["data"]["status"], "evaluated");
        assert_eq!(body["data"]["records"], json!([]));
    }

    #[tokio::test]
    async fn bulk_is_forbidden_for_beneficiaries() {
        let (status, body) = call(
            state(),
            Method::POST,
            "/v1/recommend/bulk",
            json!({ "role": "beneficiary", "ownerRecordId": "FRA-OD-001" }),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn responses_use_camel_case_keys() {
        let (_, body) = call(
            state(),
            Method::POST,
            "/v1/recommend/bulk",
            json!({ "role": "admin", "filter": { "claimStatus": "Pending" } }),
        )
        .await;
        let entries = body["data"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].get("recordId").is_some());
        assert!(entries[0].get("record_id").is_none());

        let (_, body) = call(
            state(),
            Method::POST,
            "/v1/recommend",
            json!({ "role": "user", "ownerRecordId": "FRA-TR-001" }),
        )
        .await;
        assert_eq!(body["data"]["recordId"], "FRA-TR-001");
    }
}
