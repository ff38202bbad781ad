use crate::infra::AppState;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use homehub::error::AppError;
use homehub::portfolio::{
    DashboardSummary, Lease, LeaseId, LeaseList, LeaseQueryParams, LeaseRow, RecordQuery, Tenant,
    TenantId, TenantList, TenantQueryParams, TenantRow,
};
use serde_json::json;
use std::sync::atomic::Ordering;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/tenants", get(tenants_endpoint))
        .route("/api/v1/tenants/:id", get(tenant_endpoint))
        .route("/api/v1/leases", get(leases_endpoint))
        .route("/api/v1/leases/:id", get(lease_endpoint))
        .route("/api/v1/dashboard", get(dashboard_endpoint))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn query_params<T>(extracted: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    extracted
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn record_id(extracted: Result<Path<u32>, PathRejection>) -> Result<u32, AppError> {
    extracted
        .map(|Path(id)| id)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

pub(crate) async fn tenants_endpoint(
    State(state): State<AppState>,
    params: Result<Query<TenantQueryParams>, QueryRejection>,
) -> Result<Json<TenantList>, AppError> {
    let query = RecordQuery::<Tenant>::try_from(query_params(params)?)?;
    Ok(Json(TenantList::evaluate(&query, state.portfolio.tenants())))
}

pub(crate) async fn tenant_endpoint(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<TenantRow>, AppError> {
    let id = TenantId(record_id(id)?);
    state
        .portfolio
        .tenant(id)
        .map(|tenant| Json(TenantRow::from(tenant)))
        .ok_or_else(|| AppError::NotFound(format!("tenant {id}")))
}

pub(crate) async fn leases_endpoint(
    State(state): State<AppState>,
    params: Result<Query<LeaseQueryParams>, QueryRejection>,
) -> Result<Json<LeaseList>, AppError> {
    let query = RecordQuery::<Lease>::try_from(query_params(params)?)?;
    Ok(Json(LeaseList::evaluate(&query, state.portfolio.leases())))
}

pub(crate) async fn lease_endpoint(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<LeaseRow>, AppError> {
    let id = LeaseId(record_id(id)?);
    state
        .portfolio
        .lease(id)
        .map(|lease| Json(LeaseRow::from(lease)))
        .ok_or_else(|| AppError::NotFound(format!("lease {id}")))
}

pub(crate) async fn dashboard_endpoint(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(DashboardSummary::from_portfolio(&state.portfolio))
}
