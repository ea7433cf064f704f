//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic. Handlers only translate between wire DTOs and
//! domain types.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{ClientDto, ClientPayload, HealthResponse, IncomeQuery};
use super::error::AppError;
use super::state::AppState;
use crate::models::ClientId;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Client CRUD
// =============================================================================

/// GET /clients
///
/// List all clients.
pub async fn list_clients(State(state): State<AppState>) -> HandlerResult<Vec<ClientDto>> {
    let clients = state.service.get_all().await?;
    Ok(Json(clients.into_iter().map(ClientDto::from).collect()))
}

/// GET /clients/{id}
///
/// Fetch a single client by id.
pub async fn get_client_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> HandlerResult<ClientDto> {
    let client = state.service.get_by_id(ClientId::new(id)).await?;
    Ok(Json(client.into()))
}

/// GET /clients/income/?income=
///
/// List clients whose income matches the query value exactly.
pub async fn get_clients_by_income(
    State(state): State<AppState>,
    Query(query): Query<IncomeQuery>,
) -> HandlerResult<Vec<ClientDto>> {
    let clients = state.service.get_by_income(query.income).await?;
    Ok(Json(clients.into_iter().map(ClientDto::from).collect()))
}

/// GET /clients/cpf/{cpf}
///
/// Fetch a single client by CPF.
pub async fn get_client_by_cpf(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
) -> HandlerResult<ClientDto> {
    let client = state.service.get_by_cpf(&cpf).await?;
    Ok(Json(client.into()))
}

/// POST /clients
///
/// Create a new client. Responds 201 with the stored record, or 400 when
/// the CPF is already registered.
pub async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<ClientPayload>,
) -> Result<(StatusCode, Json<ClientDto>), AppError> {
    let client = state.service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(client.into())))
}

/// PUT /clients/{id}
///
/// Overwrite every field of an existing client.
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ClientPayload>,
) -> HandlerResult<ClientDto> {
    let client = state
        .service
        .update(ClientId::new(id), payload.into())
        .await?;
    Ok(Json(client.into()))
}

/// DELETE /clients/{id}
///
/// Remove a client. Responds 204 on success, 404 when absent.
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.service.delete(ClientId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
