// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{
        Path, Query, State as AxumState,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use innkeep_api::{
    AddRoomsRequest, ApiError, CacheEntryResponse, CheckDocumentRequest, CheckDocumentResponse,
    CheckNumberRequest, CheckNumberResponse, ClearExpiredResponse, ClientDetailResponse,
    ClientHistoryResponse, ClientListQuery, ClientListResponse, ClientResponse,
    ClientRoomsResponse, ClientsInRangeResponse, ClientsOnDateResponse, CreateClientRequest,
    CreateRoomRequest, DEFAULT_CACHE_TTL_MINUTES, DEFAULT_TIMEZONE, DateQuery, DateRangeQuery,
    DeleteResponse, FieldViolation, HotelSettings, ReleaseResponse, RemovalResponse, ReportQuery,
    ReportResponse, RoomListQuery, RoomListResponse, RoomResponse, RoomsByTypeResponse,
    UpdateClientRequest, UpdateRoomRequest, translate_persistence_error,
};
use innkeep_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

#[cfg(test)]
mod tests;

/// Innkeep Server - HTTP server for the Innkeep hotel back office
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an in-memory database.
    #[arg(short, long, env = "INNKEEP_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "INNKEEP_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "INNKEEP_PORT", default_value_t = 3000)]
    port: u16,

    /// IANA time zone the hotel's calendar days follow
    #[arg(short, long, env = "INNKEEP_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    /// Minutes a cached report stays valid
    #[arg(long, env = "INNKEEP_REPORT_CACHE_TTL", default_value_t = DEFAULT_CACHE_TTL_MINUTES)]
    report_cache_ttl_minutes: i64,
}

/// Application state shared across handlers.
///
/// One connection serves every request; the mutex serializes them.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    settings: HotelSettings,
}

// ============================================================================
// Errors
// ============================================================================

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error message.
    message: String,
    /// Rejected fields, for 400 responses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldViolation>,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Field-level details.
    errors: Vec<FieldViolation>,
}

impl HttpError {
    fn bad_request(field: &str, message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            errors: vec![FieldViolation::new(field, message.clone())],
            message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            message: self.message,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ValidationFailed { .. }
            | ApiError::DomainRuleViolation { .. }
            | ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                errors: err.violations(),
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
                errors: Vec::new(),
            },
            ApiError::Internal { .. } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: String::from("Internal server error"),
                errors: Vec::new(),
            },
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("body", rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request("query", rejection.body_text())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Handler for GET `/health` endpoint.
///
/// Touches the database so a dead connection reports as unhealthy.
async fn handle_health(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<HealthResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    persistence
        .verify_foreign_key_enforcement()
        .map_err(translate_persistence_error)?;
    Ok(Json(HealthResponse {
        status: String::from("ok"),
    }))
}

// ============================================================================
// Rooms
// ============================================================================

/// Handler for GET `/rooms` endpoint.
async fn handle_list_rooms(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<RoomListQuery>, QueryRejection>,
) -> Result<Json<RoomListResponse>, HttpError> {
    let Query(query) = query?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::list_rooms(&mut persistence, &query)?))
}

/// Handler for POST `/rooms` endpoint.
async fn handle_create_room(
    AxumState(app_state): AxumState<AppState>,
    req: Result<Json<CreateRoomRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RoomResponse>), HttpError> {
    let Json(req) = req?;
    info!(number = req.number, "Handling create_room request");

    let mut persistence = app_state.persistence.lock().await;
    let room: RoomResponse =
        innkeep_api::create_room(&mut persistence, &req, OffsetDateTime::now_utc())?;
    drop(persistence);

    info!(room_id = room.room_id, number = room.number, "Created room");
    Ok((StatusCode::CREATED, Json(room)))
}

/// Handler for GET `/rooms/available` endpoint.
async fn handle_available_rooms(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<RoomListResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::available_rooms(&mut persistence)?))
}

/// Handler for GET `/rooms/by_type` endpoint.
async fn handle_rooms_by_type(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<RoomsByTypeResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::rooms_by_type(&mut persistence)?))
}

/// Handler for GET `/rooms/statistics` endpoint.
async fn handle_room_statistics(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<innkeep_api::RoomStatistics>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::room_statistics(&mut persistence)?))
}

/// Handler for POST `/rooms/check_number` endpoint.
async fn handle_check_room_number(
    AxumState(app_state): AxumState<AppState>,
    req: Result<Json<CheckNumberRequest>, JsonRejection>,
) -> Result<Json<CheckNumberResponse>, HttpError> {
    let Json(req) = req?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::check_room_number(&mut persistence, &req)?))
}

/// Handler for GET `/rooms/{room_id}` endpoint.
async fn handle_get_room(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
) -> Result<Json<RoomResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::get_room(&mut persistence, room_id)?))
}

/// Handler for PATCH `/rooms/{room_id}` endpoint.
async fn handle_update_room(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
    req: Result<Json<UpdateRoomRequest>, JsonRejection>,
) -> Result<Json<RoomResponse>, HttpError> {
    let Json(req) = req?;
    info!(room_id, "Handling update_room request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::update_room(
        &mut persistence,
        room_id,
        &req,
        OffsetDateTime::now_utc(),
    )?))
}

/// Handler for DELETE `/rooms/{room_id}` endpoint.
async fn handle_delete_room(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(room_id, "Handling delete_room request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::delete_room(&mut persistence, room_id)?))
}

/// Handler for POST `/rooms/{room_id}/clean` endpoint.
async fn handle_clean_room(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
) -> Result<Json<RoomResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::clean_room(
        &mut persistence,
        room_id,
        OffsetDateTime::now_utc(),
    )?))
}

/// Handler for POST `/rooms/{room_id}/maintenance` endpoint.
async fn handle_begin_maintenance(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
) -> Result<Json<RoomResponse>, HttpError> {
    info!(room_id, "Handling begin_maintenance request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::begin_maintenance(
        &mut persistence,
        room_id,
        OffsetDateTime::now_utc(),
    )?))
}

/// Handler for POST `/rooms/{room_id}/maintenance/finish` endpoint.
async fn handle_end_maintenance(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
) -> Result<Json<RoomResponse>, HttpError> {
    info!(room_id, "Handling end_maintenance request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::end_maintenance(
        &mut persistence,
        room_id,
        OffsetDateTime::now_utc(),
    )?))
}

// ============================================================================
// Clients
// ============================================================================

/// Handler for GET `/clients` endpoint.
async fn handle_list_clients(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<ClientListQuery>, QueryRejection>,
) -> Result<Json<ClientListResponse>, HttpError> {
    let Query(query) = query?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::list_clients(
        &mut persistence,
        &query,
        &app_state.settings,
    )?))
}

/// Handler for POST `/clients` endpoint.
///
/// Registers the client and assigns the requested rooms together.
async fn handle_create_client(
    AxumState(app_state): AxumState<AppState>,
    req: Result<Json<CreateClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ClientDetailResponse>), HttpError> {
    let Json(req) = req?;
    info!(rooms = ?req.rooms, "Handling create_client request");

    let mut persistence = app_state.persistence.lock().await;
    let detail: ClientDetailResponse =
        innkeep_api::create_client(&mut persistence, &req, OffsetDateTime::now_utc())?;
    drop(persistence);

    info!(
        client_id = detail.client.client_id,
        rooms = detail.active_rooms.len(),
        "Registered client"
    );
    Ok((StatusCode::CREATED, Json(detail)))
}

/// Handler for GET `/clients/active` endpoint.
async fn handle_active_clients(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ClientListResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::active_clients(
        &mut persistence,
        &app_state.settings,
    )?))
}

/// Handler for GET `/clients/history` endpoint.
async fn handle_client_history(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ClientHistoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::client_history(
        &mut persistence,
        &app_state.settings,
    )?))
}

/// Handler for GET `/clients/statistics` endpoint.
async fn handle_client_statistics(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<innkeep_api::ClientStatistics>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::client_statistics(&mut persistence)?))
}

/// Handler for GET `/clients/on_date` endpoint.
async fn handle_clients_on_date(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<ClientsOnDateResponse>, HttpError> {
    let Query(query) = query?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::clients_on_date(
        &mut persistence,
        &query,
        &app_state.settings,
        OffsetDateTime::now_utc(),
    )?))
}

/// Handler for GET `/clients/in_range` endpoint.
async fn handle_clients_in_range(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Json<ClientsInRangeResponse>, HttpError> {
    let Query(query) = query?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::clients_in_range(
        &mut persistence,
        &query,
        &app_state.settings,
        OffsetDateTime::now_utc(),
    )?))
}

/// Handler for POST `/clients/check_document` endpoint.
async fn handle_check_document(
    AxumState(app_state): AxumState<AppState>,
    req: Result<Json<CheckDocumentRequest>, JsonRejection>,
) -> Result<Json<CheckDocumentResponse>, HttpError> {
    let Json(req) = req?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::check_document(&mut persistence, &req)?))
}

/// Handler for GET `/clients/{client_id}` endpoint.
async fn handle_get_client(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<ClientDetailResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::get_client(&mut persistence, client_id)?))
}

/// Handler for PATCH `/clients/{client_id}` endpoint.
async fn handle_update_client(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
    req: Result<Json<UpdateClientRequest>, JsonRejection>,
) -> Result<Json<ClientResponse>, HttpError> {
    let Json(req) = req?;
    info!(client_id, "Handling update_client request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::update_client(
        &mut persistence,
        client_id,
        &req,
        OffsetDateTime::now_utc(),
    )?))
}

/// Handler for DELETE `/clients/{client_id}` endpoint.
///
/// Rooms the client holds are released first, like a checkout.
async fn handle_delete_client(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<RemovalResponse>, HttpError> {
    info!(client_id, "Handling delete_client request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::delete_client(
        &mut persistence,
        client_id,
        OffsetDateTime::now_utc(),
    )?))
}

/// Handler for GET `/clients/{client_id}/rooms` endpoint.
async fn handle_client_rooms(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<ClientRoomsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::client_rooms(&mut persistence, client_id)?))
}

/// Handler for POST `/clients/{client_id}/rooms` endpoint.
async fn handle_add_rooms(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
    req: Result<Json<AddRoomsRequest>, JsonRejection>,
) -> Result<Json<ClientDetailResponse>, HttpError> {
    let Json(req) = req?;
    info!(client_id, rooms = ?req.rooms, "Handling add_rooms request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::add_rooms(
        &mut persistence,
        client_id,
        &req,
        OffsetDateTime::now_utc(),
    )?))
}

/// Handler for POST `/clients/{client_id}/release` endpoint.
async fn handle_release_client(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<ReleaseResponse>, HttpError> {
    info!(client_id, "Handling release_client request");
    let mut persistence = app_state.persistence.lock().await;
    let release: ReleaseResponse =
        innkeep_api::release_client(&mut persistence, client_id, OffsetDateTime::now_utc())?;
    drop(persistence);

    info!(
        client_id,
        released = release.released.len(),
        "Released client rooms"
    );
    Ok(Json(release))
}

// ============================================================================
// Reports
// ============================================================================

/// Handler for GET `/reports/{report_name}` endpoint.
async fn handle_report(
    AxumState(app_state): AxumState<AppState>,
    Path(report_name): Path<String>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Json<ReportResponse>, HttpError> {
    let Query(query) = query?;
    info!(report = %report_name, "Handling report request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::report_by_name(
        &mut persistence,
        &report_name,
        &query,
        &app_state.settings,
        OffsetDateTime::now_utc(),
    )?))
}

/// Handler for POST `/reports/cache/clear_expired` endpoint.
async fn handle_clear_expired_reports(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ClearExpiredResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::clear_expired_reports(
        &mut persistence,
        OffsetDateTime::now_utc(),
    )?))
}

/// Handler for POST `/reports/cache/{cache_id}/invalidate` endpoint.
async fn handle_invalidate_cached_report(
    AxumState(app_state): AxumState<AppState>,
    Path(cache_id): Path<i64>,
) -> Result<Json<CacheEntryResponse>, HttpError> {
    info!(cache_id, "Handling invalidate_cached_report request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(innkeep_api::invalidate_cached_report(
        &mut persistence,
        cache_id,
    )?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/rooms", get(handle_list_rooms).post(handle_create_room))
        .route("/rooms/available", get(handle_available_rooms))
        .route("/rooms/by_type", get(handle_rooms_by_type))
        .route("/rooms/statistics", get(handle_room_statistics))
        .route("/rooms/check_number", post(handle_check_room_number))
        .route(
            "/rooms/{room_id}",
            get(handle_get_room)
                .patch(handle_update_room)
                .delete(handle_delete_room),
        )
        .route("/rooms/{room_id}/clean", post(handle_clean_room))
        .route("/rooms/{room_id}/maintenance", post(handle_begin_maintenance))
        .route(
            "/rooms/{room_id}/maintenance/finish",
            post(handle_end_maintenance),
        )
        .route("/clients", get(handle_list_clients).post(handle_create_client))
        .route("/clients/active", get(handle_active_clients))
        .route("/clients/history", get(handle_client_history))
        .route("/clients/statistics", get(handle_client_statistics))
        .route("/clients/on_date", get(handle_clients_on_date))
        .route("/clients/in_range", get(handle_clients_in_range))
        .route("/clients/check_document", post(handle_check_document))
        .route(
            "/clients/{client_id}",
            get(handle_get_client)
                .patch(handle_update_client)
                .delete(handle_delete_client),
        )
        .route(
            "/clients/{client_id}/rooms",
            get(handle_client_rooms).post(handle_add_rooms),
        )
        .route("/clients/{client_id}/release", post(handle_release_client))
        .route("/reports/{report_name}", get(handle_report))
        .route(
            "/reports/cache/clear_expired",
            post(handle_clear_expired_reports),
        )
        .route(
            "/reports/cache/{cache_id}/invalidate",
            post(handle_invalidate_cached_report),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Innkeep Server");

    let settings: HotelSettings =
        HotelSettings::new(&args.timezone, args.report_cache_ttl_minutes).inspect_err(|err| {
            error!(error = %err, "Invalid hotel settings");
        })?;
    info!(
        timezone = %args.timezone,
        cache_ttl_minutes = args.report_cache_ttl_minutes,
        "Loaded hotel settings"
    );

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        settings,
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
