//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::{ApiError, ApiJson};
use crate::{
    domain::{Identity, RequestKind, RequestOutcome, RoomId, RoomName},
    infrastructure::dto::http::{
        AckResponse, CreateRoomRequest, CreateRoomResponse, IdentityRequest, JoinRoomResponse,
        LeaveRoomResponse, MakeRequestRequest, MakeRequestResponse, PlaceStoneRequest,
        PlaceStoneResponse, ResolveRequestRequest, ResolveRequestResponse, RoomSnapshotDto,
        RoomSummaryDto,
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.list_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Create a room; the creator takes the black seat.
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<CreateRoomResponse>), ApiError> {
    // String -> Domain Model
    let name = RoomName::try_from(payload.name)?;
    let creator = Identity::try_from(payload.creator)?;

    let created = state.create_room_usecase.execute(name, creator).await;

    Ok((
        StatusCode::CREATED,
        Json(CreateRoomResponse {
            ok: true,
            room_id: created.room_id.into_string(),
            role: created.role,
        }),
    ))
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomSnapshotDto>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let room = state.get_room_detail_usecase.execute(&room_id).await?;

    // Domain Model から DTO への変換
    Ok(Json(RoomSnapshotDto::from(&room)))
}

pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    ApiJson(payload): ApiJson<IdentityRequest>,
) -> Result<Json<JoinRoomResponse>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let identity = Identity::try_from(payload.identity)?;

    let role = state.join_room_usecase.execute(&room_id, identity).await?;

    Ok(Json(JoinRoomResponse { ok: true, role }))
}

pub async fn leave_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    ApiJson(payload): ApiJson<IdentityRequest>,
) -> Result<Json<LeaveRoomResponse>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let identity = Identity::try_from(payload.identity)?;

    let outcome = state
        .leave_room_usecase
        .execute(&room_id, &identity)
        .await?;

    Ok(Json(LeaveRoomResponse {
        ok: true,
        forfeit_winner: outcome.forfeit_winner,
        room_removed: outcome.room_removed,
    }))
}

pub async fn place_stone(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    ApiJson(payload): ApiJson<PlaceStoneRequest>,
) -> Result<Json<PlaceStoneResponse>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let identity = Identity::try_from(payload.identity)?;

    let placed = state
        .place_stone_usecase
        .execute(&room_id, &identity, payload.row, payload.col)
        .await?;

    Ok(Json(PlaceStoneResponse {
        ok: true,
        stone: placed.stone,
        winner: placed.winner,
    }))
}

/// Ask for an undo or a seat swap.
pub async fn make_request(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    ApiJson(payload): ApiJson<MakeRequestRequest>,
) -> Result<Json<MakeRequestResponse>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let identity = Identity::try_from(payload.identity)?;
    let kind: RequestKind = payload.kind.parse()?;

    let outcome = state
        .make_request_usecase
        .execute(&room_id, identity, kind)
        .await?;

    Ok(Json(MakeRequestResponse {
        ok: true,
        kind,
        executed: outcome == RequestOutcome::Executed,
    }))
}

pub async fn cancel_request(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<AckResponse>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;

    let message = match state.cancel_request_usecase.execute(&room_id).await? {
        Some(request) => format!("{} request cancelled", request.kind),
        None => "no pending request".to_string(),
    };

    Ok(Json(AckResponse::ok(message)))
}

pub async fn resolve_request(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    ApiJson(payload): ApiJson<ResolveRequestRequest>,
) -> Result<Json<ResolveRequestResponse>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;

    let resolution = state
        .resolve_request_usecase
        .execute(&room_id, payload.approved)
        .await?;

    Ok(Json(ResolveRequestResponse {
        ok: true,
        kind: resolution.request.kind,
        approved: resolution.approved,
    }))
}

/// Clear the board, keeping the seats.
pub async fn reset_game(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    ApiJson(payload): ApiJson<IdentityRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let identity = Identity::try_from(payload.identity)?;

    state.reset_game_usecase.execute(&room_id, &identity).await?;

    Ok(Json(AckResponse::ok("game reset")))
}
