//! Mapping of domain and use-case failures to HTTP responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::{ErrorKind, ValueError},
    infrastructure::dto::http::{ErrorBody, ErrorResponse},
    usecase::RoomActionError,
};

/// Error returned by every handler.
///
/// Serialized as `{"ok": false, "error": {"kind": ..., "message": ...}}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: status_for(kind),
            kind,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::RoomNotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidInput | ErrorKind::UnknownRequestKind => StatusCode::BAD_REQUEST,
        ErrorKind::NotAPlayer => StatusCode::FORBIDDEN,
        // 盤面上で成立しない手
        ErrorKind::InvalidPosition | ErrorKind::OccupiedCell | ErrorKind::ForbiddenMove => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        // 部屋・対局の状態と衝突する操作
        ErrorKind::GameOver
        | ErrorKind::NotYourTurn
        | ErrorKind::GameNotReady
        | ErrorKind::RequestPending
        | ErrorKind::RequestAlreadyPending
        | ErrorKind::NoPendingRequest
        | ErrorKind::NoHistory
        | ErrorKind::GameAlreadyStarted => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<RoomActionError> for ApiError {
    fn from(e: RoomActionError) -> Self {
        Self::new(e.kind(), e.to_string())
    }
}

impl From<ValueError> for ApiError {
    fn from(e: ValueError) -> Self {
        Self::new(e.kind(), e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(ErrorKind::InvalidInput, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}: {}", self.kind.as_str(), self.message);
        }
        let body = ErrorResponse {
            ok: false,
            error: ErrorBody {
                kind: self.kind,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}
