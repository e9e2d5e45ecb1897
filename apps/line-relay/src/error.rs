use axum::response::{IntoResponse, Response};
use axum::{Json, http::StatusCode};
use line_relay_core::{DecodeError, DispatchError, MappingError, PushError};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl From<PushError> for ApiError {
    fn from(err: PushError) -> Self {
        match err {
            PushError::Decode(err) => ApiError::Decode(err),
            PushError::Dispatch(err) => ApiError::Dispatch(err),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) => StatusCode::BAD_REQUEST,
            ApiError::Mapping(_) | ApiError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}
