use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use shared::LotteryError;

#[derive(Debug)]
pub enum Error {
    Unauthorized,
    Forbidden,
    LotteryNotFound(String),
    LotteryNotOpen(String),
    InvalidQuery(&'static str),
    MalformedQuery(String),
    Lottery(LotteryError),
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::MalformedQuery(rejection.body_text())
    }
}

impl From<LotteryError> for Error {
    fn from(err: LotteryError) -> Self {
        Error::Lottery(err)
    }
}

impl Error {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, "Not signed in".to_string()),
            Error::Forbidden => (StatusCode::FORBIDDEN, "Not allowed".to_string()),
            Error::LotteryNotFound(id) => (StatusCode::NOT_FOUND, format!("No lottery named {}", id)),
            Error::LotteryNotOpen(id) => (
                StatusCode::FORBIDDEN,
                format!("The {} lottery is not accepting submissions", id),
            ),
            Error::InvalidQuery(message) => (StatusCode::BAD_REQUEST, message.to_string()),
            Error::MalformedQuery(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Error::Lottery(LotteryError::Metadata(e)) => {
                (StatusCode::BAD_REQUEST, format!("Invalid entry metadata: {}", e))
            }
            Error::Lottery(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!("{}", message);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
