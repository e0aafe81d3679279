use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

/// Error response rendered as `{"error": <message>}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match e {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("invalid group_id".into()), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("user"), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("dup".into()), StatusCode::CONFLICT),
            (ServiceError::Db("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn validation_message_is_passed_through() {
        let api = ApiError::from(ServiceError::Validation("invalid group_id".into()));
        assert_eq!(api.message, "invalid group_id");
        let api = ApiError::from(ServiceError::not_found("group"));
        assert_eq!(api.message, "group not found");
    }
}
