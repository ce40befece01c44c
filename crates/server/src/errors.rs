use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::validation::{ValidationErrors, PAYLOAD_FIELD};
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

const ID_FIELD: &str = "id";
const QUERY_FIELD: &str = "query";
const INTERNAL_MESSAGE: &str = "internal persistence error";

/// Transport wrapper mapping each service error kind to a status code.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self { Self(e) }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ServiceError::Validation(ValidationErrors::single(PAYLOAD_FIELD, rejection.body_text())))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(ServiceError::Validation(ValidationErrors::single(ID_FIELD, rejection.body_text())))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(ServiceError::Validation(ValidationErrors::single(QUERY_FIELD, rejection.body_text())))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = serde_json::json!({"error": self.0.to_string(), "code": self.0.code()});
        match &self.0 {
            ServiceError::Validation(errs) => body["fields"] = serde_json::json!(errs),
            ServiceError::Persistence(msg) => {
                // backend detail stays in the log
                error!(error = %msg, "persistence failure");
                body["error"] = serde_json::json!(INTERNAL_MESSAGE);
            }
            ServiceError::Conflict(msg) => warn!(error = %msg, "write conflict"),
            ServiceError::NotFound(_) => {}
        }
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database unavailable: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (ServiceError::Validation(ValidationErrors::single("name", "is required")), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("user", 1), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("dup".into()), StatusCode::CONFLICT),
            (ServiceError::Persistence("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[tokio::test]
    async fn persistence_detail_stays_out_of_the_body() {
        let res = ApiError(ServiceError::Persistence("relation \"user\" does not exist".into())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], INTERNAL_MESSAGE);
        assert_eq!(body["code"], 1200);
        assert!(body.get("fields").is_none());
    }
}
