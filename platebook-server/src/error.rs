//! Handler errors and their HTTP mapping

use hyper::{Response, StatusCode};
use platebook_core::PlatebookError;
use thiserror::Error;
use tracing::error;

use crate::response::{message_response, BoxBody};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Internal error: {0}")]
    Internal(#[from] PlatebookError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Store failures are logged here and reported without detail
    pub fn into_response(self) -> Response<BoxBody> {
        match self {
            ApiError::Internal(e) => {
                error!("Store failure: {}", e);
                message_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            other => message_response(other.status(), &other.to_string()),
        }
    }
}

pub type HandlerResult = Result<Response<BoxBody>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized("x").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound("x").status(), StatusCode::NOT_FOUND);

        let internal = ApiError::from(PlatebookError::Storage("disk gone".to_string()));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
