use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use pm_core::errors::TokenError;
use pm_shared::error_codes;
pub use pm_shared::ErrorResponse;
use thiserror::Error;

// Extension trait for ErrorResponse to add actix-web specific methods
pub trait ErrorResponseExt {
    fn to_response(&self) -> HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.http_status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}

/// Why a request was refused by the authentication layer
#[derive(Error, Debug)]
pub enum AuthRejection {
    #[error("Missing or invalid Authorization header")]
    MissingCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AuthRejection {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthRejection::Token(e) => e.error_code(),
            AuthRejection::MissingCredentials | AuthRejection::Unauthenticated => {
                error_codes::UNAUTHORIZED
            }
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::unauthorized(self.error_code(), self.to_string())
    }
}

impl ResponseError for AuthRejection {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = self.to_error_response().to_response();
        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            header::HeaderValue::from_static("Bearer"),
        );
        response
    }
}
