use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::presentation::views;

/// Where anonymous callers of protected pages are sent.
pub const LOGIN_URL: &str = "/auth/login/";

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("post not found: {0}")]
    PostNotFound(i64),
    #[error("group not found: {0}")]
    GroupNotFound(String),
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("login required")]
    LoginRequired,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::PostNotFound(_) | Self::GroupNotFound(_) | Self::UserNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::LoginRequired => StatusCode::FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UserAlreadyExists(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::PostNotFound(_) | Self::GroupNotFound(_) | Self::UserNotFound(_) => {
                views::not_found_page()
            }
            Self::LoginRequired => HttpResponse::Found()
                .insert_header((header::LOCATION, LOGIN_URL))
                .finish(),
            other => HttpResponse::build(other.status_code())
                .content_type("text/plain; charset=utf-8")
                .body(other.to_string()),
        }
    }
}
