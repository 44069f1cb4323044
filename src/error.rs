use std::borrow::Cow;

use actix_web::{error::BlockingError, http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

use crate::constants::{MESSAGE_INTERNAL_SERVER_ERROR, MESSAGE_MISSING_FILE_DATA};

/// Every failure a handler or guard can surface to the client.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(Cow<'static, str>),
    #[error("{}", MESSAGE_MISSING_FILE_DATA)]
    MissingFilePart,
    #[error("{0}")]
    NotFound(Cow<'static, str>),
    #[error("Request must accept {0} data")]
    NotAcceptable(&'static str),
    #[error("Request must contain {0} data")]
    UnsupportedMediaType(&'static str),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Blocking task failed")]
    Blocking(#[from] BlockingError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: Cow<'static, str>,
}

impl ApiError {
    pub fn validation(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn song_not_found(id: i64) -> Self {
        Self::not_found(format!("Could not find song with id {}", id))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MissingFilePart => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Io(_) | ApiError::Blocking(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message: Cow<'static, str> = match self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) => msg.clone(),
            ApiError::MissingFilePart | ApiError::NotAcceptable(_) | ApiError::UnsupportedMediaType(_) => {
                self.to_string().into()
            }
            _ => {
                log::error!("{:?}", self);
                MESSAGE_INTERNAL_SERVER_ERROR.into()
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorBody { message })
    }
}
