#[macro_use]
extern crate log;

use actix_web::{
    error::{BlockingError, ResponseError},
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::Display;
use diesel::result::{DatabaseErrorKind, Error as DBError};
use r2d2::Error as PoolError;

#[derive(Debug, Display, PartialEq)]
pub enum Error {
    #[display(fmt = "{}", _0)]
    BadRequest(String),
    #[display(fmt = "{}", _0)]
    NotFound(String),
    #[display(fmt = "{}", _0)]
    InternalServerError(String),
    #[display(fmt = "{}", _0)]
    PoolError(String),
    #[display(fmt = "{}", _0)]
    BlockingError(String),
    #[display(fmt = "{:?}", _0)]
    ValidationError(Vec<String>),
    #[display(fmt = "{}", _0)]
    TemplateError(String),
    #[display(fmt = "{}", _0)]
    PasswordHashError(String),
}

impl Error {
    /// First message of a validation failure, for rendering next to a form.
    pub fn first_message(&self) -> String {
        match self {
            Error::ValidationError(messages) => messages
                .first()
                .cloned()
                .unwrap_or_else(|| "Invalid input".to_string()),
            other => other.to_string(),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed - {}", self);
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status)
            .content_type(ContentType::plaintext())
            .body(body)
    }
}

// Convert DBErrors to our Error type
impl From<DBError> for Error {
    fn from(error: DBError) -> Error {
        match error {
            DBError::DatabaseError(kind, info) => {
                if let DatabaseErrorKind::UniqueViolation = kind {
                    let message = info.details().unwrap_or_else(|| info.message()).to_string();
                    return Error::BadRequest(message);
                }
                Error::InternalServerError(info.message().to_string())
            }
            DBError::NotFound => Error::NotFound("Record not found".into()),
            _ => Error::InternalServerError("Unknown database error".into()),
        }
    }
}

// Convert PoolError to our Error type
impl From<PoolError> for Error {
    fn from(error: PoolError) -> Error {
        Error::PoolError(error.to_string())
    }
}

impl From<BlockingError> for Error {
    fn from(_: BlockingError) -> Error {
        Error::BlockingError("Thread blocking error".into())
    }
}
