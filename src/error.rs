//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested record does not exist.
    ///
    /// `key` describes how the record was looked up, e.g. `id 3` or
    /// `name "Groceries"`.
    #[error("{entity} with {key} not found")]
    NotFound {
        /// The kind of record, e.g. "Category".
        entity: &'static str,
        /// The lookup key.
        key: String,
    },

    /// A record of the same entity type already uses the name.
    ///
    /// `path` is the canonical path of the record that owns the name.
    #[error("{entity} with name \"{name}\" already exists at {path}")]
    AlreadyExists {
        /// The kind of record, e.g. "Category".
        entity: &'static str,
        /// The conflicting name.
        name: String,
        /// The path to the existing record.
        path: String,
    },

    /// The database rejected a write because of a UNIQUE constraint on a name column.
    ///
    /// The service layer converts this into [Error::AlreadyExists].
    #[error("the name is already used by another record")]
    DuplicateName,

    /// The database rejected a write because of a FOREIGN KEY constraint.
    #[error("the record refers to another record that does not exist")]
    InvalidReference,

    /// The request body is structurally invalid.
    ///
    /// Holds one message per offending field.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A JSON field held a value outside of its enumeration.
    #[error(
        "invalid value {value} for field \"{field}\", expected one of: {}",
        .allowed.join(", ")
    )]
    MalformedEnum {
        /// The JSON field name.
        field: String,
        /// The offending value as it appeared in the request.
        value: String,
        /// The legal values.
        allowed: &'static [&'static str],
    },

    /// No route matches the request path.
    #[error("no route matches {0}")]
    UnknownRoute(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl Error {
    /// A [Error::NotFound] for a lookup by database ID.
    pub fn not_found_id(entity: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity,
            key: format!("id {id}"),
        }
    }

    /// A [Error::NotFound] for a lookup by name.
    pub fn not_found_name(entity: &'static str, name: &str) -> Self {
        Self::NotFound {
            entity,
            key: format!("name \"{name}\""),
        }
    }

    /// The HTTP status code the error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound { .. } | Error::UnknownRoute(_) => StatusCode::NOT_FOUND,
            Error::AlreadyExists { .. } | Error::DuplicateName => StatusCode::CONFLICT,
            Error::Validation(_) | Error::MalformedEnum { .. } | Error::InvalidReference => {
                StatusCode::BAD_REQUEST
            }
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Attach the request path so the error can be rendered as a response.
    pub fn at(self, path: &str) -> ApiError {
        ApiError {
            error: self,
            path: path.to_owned(),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with(".name") =>
            {
                Error::DuplicateName
            }
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_)) if sql_error.extended_code == 787 => {
                Error::InvalidReference
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// An [Error] paired with the path of the request that caused it.
#[derive(Debug, PartialEq)]
pub struct ApiError {
    /// What went wrong.
    pub error: Error,
    /// The request path, echoed back in the error body.
    pub path: String,
}

/// The JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// When the error was produced.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// The numeric HTTP status code.
    pub status: u16,
    /// The reason phrase for `status`, e.g. "Not Found".
    pub error: String,
    /// The request path.
    pub path: String,
    /// A single human readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// One message per invalid field, used when there is more than one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();

        let (message, messages) = match self.error {
            Error::Validation(mut messages) if messages.len() == 1 => (messages.pop(), None),
            Error::Validation(messages) => (None, Some(messages)),
            error if status == StatusCode::INTERNAL_SERVER_ERROR => {
                // Any errors that are not handled above are not intended to be shown to the client.
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    Some(
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                    ),
                    None,
                )
            }
            error => (Some(error.to_string()), None),
        };

        let body = ErrorBody {
            timestamp: OffsetDateTime::now_utc(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_owned(),
            path: self.path,
            message,
            messages,
        };

        (status, Json(body)).into_response()
    }
}
