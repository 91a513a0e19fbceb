//! Types and functions to implement proper error handling in the Mongodex API.

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TryFromInto};
use utoipa::{ToResponse, ToSchema};

use crate::db::duplicate_key_message;
use crate::helpers::error::recursive_error_message;
use crate::service_env::ServiceEnv;
use crate::Error;

impl ResponseError for Error {
    /// Returns the [`StatusCode`] to use for this [`Error`].
    ///
    /// This function does the actual mapping between our internal errors and the resulting
    /// external HTTP [`StatusCode`].
    fn status_code(&self) -> StatusCode {
        let status_code = match self {
            Error::Input { .. } => Some(StatusCode::BAD_REQUEST),
            Error::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Error::Database { source, .. } => status_code_for_database_error(source),
            _ => None,
        };

        status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns an appropriate [`HttpResponse`] to return when a REST API error occurs.
    ///
    /// Uses the context of this [`Error`] to craft the response (see [`ErrorResponse::from`]).
    /// Server errors are logged with their full cause chain before the response is built;
    /// the caller only ever sees the generic status text.
    fn error_response(&self) -> HttpResponse<BoxBody> {
        let error_response: ErrorResponse = self.into();
        if error_response.status_code.is_server_error() {
            error!("{}", recursive_error_message(self));
        }

        HttpResponse::build(error_response.status_code).json(error_response)
    }
}

/// Helper function to get a [`StatusCode`] for a [database error](mongodb::error::Error).
///
/// If the error is due to faulty user input (e.g. a write that violated one of the unique
/// indexes), this method will return `Some` with an appropriate HTTP status code. Otherwise,
/// it will return `None` and the caller can decide what status code to use.
pub fn status_code_for_database_error(error: &mongodb::error::Error) -> Option<StatusCode> {
    duplicate_key_message(error).map(|_| StatusCode::BAD_REQUEST)
}

#[cfg_attr(
    doc,
    doc = r"
        Struct used to return error information as JSON in [`HttpResponse`]s.

        # Notes

        The [`internal_error`](ErrorResponse::internal_error) field will only
        be populated when running in a [`Development`] environment (see [`ErrorResponse::from`]).

        [`Development`]: ServiceEnv::Development
    "
)]
#[cfg_attr(not(doc), doc = "Mongodex API error information")]
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, ToResponse)]
#[response(
    description = "Server error",
    example = json!({
        "status_code": 500,
        "error": "Internal Server Error"
    }),
)]
pub struct ErrorResponse {
    /// HTTP status code
    #[serde_as(as = "TryFromInto<u16>")]
    #[schema(
        value_type = u16,
        minimum = 100,
        maximum = 999,
    )]
    pub status_code: StatusCode,

    /// Error message
    pub error: String,

    /// More details, when appropriate (like for validation errors or unique key conflicts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[cfg_attr(
        doc,
        doc = r"
            Description of the internal error

            Only present when server is running in a [`Development`] environment.

            [`Development`]: ServiceEnv::Development
        "
    )]
    #[cfg_attr(
        not(doc),
        doc = "Description of the internal error (when server is running in development)"
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_error: Option<String>,
}

impl From<&Error> for ErrorResponse {
    /// Creates an [`ErrorResponse`] for an internal [`Error`].
    ///
    /// This will be used to create the body of the [`HttpResponse`] returned when an error occurs
    /// during a REST API call.
    ///
    /// # Service environment
    ///
    /// Unless we run in a [`Development`] environment, this function will not include any actual
    /// information about the cause of the internal error, to maintain security. In [`Development`],
    /// the [`internal_error`](ErrorResponse#structfield.internal_error) field will include more information.
    ///
    /// [`Development`]: ServiceEnv::Development
    fn from(value: &Error) -> Self {
        let status_code = value.status_code();

        Self {
            status_code,
            error: status_code
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .into(),
            details: Self::generate_details(value),
            internal_error: Self::generate_internal_error(value),
        }
    }
}

impl ErrorResponse {
    /// Returns the value to use for the [`details`](ErrorResponse::details) field.
    ///
    /// This will return a value for client errors, so that the caller can tell what went
    /// wrong: validation failures, unresolved lookup terms and unique key conflicts. Generic
    /// database failures yield no details; their cause goes to the server logs only.
    fn generate_details(error: &Error) -> Option<String> {
        match error {
            Error::Input { source, .. } => Some(format!("{}", source)),
            Error::NotFound { .. } => Some(format!("{}", error)),
            Error::Database { source, .. } => duplicate_key_message(source)
                .map(|message| format!("pokemon already exists in database: {}", message)),
            _ => None,
        }
    }

    /// Returns the value to use for the [`internal_error`](ErrorResponse::internal_error) field.
    ///
    /// This will return `None` except when running in [`Development`](ServiceEnv::Development)
    /// environment (see [`from`](ErrorResponse::from)).
    fn generate_internal_error(error: &Error) -> Option<String> {
        if ServiceEnv::current().is_development() {
            Some(recursive_error_message(error))
        } else {
            None
        }
    }
}

/// Generic error handler for `actix_web`'s various configs.
///
/// This handler accepts any type of error that can be turned into our [`Error`] type, then turns
/// that into an [`actix_web::error::Error`]. This is possible because we implemented [`ResponseError`]
/// for our [`Error`] type - thus, `actix_web` will use our implementation to generate an appropriate
/// HTTP response for the type of error encountered. This makes it possible to handle pre-request handler
/// errors (like for example [`DeserializeErrors`]s) using the same error handling code as in-request
/// handler errors.
///
/// # Examples
///
/// ```no_run
/// use actix_web_validator::{JsonConfig, PathConfig};
/// use mongodex::api::errors::actix_error_handler;
///
/// let json_config = JsonConfig::default().error_handler(actix_error_handler);
/// let path_config = PathConfig::default().error_handler(actix_error_handler);
/// ```
///
/// [`DeserializeErrors`]: actix_web_validator::error::DeserializeErrors
pub fn actix_error_handler<E, R>(err: E, _req: &R) -> actix_web::error::Error
where
    E: Into<Error>,
{
    Into::<Error>::into(err).into()
}
