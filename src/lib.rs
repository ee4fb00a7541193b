//! Cash Card is a small JSON API for keeping track of cash cards, monetary
//! records that belong to a single user.
//!
//! This library provides the router, the SQLite backed stores and the
//! authentication middleware used by the `server` binary.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod cash_card;
mod db;
mod demo_data;
mod endpoints;
mod logging;
mod not_found;
mod pagination;
mod password;
mod routing;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{Principal, authenticate};
pub use cash_card::{
    CashCard, CashCardId, CashCardStore, NewCashCard, PageRequest, SQLiteCashCardStore,
    SortDirection, SortField, SortOrder,
};
pub use db::initialize as initialize_db;
pub use demo_data::{DEMO_CASH_CARDS, DEMO_USERS, seed_demo_data};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use user::{Role, User, UserID, Username, create_user, get_user_by_username};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers this is also returned when the resource
    /// exists but belongs to another user, so that clients cannot tell the
    /// two cases apart.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The request did not include a usable `Authorization` header.
    #[error("no credentials were provided")]
    MissingCredentials,

    /// The username does not exist or the password did not match.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The user authenticated, but does not have the role needed to own
    /// cash cards.
    #[error("the user is not allowed to own cash cards")]
    NotCardOwner,

    /// The `sort` query parameter named an unknown field or direction.
    #[error("invalid sort parameter \"{0}\"")]
    InvalidSort(String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The specified username already exists in the database.
    #[error("the username \"{0}\" is already taken")]
    DuplicateUsername(String),

    /// A role string read from the database or the command line is not a
    /// known role.
    #[error("\"{0}\" is not a valid role")]
    InvalidRole(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => StatusCode::NOT_FOUND.into_response(),
            Error::MissingCredentials | Error::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                [(
                    WWW_AUTHENTICATE,
                    HeaderValue::from_static(auth::WWW_AUTHENTICATE_CHALLENGE),
                )],
            )
                .into_response(),
            Error::NotCardOwner => StatusCode::FORBIDDEN.into_response(),
            Error::InvalidSort(_) => StatusCode::BAD_REQUEST.into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
