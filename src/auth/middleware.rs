//! Authentication middleware that checks Basic credentials and the card owner role.

use std::sync::{Arc, Mutex};

use axum::{
    RequestPartsExt,
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::{Principal, find_user, verify_password},
    user::Role,
};

/// The state needed for the auth middleware
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The database connection for looking up users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Middleware function that authenticates any Basic credentials sent with a request.
///
/// Runs for every path, so bad credentials get 401 Unauthorized even where no route matches.
/// Valid credentials place the [Principal] into the request. Requests without
/// Basic credentials pass through untouched and are left to [auth_guard].
pub async fn basic_auth_middleware(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    if let Ok(TypedHeader(Authorization(credentials))) =
        parts.extract::<TypedHeader<Authorization<Basic>>>().await
    {
        match check_credentials(&state, &credentials).await {
            Ok(principal) => {
                parts.extensions.insert(principal);
            }
            Err(error) => return error.into_response(),
        }
    }

    next.run(Request::from_parts(parts, body)).await
}

/// Middleware function that only lets authenticated card owners through.
///
/// Must run inside [basic_auth_middleware]. The response is 401 Unauthorized
/// for requests without a [Principal] and 403 Forbidden for users without the
/// card owner role.
///
/// **Note**: Route handlers can use the function argument `Extension(principal): Extension<Principal>` to receive the principal.
pub async fn auth_guard(request: Request, next: Next) -> Response {
    let Some(principal) = request.extensions().get::<Principal>() else {
        tracing::debug!("No usable Basic credentials for {}", request.uri());
        return Error::MissingCredentials.into_response();
    };

    if principal.role != Role::CardOwner {
        tracing::warn!(
            "User \"{}\" with role {} tried to access cash cards",
            principal.username,
            principal.role
        );
        return Error::NotCardOwner.into_response();
    }

    next.run(request).await
}

/// The database lock is only held for the user lookup, the password hash is
/// checked on the blocking thread pool.
async fn check_credentials(state: &AuthState, credentials: &Basic) -> Result<Principal, Error> {
    let user = {
        let connection = state.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        find_user(credentials.username(), &connection)?
    };

    let password = credentials.password().to_owned();

    tokio::task::spawn_blocking(move || verify_password(user, &password))
        .await
        .map_err(|error| {
            tracing::error!("Password verification task failed: {error}");
            Error::HashingError(error.to_string())
        })?
}
