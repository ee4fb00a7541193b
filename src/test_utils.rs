#![allow(missing_docs)]

use axum::http::HeaderValue;
use axum_extra::headers::{Authorization, Header};
use axum_test::TestServer;
use rusqlite::Connection;

use crate::{AppState, Error, build_router, demo_data::seed_demo_data, pagination::PaginationConfig};

/// The bcrypt cost for test users, the default cost makes tests slow.
pub(crate) const TEST_PASSWORD_COST: u32 = 4;

/// Get the app state for an in-memory database seeded with the demo data.
pub(crate) fn get_test_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    let state = AppState::new(connection, PaginationConfig::default())
        .expect("Could not create app state.");

    seed_demo_data(&state.db_connection.lock().unwrap(), TEST_PASSWORD_COST)
        .expect("Could not seed demo data.");

    state
}

/// Get a server running the full router over the demo data.
pub(crate) fn get_test_server() -> TestServer {
    TestServer::try_new(build_router(get_test_state())).expect("Could not create test server.")
}

/// Build the `Authorization` header value for HTTP Basic credentials.
#[track_caller]
pub(crate) fn basic_auth(username: &str, password: &str) -> HeaderValue {
    let mut values = Vec::new();
    Authorization::basic(username, password).encode(&mut values);

    values
        .pop()
        .expect("Authorization header should encode to a value")
}

/// Get the number of users in the database.
pub(crate) fn count_users(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM user;", [], |row| row.get(0))
        .map_err(|error| error.into())
}
