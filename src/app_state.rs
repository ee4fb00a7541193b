//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error, cash_card::SQLiteCashCardStore, db::initialize, pagination::PaginationConfig,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection, used directly for looking up users.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The store for cash cards, sharing `db_connection`.
    pub cash_card_store: SQLiteCashCardStore,

    /// The config that controls how to page lists of cash cards.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, pagination_config: PaginationConfig) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            cash_card_store: SQLiteCashCardStore::new(connection.clone()),
            db_connection: connection,
            pagination_config,
        })
    }
}
