//! Implements a SQLite backed cash card store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, params};

use crate::{
    Error,
    cash_card::{
        CashCard, CashCardId, CashCardStore, NewCashCard, PageRequest, SortField,
        core::map_cash_card_row,
    },
    user::Username,
};

const SELECT_CASH_CARD: &str = "SELECT id, amount, owner FROM cash_card";

/// Stores cash cards in a SQLite database.
///
/// The cash card table must exist, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteCashCardStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCashCardStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }

    fn query_page(
        &self,
        where_clause: &str,
        owner: Option<&Username>,
        page: &PageRequest,
    ) -> Result<Vec<CashCard>, Error> {
        // Break ties on ID so that rows do not move between pages.
        let order_clause = match page.sort.field {
            SortField::Id => format!("ORDER BY id {}", page.sort.direction.keyword()),
            field => format!(
                "ORDER BY {} {}, id ASC",
                field.column(),
                page.sort.direction.keyword()
            ),
        };

        let query = format!(
            "{SELECT_CASH_CARD} {where_clause} {order_clause} LIMIT :limit OFFSET :offset"
        );

        let connection = self.lock()?;
        let mut statement = connection.prepare(&query)?;
        let limit = page.limit();
        let offset = page.offset();

        let rows = match owner {
            Some(owner) => statement.query_map(
                &[
                    (":owner", &owner.as_str() as &dyn rusqlite::ToSql),
                    (":limit", &limit),
                    (":offset", &offset),
                ],
                map_cash_card_row,
            )?,
            None => statement.query_map(
                &[
                    (":limit", &limit as &dyn rusqlite::ToSql),
                    (":offset", &offset),
                ],
                map_cash_card_row,
            )?,
        };

        rows.map(|maybe_cash_card| maybe_cash_card.map_err(Error::from))
            .collect()
    }
}

impl CashCardStore for SQLiteCashCardStore {
    /// Retrieve a cash card in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid cash card,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get_by_id(&self, id: CashCardId) -> Result<CashCard, Error> {
        let cash_card = self
            .lock()?
            .prepare(&format!("{SELECT_CASH_CARD} WHERE id = :id"))?
            .query_row(&[(":id", &id)], map_cash_card_row)?;

        Ok(cash_card)
    }

    /// Retrieve a cash card in the database by its `id` and `owner`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a cash card owned by `owner`,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get_by_id_and_owner(&self, id: CashCardId, owner: &Username) -> Result<CashCard, Error> {
        let cash_card = self
            .lock()?
            .prepare(&format!(
                "{SELECT_CASH_CARD} WHERE id = ?1 AND owner = ?2"
            ))?
            .query_row(params![id, owner.as_str()], map_cash_card_row)?;

        Ok(cash_card)
    }

    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn list_page(&self, page: &PageRequest) -> Result<Vec<CashCard>, Error> {
        self.query_page("", None, page)
    }

    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn list_page_by_owner(
        &self,
        owner: &Username,
        page: &PageRequest,
    ) -> Result<Vec<CashCard>, Error> {
        self.query_page("WHERE owner = :owner", Some(owner), page)
    }

    /// Create a new cash card in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    fn insert(&mut self, cash_card: NewCashCard) -> Result<CashCard, Error> {
        let cash_card = self
            .lock()?
            .prepare(
                "INSERT INTO cash_card (amount, owner) VALUES (?1, ?2)
                 RETURNING id, amount, owner",
            )?
            .query_row(
                params![cash_card.amount, cash_card.owner.as_str()],
                map_cash_card_row,
            )?;

        Ok(cash_card)
    }
}
