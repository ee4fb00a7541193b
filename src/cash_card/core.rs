//! Defines the cash card data model and its table.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::user::Username;

/// Alias for the integer type used for cash card IDs.
pub type CashCardId = i64;

/// A monetary record that belongs to a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashCard {
    /// The ID of the cash card, assigned by the store.
    pub id: CashCardId,
    /// The amount of money on the card.
    pub amount: f64,
    /// The username of the user that created the card.
    pub owner: Username,
}

/// A cash card that has not been saved yet.
///
/// The owner always comes from the authenticated user, never from the client.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCashCard {
    /// The amount of money on the card.
    pub amount: f64,
    /// The username of the user creating the card.
    pub owner: Username,
}

/// Create the cash card table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_cash_card_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS cash_card (
                id INTEGER PRIMARY KEY,
                amount REAL NOT NULL,
                owner TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

pub(super) fn map_cash_card_row(row: &Row) -> Result<CashCard, rusqlite::Error> {
    let raw_owner: String = row.get(2)?;

    Ok(CashCard {
        id: row.get(0)?,
        amount: row.get(1)?,
        owner: Username::new_unchecked(&raw_owner),
    })
}
