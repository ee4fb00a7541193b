//! Sets up the application's SQLite database.

use rusqlite::{Connection, Error};

use crate::{cash_card::create_cash_card_table, user::create_user_table};

/// Create the tables for the domain models if they do not already exist.
///
/// Calling this on an already initialized database is a no-op.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    create_user_table(&transaction)?;
    create_cash_card_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
