//! The demo users and cash cards used by `create_test_db` and the tests.

use rusqlite::Connection;

use crate::{
    Error, PasswordHash, ValidatedPassword,
    user::{Role, Username, create_user},
};

/// The demo users as `(username, password, role)`.
pub const DEMO_USERS: [(&str, &str, Role); 3] = [
    ("sarah1", "abc123", Role::CardOwner),
    ("kumar2", "xyz789", Role::CardOwner),
    ("hank-owns-no-cards", "qrs456", Role::NonOwner),
];

/// The demo cash cards as `(id, amount, owner)`.
pub const DEMO_CASH_CARDS: [(i64, f64, &str); 4] = [
    (99, 123.45, "sarah1"),
    (100, 1.00, "sarah1"),
    (101, 150.00, "sarah1"),
    (102, 200.00, "kumar2"),
];

/// Insert the demo users and cash cards into an initialized database.
///
/// The demo passwords are too weak to pass [ValidatedPassword::new] and skip validation.
/// `password_cost` is the bcrypt cost, tests use a low cost to stay fast.
///
/// # Errors
/// Returns an error if a demo user or cash card already exists, or on any other SQL error.
pub fn seed_demo_data(connection: &Connection, password_cost: u32) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    for (username, password, role) in DEMO_USERS {
        let password_hash =
            PasswordHash::new(ValidatedPassword::new_unchecked(password), password_cost)?;
        create_user(
            Username::new_unchecked(username),
            password_hash,
            role,
            &transaction,
        )?;
    }

    // The IDs are fixed so the demo data can be referred to by ID.
    let mut statement =
        transaction.prepare("INSERT INTO cash_card (id, amount, owner) VALUES (?1, ?2, ?3)")?;
    for (id, amount, owner) in DEMO_CASH_CARDS {
        statement.execute((id, amount, owner))?;
    }
    drop(statement);

    transaction.commit()?;

    Ok(())
}
