//! Code for creating the user table and fetching users from the database.

use std::{fmt::Display, str::FromStr};

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, PasswordHash};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, such as cash card IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The name a user logs in with.
///
/// Cash cards record their owner by username.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Username(String);

impl Username {
    /// Create a username from a non-empty string.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    /// Returns [Error::InvalidCredentials] if `username` is empty or only whitespace.
    pub fn new(username: &str) -> Result<Self, Error> {
        let username = username.trim();

        if username.is_empty() {
            Err(Error::InvalidCredentials)
        } else {
            Ok(Self(username.to_owned()))
        }
    }

    /// Create a username without checking that it is non-empty.
    ///
    /// The caller should ensure `username` is non-empty, e.g. a value read back from the database.
    pub fn new_unchecked(username: &str) -> Self {
        Self(username.to_owned())
    }

    /// The username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// What a user is allowed to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum Role {
    /// The user may create, fetch and list their own cash cards.
    #[serde(rename = "CARD-OWNER")]
    CardOwner,
    /// The user can authenticate but may not use the cash card API.
    #[serde(rename = "NON-OWNER")]
    NonOwner,
}

impl Role {
    /// The string stored in the database for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::CardOwner => "CARD-OWNER",
            Role::NonOwner => "NON-OWNER",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CARD-OWNER" => Ok(Role::CardOwner),
            "NON-OWNER" => Ok(Role::NonOwner),
            other => Err(Error::InvalidRole(other.to_owned())),
        }
    }
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The name the user logs in with.
    pub username: Username,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// What the user is allowed to do.
    pub role: Role,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                role TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns a:
/// - [Error::DuplicateUsername] if `username` is already taken,
/// - or [Error::SqlError] if some other SQL related error occurred.
pub fn create_user(
    username: Username,
    password_hash: PasswordHash,
    role: Role,
    connection: &Connection,
) -> Result<User, Error> {
    connection
        .execute(
            "INSERT INTO user (username, password, role) VALUES (?1, ?2, ?3)",
            (username.as_str(), password_hash.as_ref(), role.as_str()),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateUsername(username.to_string()),
            error => error.into(),
        })?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        username,
        password_hash,
        role,
    })
}

/// Get the user from the database whose username is `username`.
///
/// # Errors
///
/// This function will return an error if:
/// - `username` does not belong to a registered user ([Error::NotFound]),
/// - the stored role is not a known role,
/// - or there was an error trying to access the database.
pub fn get_user_by_username(username: &str, connection: &Connection) -> Result<User, Error> {
    let (id, username, password_hash, role) = connection
        .prepare("SELECT id, username, password, role FROM user WHERE username = :username")?
        .query_row(&[(":username", &username)], map_user_row)?;

    Ok(User {
        id,
        username,
        password_hash,
        role: role.parse()?,
    })
}

fn map_user_row(row: &Row) -> Result<(UserID, Username, PasswordHash, String), rusqlite::Error> {
    let raw_id = row.get(0)?;
    let raw_username: String = row.get(1)?;
    let raw_password_hash: String = row.get(2)?;
    let raw_role = row.get(3)?;

    Ok((
        UserID::new(raw_id),
        Username::new_unchecked(&raw_username),
        PasswordHash::new_unchecked(&raw_password_hash),
        raw_role,
    ))
}
