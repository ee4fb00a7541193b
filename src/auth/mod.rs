//! HTTP Basic authentication and the card owner role check.

mod middleware;

use rusqlite::Connection;

use crate::{
    Error,
    user::{Role, User, Username, get_user_by_username},
};

pub use middleware::{AuthState, auth_guard, basic_auth_middleware};

/// The `WWW-Authenticate` header value sent with 401 responses.
pub(crate) const WWW_AUTHENTICATE_CHALLENGE: &str = "Basic realm=\"cashcards\"";

/// The authenticated user making a request.
///
/// The auth middleware places this in the request extensions, route handlers
/// receive it with `Extension(principal): Extension<Principal>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    /// The name the user authenticated with.
    pub username: Username,
    /// What the user is allowed to do.
    pub role: Role,
}

/// Check `username` and `password` against the registered users.
///
/// # Errors
/// Returns a:
/// - [Error::InvalidCredentials] if the user does not exist or the password is wrong,
/// - [Error::HashingError] if the stored hash could not be checked,
/// - or any other error from reading the user table.
pub fn authenticate(
    username: &str,
    password: &str,
    connection: &Connection,
) -> Result<Principal, Error> {
    let user = find_user(username, connection)?;

    verify_password(user, password)
}

/// Look up the user logging in as `username`.
///
/// An unknown username is reported as [Error::InvalidCredentials].
pub(crate) fn find_user(username: &str, connection: &Connection) -> Result<User, Error> {
    match get_user_by_username(username, connection) {
        Ok(user) => Ok(user),
        Err(Error::NotFound) => {
            tracing::warn!("rejected credentials for unknown user \"{username}\"");
            Err(Error::InvalidCredentials)
        }
        Err(error) => Err(error),
    }
}

/// Check `password` against the stored hash for `user`.
///
/// This is slow on purpose, callers must not hold the database lock while it runs.
pub(crate) fn verify_password(user: User, password: &str) -> Result<Principal, Error> {
    match user.password_hash.verify(password) {
        Ok(true) => Ok(Principal {
            username: user.username,
            role: user.role,
        }),
        Ok(false) => {
            tracing::warn!("rejected wrong password for user \"{}\"", user.username);
            Err(Error::InvalidCredentials)
        }
        Err(error) => {
            tracing::error!("Error verifying password: {error}");
            Err(Error::HashingError(error.to_string()))
        }
    }
}

#[cfg(test)]
mod authenticate_tests {
    use rusqlite::Connection;

    use crate::{
        Error, PasswordHash, ValidatedPassword,
        auth::{Principal, authenticate},
        db::initialize,
        user::{Role, Username, create_user},
    };

    fn get_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        create_user(
            Username::new_unchecked("sarah1"),
            PasswordHash::new(ValidatedPassword::new_unchecked("abc123"), 4).unwrap(),
            Role::CardOwner,
            &connection,
        )
        .unwrap();

        connection
    }

    #[test]
    fn succeeds_with_correct_password() {
        let connection = get_connection();

        assert_eq!(
            authenticate("sarah1", "abc123", &connection),
            Ok(Principal {
                username: Username::new_unchecked("sarah1"),
                role: Role::CardOwner,
            })
        );
    }

    #[test]
    fn fails_with_unknown_user() {
        let connection = get_connection();

        assert_eq!(
            authenticate("BAD-USER", "abc123", &connection),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn fails_with_wrong_password() {
        let connection = get_connection();

        assert_eq!(
            authenticate("sarah1", "BAD-PASSWORD", &connection),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn fails_with_corrupt_hash() {
        let connection = get_connection();
        connection
            .execute(
                "UPDATE user SET password = 'not a bcrypt hash' WHERE username = 'sarah1'",
                (),
            )
            .unwrap();

        assert!(matches!(
            authenticate("sarah1", "abc123", &connection),
            Err(Error::HashingError(_))
        ));
    }
}
