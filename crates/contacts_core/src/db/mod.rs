//! SQLite plumbing behind `SqliteContactRepository`.
//!
//! # Responsibility
//! - Hand out private in-memory connections holding the `contacts` and
//!   `addresses` tables.
//! - Report schema/version mismatches separately from SQLite failures.
//!
//! # Invariants
//! - `addresses.contact_id` is a foreign key to `contacts.id`, enforced on
//!   every connection this module opens.
//! - The contact schema version lives in `PRAGMA user_version`; the
//!   repository only accepts connections at `migrations::latest_version()`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::open_db_in_memory;

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating a contact database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The connection holds a contact schema newer than this build knows.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "contact store sqlite failure: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "contacts/addresses schema is at version {db_version}, this build only knows up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
