//! Contact repository contract and shared error types.
//!
//! # Responsibility
//! - Define the store operations every backend must provide.
//! - Map validation and transport failures into one repository error.
//!
//! # Invariants
//! - `insert_contacts` validates the whole batch before committing any row.
//! - Reads return contacts in id order with addresses in insertion order.
//! - Lookups by id return `Ok(None)` for unknown ids instead of failing.

use crate::db::DbError;
use crate::model::contact::{
    Address, AddressId, Contact, ContactId, ContactValidationError, NewContact,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Predicate evaluated against one stored address.
pub type AddressPredicate<'a> = &'a dyn Fn(&Address) -> bool;

/// Generic repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Malformed insert draft; nothing from the batch was committed.
    InvalidArgument(ContactValidationError),
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(err) => write!(f, "invalid argument: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "contact repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::InvalidArgument(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the contact/address association store.
pub trait ContactRepository {
    /// Assigns ids, links addresses to their contacts and commits the batch.
    ///
    /// Returns the new contact ids in batch order.
    fn insert_contacts(&mut self, batch: &[NewContact]) -> RepoResult<Vec<ContactId>>;
    /// Returns whether no contact has been stored yet.
    fn is_empty(&self) -> RepoResult<bool>;
    /// Lists every contact with addresses eagerly populated.
    fn all_contacts(&self) -> RepoResult<Vec<Contact>>;
    /// Lists contacts having at least one address matching `predicate`.
    fn find_contacts(&self, predicate: AddressPredicate<'_>) -> RepoResult<Vec<Contact>>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    fn get_address(&self, id: AddressId) -> RepoResult<Option<Address>>;
    /// Resolves the owning contact of `address` through its foreign key.
    fn contact_of(&self, address: &Address) -> RepoResult<Option<Contact>> {
        self.get_contact(address.contact_id)
    }
}

/// Counts addresses across a batch of drafts.
pub(crate) fn batch_address_count(batch: &[NewContact]) -> usize {
    batch.iter().map(|contact| contact.addresses.len()).sum()
}
