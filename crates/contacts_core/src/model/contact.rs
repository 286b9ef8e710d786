//! Contact/address domain model.
//!
//! # Responsibility
//! - Define stored records (`Contact`, `Address`) and insert drafts
//!   (`NewContact`, `NewAddress`).
//! - Validate drafts before any store commits them.
//!
//! # Invariants
//! - A stored `Contact` owns its addresses; there is no back-pointer.
//! - Every stored `Address::contact_id` equals the id of its owning contact.
//! - Ids are assigned by the store, never by callers.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned contact identifier. Monotonic, never reused.
pub type ContactId = i64;

/// Store-assigned address identifier. Monotonic, never reused.
pub type AddressId = i64;

/// Stored contact with its addresses eagerly loaded in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub addresses: Vec<Address>,
}

/// Stored address. `contact_id` is the foreign key to the owning contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub street: String,
    pub city: String,
    pub contact_id: ContactId,
}

impl Contact {
    /// Returns whether at least one address satisfies `predicate`.
    pub fn any_address(&self, predicate: impl Fn(&Address) -> bool) -> bool {
        self.addresses.iter().any(predicate)
    }
}

/// Insert-side contact draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    #[serde(default)]
    pub addresses: Vec<NewAddress>,
}

/// Insert-side address draft.
///
/// Fields are optional so that absent values in seed input survive
/// deserialization and are rejected by [`NewContact::validate`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAddress {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl NewContact {
    /// Creates a draft without addresses.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addresses: Vec::new(),
        }
    }

    /// Appends one fully populated address draft.
    pub fn with_address(mut self, street: impl Into<String>, city: impl Into<String>) -> Self {
        self.addresses.push(NewAddress::new(street, city));
        self
    }

    /// Validates required address fields.
    ///
    /// `contact_index` is the position of this draft inside its batch and is
    /// carried into the error for diagnostics.
    pub fn validate(&self, contact_index: usize) -> Result<(), ContactValidationError> {
        self.prepare(contact_index).map(|_| ())
    }

    fn prepare(&self, contact_index: usize) -> Result<PreparedContact, ContactValidationError> {
        let addresses = self
            .addresses
            .iter()
            .enumerate()
            .map(|(address_index, address)| address.prepare(contact_index, address_index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PreparedContact {
            name: self.name.clone(),
            addresses,
        })
    }
}

impl NewAddress {
    /// Creates a draft with both required fields present.
    pub fn new(street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: Some(street.into()),
            city: Some(city.into()),
        }
    }

    fn prepare(
        &self,
        contact_index: usize,
        address_index: usize,
    ) -> Result<PreparedAddress, ContactValidationError> {
        let Some(street) = self.street.clone() else {
            return Err(ContactValidationError::MissingStreet {
                contact_index,
                address_index,
            });
        };
        let Some(city) = self.city.clone() else {
            return Err(ContactValidationError::MissingCity {
                contact_index,
                address_index,
            });
        };
        Ok(PreparedAddress { street, city })
    }
}

/// Validates a whole batch, stopping at the first malformed draft.
pub fn validate_batch(batch: &[NewContact]) -> Result<(), ContactValidationError> {
    prepare_batch(batch).map(|_| ())
}

/// Draft whose required fields have all been checked.
#[derive(Debug, Clone)]
pub(crate) struct PreparedContact {
    pub(crate) name: String,
    pub(crate) addresses: Vec<PreparedAddress>,
}

#[derive(Debug, Clone)]
pub(crate) struct PreparedAddress {
    pub(crate) street: String,
    pub(crate) city: String,
}

/// Checks every draft of `batch` and returns them ready to commit.
///
/// Backends commit only the output of this function, so a single malformed
/// draft keeps the whole batch out of the store.
pub(crate) fn prepare_batch(
    batch: &[NewContact],
) -> Result<Vec<PreparedContact>, ContactValidationError> {
    batch
        .iter()
        .enumerate()
        .map(|(index, contact)| contact.prepare(index))
        .collect()
}

/// Validation errors for insert drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    MissingStreet {
        contact_index: usize,
        address_index: usize,
    },
    MissingCity {
        contact_index: usize,
        address_index: usize,
    },
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingStreet {
                contact_index,
                address_index,
            } => write!(
                f,
                "address {address_index} of contact {contact_index} is missing `street`"
            ),
            Self::MissingCity {
                contact_index,
                address_index,
            } => write!(
                f,
                "address {address_index} of contact {contact_index} is missing `city`"
            ),
        }
    }
}

impl Error for ContactValidationError {}
