//! Contact query facade.
//!
//! # Responsibility
//! - Present the read shapes callers need without exposing store queries.
//! - Run the seed-once routine on top of any repository backend.
//!
//! # Invariants
//! - Listing output is in contact id order with addresses in insertion order.
//! - `find_contacts_excluding_city` is existential: a contact qualifies when
//!   at least one of its addresses is outside the given city. Contacts
//!   without addresses never qualify.
//! - City comparison is exact and case-sensitive.

use crate::model::contact::{Address, Contact, NewContact};
use crate::repo::contact_repo::{batch_address_count, ContactRepository, RepoResult};
use log::info;
use serde::Serialize;

/// Projection of one contact for the full listing report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactListing {
    pub name: String,
    pub address_count: usize,
    pub addresses: Vec<AddressLine>,
}

/// Street/city pair shown under a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressLine {
    pub street: String,
    pub city: String,
}

/// Outcome of [`ContactQueryService::seed_if_empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The batch was inserted.
    Seeded { contacts: usize, addresses: usize },
    /// The store already held contacts; nothing was inserted.
    AlreadySeeded,
}

/// Read facade over a contact repository.
pub struct ContactQueryService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactQueryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository for direct lookups.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Inserts `batch` only when the store holds no contacts yet.
    pub fn seed_if_empty(&mut self, batch: &[NewContact]) -> RepoResult<SeedOutcome> {
        if !self.repo.is_empty()? {
            info!("event=contacts_seed module=service status=skipped reason=not_empty");
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let ids = self.repo.insert_contacts(batch)?;
        let addresses = batch_address_count(batch);
        info!(
            "event=contacts_seed module=service status=ok contacts={} addresses={}",
            ids.len(),
            addresses
        );
        Ok(SeedOutcome::Seeded {
            contacts: ids.len(),
            addresses,
        })
    }

    /// Lists every contact with its addresses.
    pub fn list_all_with_addresses(&self) -> RepoResult<Vec<ContactListing>> {
        Ok(self
            .repo
            .all_contacts()?
            .into_iter()
            .map(|contact| ContactListing {
                address_count: contact.addresses.len(),
                addresses: contact
                    .addresses
                    .into_iter()
                    .map(|address| AddressLine {
                        street: address.street,
                        city: address.city,
                    })
                    .collect(),
                name: contact.name,
            })
            .collect())
    }

    /// Returns contacts having at least one address whose city is not `city`.
    ///
    /// A contact with addresses both inside and outside `city` is included.
    pub fn find_contacts_excluding_city(&self, city: &str) -> RepoResult<Vec<Contact>> {
        self.repo.find_contacts(&|address: &Address| address.city != city)
    }
}
