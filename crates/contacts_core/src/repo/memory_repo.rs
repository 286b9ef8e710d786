//! In-memory contact repository.
//!
//! # Responsibility
//! - Own the authoritative contact and address collections.
//! - Keep each contact's address list and every address foreign key in sync.
//!
//! # Invariants
//! - `contacts` is sorted by id because ids grow monotonically on insert.
//! - `address_owner` maps every stored address id to its owning contact id.
//! - Id counters never move backwards, so ids are never reused.

use crate::model::contact::{prepare_batch, Address, AddressId, Contact, ContactId, NewContact};
use crate::repo::contact_repo::{
    batch_address_count, AddressPredicate, ContactRepository, RepoError, RepoResult,
};
use log::{info, warn};
use std::collections::HashMap;
use std::slice;

/// Contact store backed by plain collections.
#[derive(Debug, Clone)]
pub struct MemoryContactRepository {
    contacts: Vec<Contact>,
    address_owner: HashMap<AddressId, ContactId>,
    next_contact_id: ContactId,
    next_address_id: AddressId,
}

impl Default for MemoryContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryContactRepository {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            address_owner: HashMap::new(),
            next_contact_id: 1,
            next_address_id: 1,
        }
    }

    /// Returns a lazy iterator over the live contacts in id order.
    ///
    /// Each call starts a fresh pass, so the sequence is restartable.
    pub fn contacts(&self) -> ContactIter<'_> {
        ContactIter {
            inner: self.contacts.iter(),
        }
    }

    fn position_of(&self, id: ContactId) -> Option<usize> {
        self.contacts
            .binary_search_by_key(&id, |contact| contact.id)
            .ok()
    }
}

/// Borrowing iterator returned by [`MemoryContactRepository::contacts`].
#[derive(Debug, Clone)]
pub struct ContactIter<'store> {
    inner: slice::Iter<'store, Contact>,
}

impl<'store> Iterator for ContactIter<'store> {
    type Item = &'store Contact;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ContactIter<'_> {}

impl ContactRepository for MemoryContactRepository {
    fn insert_contacts(&mut self, batch: &[NewContact]) -> RepoResult<Vec<ContactId>> {
        let prepared = match prepare_batch(batch) {
            Ok(prepared) => prepared,
            Err(err) => {
                warn!(
                    "event=contacts_insert module=repo backend=memory status=rejected contacts={} error={}",
                    batch.len(),
                    err
                );
                return Err(RepoError::InvalidArgument(err));
            }
        };

        let mut ids = Vec::with_capacity(prepared.len());
        for draft in prepared {
            let contact_id = self.next_contact_id;
            self.next_contact_id += 1;

            let mut addresses = Vec::with_capacity(draft.addresses.len());
            for address in draft.addresses {
                let address_id = self.next_address_id;
                self.next_address_id += 1;
                self.address_owner.insert(address_id, contact_id);
                addresses.push(Address {
                    id: address_id,
                    street: address.street,
                    city: address.city,
                    contact_id,
                });
            }

            self.contacts.push(Contact {
                id: contact_id,
                name: draft.name,
                addresses,
            });
            ids.push(contact_id);
        }

        info!(
            "event=contacts_insert module=repo backend=memory status=ok contacts={} addresses={}",
            ids.len(),
            batch_address_count(batch)
        );
        Ok(ids)
    }

    fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.contacts.is_empty())
    }

    fn all_contacts(&self) -> RepoResult<Vec<Contact>> {
        Ok(self.contacts().cloned().collect())
    }

    fn find_contacts(&self, predicate: AddressPredicate<'_>) -> RepoResult<Vec<Contact>> {
        Ok(self
            .contacts()
            .filter(|contact| contact.any_address(predicate))
            .cloned()
            .collect())
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        Ok(self
            .position_of(id)
            .map(|position| self.contacts[position].clone()))
    }

    fn get_address(&self, id: AddressId) -> RepoResult<Option<Address>> {
        let Some(owner) = self.address_owner.get(&id) else {
            return Ok(None);
        };
        let contact = self.position_of(*owner).map(|position| &self.contacts[position]);
        match contact.and_then(|contact| contact.addresses.iter().find(|a| a.id == id)) {
            Some(address) => Ok(Some(address.clone())),
            None => Err(RepoError::InvalidData(format!(
                "address {id} indexed under missing contact {owner}"
            ))),
        }
    }
}
