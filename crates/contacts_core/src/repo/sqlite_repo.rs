//! SQLite-backed contact repository.
//!
//! # Responsibility
//! - Provide the `ContactRepository` contract over `contacts`/`addresses`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - The connection must be migrated to `latest_version()` before use.
//! - Bulk insert runs in one transaction after the whole batch validated.
//! - Reads group addresses under their contact in `id ASC` order.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::open_db_in_memory;
use crate::model::contact::{prepare_batch, Address, AddressId, Contact, ContactId, NewContact};
use crate::repo::contact_repo::{
    batch_address_count, AddressPredicate, ContactRepository, RepoError, RepoResult,
};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;

const CONTACT_SELECT_SQL: &str = "SELECT id, name FROM contacts";
const ADDRESS_SELECT_SQL: &str = "SELECT id, street, city, contact_id FROM addresses";

/// Contact store over a migrated SQLite connection.
pub struct SqliteContactRepository {
    conn: Connection,
}

impl SqliteContactRepository {
    /// Wraps a connection after checking its schema version.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let actual_version = schema_version(&conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    /// Opens a fresh in-memory database and wraps it.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    fn load_addresses(&self, contact_id: ContactId) -> RepoResult<Vec<Address>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ADDRESS_SELECT_SQL} WHERE contact_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([contact_id])?;
        let mut addresses = Vec::new();
        while let Some(row) = rows.next()? {
            addresses.push(parse_address_row(row)?);
        }
        Ok(addresses)
    }
}

impl ContactRepository for SqliteContactRepository {
    fn insert_contacts(&mut self, batch: &[NewContact]) -> RepoResult<Vec<ContactId>> {
        let prepared = match prepare_batch(batch) {
            Ok(prepared) => prepared,
            Err(err) => {
                warn!(
                    "event=contacts_insert module=repo backend=sqlite status=rejected contacts={} error={}",
                    batch.len(),
                    err
                );
                return Err(RepoError::InvalidArgument(err));
            }
        };

        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(prepared.len());
        for draft in &prepared {
            tx.execute(
                "INSERT INTO contacts (name) VALUES (?1);",
                [draft.name.as_str()],
            )?;
            let contact_id = tx.last_insert_rowid();
            for address in &draft.addresses {
                tx.execute(
                    "INSERT INTO addresses (street, city, contact_id) VALUES (?1, ?2, ?3);",
                    params![address.street.as_str(), address.city.as_str(), contact_id],
                )?;
            }
            ids.push(contact_id);
        }
        tx.commit()?;

        info!(
            "event=contacts_insert module=repo backend=sqlite status=ok contacts={} addresses={}",
            ids.len(),
            batch_address_count(batch)
        );
        Ok(ids)
    }

    fn is_empty(&self) -> RepoResult<bool> {
        let exists: i64 =
            self.conn
                .query_row("SELECT EXISTS(SELECT 1 FROM contacts);", [], |row| row.get(0))?;
        Ok(exists == 0)
    }

    fn all_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut by_contact: HashMap<ContactId, Vec<Address>> = HashMap::new();
        let mut stmt = self
            .conn
            .prepare(&format!("{ADDRESS_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let address = parse_address_row(row)?;
            by_contact
                .entry(address.contact_id)
                .or_default()
                .push(address);
        }

        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            let (id, name) = parse_contact_row(row)?;
            contacts.push(Contact {
                id,
                name,
                addresses: by_contact.remove(&id).unwrap_or_default(),
            });
        }

        if let Some(orphan_owner) = by_contact.keys().min() {
            return Err(RepoError::InvalidData(format!(
                "addresses reference missing contact {orphan_owner}"
            )));
        }

        Ok(contacts)
    }

    fn find_contacts(&self, predicate: AddressPredicate<'_>) -> RepoResult<Vec<Contact>> {
        let mut contacts = self.all_contacts()?;
        contacts.retain(|contact| contact.any_address(predicate));
        Ok(contacts)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let row = self
            .conn
            .query_row(
                &format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                |row| row.get::<_, String>("name"),
            )
            .optional()?;

        match row {
            Some(name) => Ok(Some(Contact {
                id,
                name,
                addresses: self.load_addresses(id)?,
            })),
            None => Ok(None),
        }
    }

    fn get_address(&self, id: AddressId) -> RepoResult<Option<Address>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ADDRESS_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_address_row(row)?));
        }
        Ok(None)
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<(ContactId, String)> {
    Ok((row.get("id")?, row.get("name")?))
}

fn parse_address_row(row: &Row<'_>) -> RepoResult<Address> {
    Ok(Address {
        id: row.get("id")?,
        street: row.get("street")?,
        city: row.get("city")?,
        contact_id: row.get("contact_id")?,
    })
}
