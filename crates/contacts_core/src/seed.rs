//! Seed data for the contact store.
//!
//! # Responsibility
//! - Provide the canonical demo batch.
//! - Load alternative batches from JSON seed files.
//!
//! # Invariants
//! - The canonical batch is a fixed literal; its order is the listing order.
//! - Loading never validates address fields; the store rejects bad drafts.

use crate::model::contact::NewContact;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Errors from reading a JSON seed file.
#[derive(Debug)]
pub enum SeedError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read seed file `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse seed file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Returns the canonical 13-contact demo batch.
pub fn canonical_contacts() -> Vec<NewContact> {
    vec![
        NewContact::new("Alice Smith")
            .with_address("123 Main St", "Springfield")
            .with_address("456 Oak Ave", "Shelbyville"),
        NewContact::new("Bob Johnson").with_address("789 Pine Rd", "Springfield"),
        NewContact::new("Carol White").with_address("101 Maple St", "Ogdenville"),
        NewContact::new("David Martinez")
            .with_address("234 Elm St", "Springfield")
            .with_address("567 Cedar Ln", "Capital City"),
        NewContact::new("Emma Davis").with_address("890 Birch Ave", "Shelbyville"),
        NewContact::new("Frank Wilson")
            .with_address("321 Willow Dr", "Ogdenville")
            .with_address("654 Spruce Way", "Springfield"),
        NewContact::new("Grace Lee").with_address("987 Aspen Ct", "Capital City"),
        NewContact::new("Henry Brown")
            .with_address("147 Poplar St", "Springfield")
            .with_address("258 Cherry Blvd", "Shelbyville")
            .with_address("369 Walnut Rd", "Ogdenville"),
        NewContact::new("Iris Chen").with_address("741 Magnolia Ave", "Capital City"),
        NewContact::new("Jack Thompson").with_address("852 Sycamore Ln", "Springfield"),
        NewContact::new("Kelly Anderson")
            .with_address("963 Hickory Dr", "Shelbyville")
            .with_address("159 Redwood Way", "Capital City"),
        NewContact::new("Liam Garcia").with_address("753 Cypress Ct", "Ogdenville"),
        NewContact::new("Maya Patel")
            .with_address("486 Beech St", "Springfield")
            .with_address("297 Dogwood Ave", "Shelbyville"),
    ]
}

/// Parses a JSON array of contact drafts.
pub fn parse_seed_json(json: &str) -> serde_json::Result<Vec<NewContact>> {
    serde_json::from_str(json)
}

/// Reads and parses a JSON seed file.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<NewContact>, SeedError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_seed_json(&text).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
