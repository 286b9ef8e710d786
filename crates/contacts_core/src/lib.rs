//! Core of the contacts demo: a parent/child association store.
//! Contacts own their addresses; addresses refer back by `contact_id` only.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{
    validate_batch, Address, AddressId, Contact, ContactId, ContactValidationError, NewAddress,
    NewContact,
};
pub use repo::contact_repo::{AddressPredicate, ContactRepository, RepoError, RepoResult};
pub use repo::memory_repo::{ContactIter, MemoryContactRepository};
pub use repo::sqlite_repo::SqliteContactRepository;
pub use seed::{canonical_contacts, load_seed_file, parse_seed_json, SeedError};
pub use service::contact_service::{AddressLine, ContactListing, ContactQueryService, SeedOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
