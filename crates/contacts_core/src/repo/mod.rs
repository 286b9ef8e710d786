//! Repository layer abstractions and store implementations.
//!
//! # Responsibility
//! - Define the contact/address store contract.
//! - Provide an in-memory backend and a SQLite backend behind it.
//!
//! # Invariants
//! - Every write path validates the whole batch before committing.
//! - Both backends return identical shapes for identical inserts.

pub mod contact_repo;
pub mod memory_repo;
pub mod sqlite_repo;
