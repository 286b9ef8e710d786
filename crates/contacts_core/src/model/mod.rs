//! Domain model for contacts and their addresses.
//!
//! # Responsibility
//! - Define the parent/child records shared by every store backend.
//!
//! # Invariants
//! - Contacts own addresses; addresses refer back only by `contact_id`.
//! - Ids are store-assigned and never reused within one store instance.

pub mod contact;
