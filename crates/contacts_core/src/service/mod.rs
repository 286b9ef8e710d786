//! Use-case services over the contact store.
//!
//! # Responsibility
//! - Turn repository reads into report-shaped results.
//! - Keep CLI callers decoupled from how a backend answers queries.

pub mod contact_service;
