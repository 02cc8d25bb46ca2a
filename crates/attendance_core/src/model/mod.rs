//! Roster domain model.
//!
//! # Responsibility
//! - Define the canonical student record shared by every persistence path.
//! - Keep attendance answers and name rules in one place.
//!
//! # Invariants
//! - A record is identified by its `(first_name, last_name)` pair only.
//! - "Not yet recorded" is never conflated with an explicit absence.

pub mod record;
