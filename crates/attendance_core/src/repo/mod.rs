//! Roster persistence.
//!
//! # Responsibility
//! - Define the roster storage contract used by services.
//! - Isolate file handling and format choice from session orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`SourceNotFound`,
//!   `RecordNotFound`) in addition to I/O and format errors.
//! - Names are validated before any byte is written.

pub mod roster_repo;
