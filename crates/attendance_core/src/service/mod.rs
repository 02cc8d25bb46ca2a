//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into session-level roster operations.
//! - Keep the console layer decoupled from file formats.

pub mod roster_service;
pub mod session;
