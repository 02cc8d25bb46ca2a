//! Core roster logic for the attendance tracker.
//! This crate is the single source of truth for roster file invariants.

pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use codec::headered::{HeaderedRow, HeaderedTable};
pub use codec::plain::{decode_records, encode_records};
pub use codec::{CodecError, CodecResult};
pub use config::{AppConfig, ConfigError, ConfigOverrides};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{
    parse_attendance_token, Attendance, InputError, NameField, Record, RecordValidationError,
};
pub use repo::roster_repo::{FileRosterRepository, RosterRepository, StoreError, StoreResult};
pub use service::roster_service::{RosterService, ServiceError, ServiceResult};
pub use service::session::{AttendanceSession, SessionEntry, SessionId, SessionStatus};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
