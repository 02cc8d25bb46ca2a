//! Attendance-taking session.
//!
//! # Responsibility
//! - Collect `(full name, PRESENT|ABSENT)` entries gathered interactively.
//! - Allow correcting the status of an entry by its session id.
//! - Project the session into roster records for export.
//!
//! # Invariants
//! - Session ids start at 1 and increase by one per recorded entry.
//! - Session ids are local to one session and never persisted.
//! - Every entry holds names that pass record validation.

use crate::model::record::{parse_attendance_token, validate_name, InputError, NameField, Record};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

static FULL_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S+)\s+(.+)$").expect("valid full name regex"));

/// Session-local student identifier.
pub type SessionId = u32;

/// Attendance status captured during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Present,
    Absent,
}

impl SessionStatus {
    /// Maps a `yes`/`no` answer to a status.
    pub fn from_answer(answer: &str) -> Result<Self, InputError> {
        Ok(if parse_attendance_token(answer)? {
            Self::Present
        } else {
            Self::Absent
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "PRESENT",
            Self::Absent => "ABSENT",
        }
    }

    pub fn is_present(self) -> bool {
        self == Self::Present
    }
}

impl Display for SessionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One student captured during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub first_name: String,
    pub last_name: String,
    pub status: SessionStatus,
}

impl SessionEntry {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Ordered, in-memory attendance session keyed by session id.
#[derive(Debug, Clone)]
pub struct AttendanceSession {
    entries: BTreeMap<SessionId, SessionEntry>,
    next_id: SessionId,
}

impl Default for AttendanceSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceSession {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Records one student and returns the assigned session id.
    ///
    /// `full_name` is split on its first whitespace run: the first token is
    /// the first name, the rest is the last name.
    ///
    /// # Errors
    /// - `InputError::UnsplittableName` when the name has no whitespace.
    /// - `InputError::InvalidName` when either part breaks the name rules.
    pub fn record(
        &mut self,
        full_name: &str,
        status: SessionStatus,
    ) -> Result<SessionId, InputError> {
        let (first_name, last_name) = split_full_name(full_name)?;
        let id = self.next_id;
        self.entries.insert(
            id,
            SessionEntry {
                first_name,
                last_name,
                status,
            },
        );
        self.next_id += 1;
        Ok(id)
    }

    /// Overwrites the status of an existing entry.
    pub fn set_status(&mut self, id: SessionId, status: SessionStatus) -> Result<(), InputError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(InputError::UnknownSessionId(id))?;
        entry.status = status;
        Ok(())
    }

    pub fn get(&self, id: SessionId) -> Option<&SessionEntry> {
        self.entries.get(&id)
    }

    /// Iterates entries in session id order.
    pub fn iter(&self) -> impl Iterator<Item = (SessionId, &SessionEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Projects entries into roster records, in session id order.
    pub fn to_records(&self) -> Vec<Record> {
        self.entries
            .values()
            .map(|entry| {
                Record::recorded(
                    entry.first_name.as_str(),
                    entry.last_name.as_str(),
                    entry.status.is_present(),
                )
            })
            .collect()
    }
}

/// Splits `"First Last"` into its two name parts.
pub fn split_full_name(full_name: &str) -> Result<(String, String), InputError> {
    let trimmed = full_name.trim();
    let captures = FULL_NAME_RE
        .captures(trimmed)
        .ok_or_else(|| InputError::UnsplittableName(trimmed.to_string()))?;
    let first_name = captures[1].to_string();
    let last_name = captures[2].trim().to_string();
    validate_name(NameField::First, &first_name)?;
    validate_name(NameField::Last, &last_name)?;
    Ok((first_name, last_name))
}

#[cfg(test)]
mod tests {
    use super::{split_full_name, AttendanceSession, SessionStatus};
    use crate::model::record::{InputError, Record};

    #[test]
    fn split_full_name_uses_first_whitespace_run() {
        assert_eq!(
            split_full_name("  Mary   Ann Lee ").unwrap(),
            ("Mary".to_string(), "Ann Lee".to_string())
        );
        assert_eq!(
            split_full_name("Cher"),
            Err(InputError::UnsplittableName("Cher".to_string()))
        );
        assert!(matches!(
            split_full_name("John,Q Public"),
            Err(InputError::InvalidName(_))
        ));
    }

    #[test]
    fn record_assigns_incrementing_ids_from_one() {
        let mut session = AttendanceSession::new();
        assert_eq!(session.record("John Doe", SessionStatus::Present), Ok(1));
        assert!(session.record("Nobody", SessionStatus::Absent).is_err());
        assert_eq!(session.record("Jane Smith", SessionStatus::Absent), Ok(2));
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn set_status_overwrites_existing_and_rejects_unknown() {
        let mut session = AttendanceSession::new();
        let id = session.record("John Doe", SessionStatus::Absent).unwrap();

        session.set_status(id, SessionStatus::Present).unwrap();
        assert_eq!(session.get(id).unwrap().status, SessionStatus::Present);
        assert_eq!(
            session.set_status(7, SessionStatus::Absent),
            Err(InputError::UnknownSessionId(7))
        );
    }

    #[test]
    fn to_records_keeps_id_order() {
        let mut session = AttendanceSession::new();
        session.record("John Doe", SessionStatus::Present).unwrap();
        session.record("Jane Smith", SessionStatus::Absent).unwrap();
        assert_eq!(
            session.to_records(),
            vec![
                Record::recorded("John", "Doe", true),
                Record::recorded("Jane", "Smith", false),
            ]
        );
    }

    #[test]
    fn status_tokens_render_uppercase() {
        assert_eq!(SessionStatus::from_answer("YES"), Ok(SessionStatus::Present));
        assert_eq!(SessionStatus::Absent.to_string(), "ABSENT");
    }
}
