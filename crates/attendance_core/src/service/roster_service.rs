//! Roster use-case service.
//!
//! # Responsibility
//! - Own the in-memory roster for one session.
//! - Keep that roster and the roster file in step for add/edit/import.
//!
//! # Invariants
//! - A failed import leaves the held roster unchanged.
//! - Records added through `add` start as `Attendance::Unrecorded`.
//! - Service APIs never bypass repository validation/persistence contracts.

use crate::model::record::{InputError, Record};
use crate::repo::roster_repo::{RosterRepository, StoreError};
use crate::service::session::AttendanceSession;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for roster use-cases.
#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    Input(InputError),
    /// Mark target is outside the held roster.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Input(err) => write!(f, "{err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "roster index {index} out of range for {len} students")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Input(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<InputError> for ServiceError {
    fn from(value: InputError) -> Self {
        Self::Input(value)
    }
}

/// Session-scoped roster owner on top of a repository.
pub struct RosterService<R: RosterRepository> {
    repo: R,
    roster: Vec<Record>,
}

impl<R: RosterRepository> RosterService<R> {
    /// Creates a service with an empty roster.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            roster: Vec::new(),
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Currently held roster, in order.
    pub fn roster(&self) -> &[Record] {
        &self.roster
    }

    /// Loads the roster file and adopts it as the held roster.
    pub fn import(&mut self) -> ServiceResult<&[Record]> {
        let records = self.repo.import_roster()?;
        debug!(
            "event=roster_adopt module=service source=import records={}",
            records.len()
        );
        self.roster = records;
        Ok(&self.roster)
    }

    /// Overwrites the roster file with the held roster.
    pub fn export(&self) -> ServiceResult<()> {
        self.repo.export_roster(&self.roster)?;
        Ok(())
    }

    /// Appends a student to the file and to the held roster.
    ///
    /// # Contract
    /// - Names are trimmed before use.
    /// - The held record starts unrecorded.
    pub fn add(&mut self, first_name: &str, last_name: &str) -> ServiceResult<&Record> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        self.repo.add_student(first_name, last_name)?;
        let index = self.roster.len();
        self.roster.push(Record::unrecorded(first_name, last_name));
        Ok(&self.roster[index])
    }

    /// Renames a student in the file, then in the held roster if present.
    ///
    /// All four names are trimmed before use, matching what the file holds
    /// after a read-back. Repository not-found errors are returned unchanged
    /// and leave the held roster untouched.
    pub fn edit(
        &mut self,
        old_first_name: &str,
        old_last_name: &str,
        new_first_name: &str,
        new_last_name: &str,
    ) -> ServiceResult<()> {
        let old_first_name = old_first_name.trim();
        let old_last_name = old_last_name.trim();
        let new_first_name = new_first_name.trim();
        let new_last_name = new_last_name.trim();
        self.repo
            .edit_student(old_first_name, old_last_name, new_first_name, new_last_name)?;
        if let Some(record) = self
            .roster
            .iter_mut()
            .find(|record| record.matches(old_first_name, old_last_name))
        {
            record.first_name = new_first_name.to_string();
            record.last_name = new_last_name.to_string();
        }
        Ok(())
    }

    /// Applies a `yes`/`no` answer to the held record at `index`.
    ///
    /// Returns the new present flag; an invalid answer leaves the record
    /// unchanged.
    pub fn mark(&mut self, index: usize, answer: &str) -> ServiceResult<bool> {
        let len = self.roster.len();
        let record = self
            .roster
            .get_mut(index)
            .ok_or(ServiceError::IndexOutOfRange { index, len })?;
        Ok(record.mark(answer)?)
    }

    /// Replaces the held roster with the records of an attendance session.
    pub fn adopt_session(&mut self, session: &AttendanceSession) {
        self.roster = session.to_records();
        debug!(
            "event=roster_adopt module=service source=session records={}",
            self.roster.len()
        );
    }
}
