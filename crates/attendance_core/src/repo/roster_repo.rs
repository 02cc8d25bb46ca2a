//! Roster repository contract and file-backed implementation.
//!
//! # Responsibility
//! - Provide import/export/add/edit over one roster file.
//! - Keep file access and format selection inside the persistence boundary.
//!
//! # Invariants
//! - `import`/`export` use the headerless format; `add`/`edit` use the
//!   headered format. The two are never mixed within one operation.
//! - `export` and `edit` validate or scan fully before rewriting; on any
//!   failure the file keeps its prior content.
//! - `add` writes header (if needed) and row with a single append.
//! - Log events carry counts and timings only, never student names.

use crate::codec::headered::{parse_table, render_added_row, render_header, render_table};
use crate::codec::plain::{decode_records, encode_records};
use crate::codec::CodecError;
use crate::model::record::{validate_name, NameField, Record, RecordValidationError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for roster persistence operations.
#[derive(Debug)]
pub enum StoreError {
    /// The roster file does not exist.
    SourceNotFound(PathBuf),
    /// No row carries the requested identity pair.
    RecordNotFound {
        first_name: String,
        last_name: String,
    },
    Format(CodecError),
    Validation(RecordValidationError),
    Io { path: PathBuf, source: io::Error },
}

impl StoreError {
    /// Returns whether this is either flavour of "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound(_) | Self::RecordNotFound { .. })
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SourceNotFound(_) => "source_not_found",
            Self::RecordNotFound { .. } => "record_not_found",
            Self::Format(_) => "format",
            Self::Validation(_) => "validation",
            Self::Io { .. } => "io",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceNotFound(path) => {
                write!(f, "the file `{}` was not found", path.display())
            }
            Self::RecordNotFound {
                first_name,
                last_name,
            } => write!(f, "student {first_name} {last_name} not found in the file"),
            Self::Format(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Format(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::SourceNotFound(_) | Self::RecordNotFound { .. } => None,
        }
    }
}

impl From<CodecError> for StoreError {
    fn from(value: CodecError) -> Self {
        Self::Format(value)
    }
}

impl From<RecordValidationError> for StoreError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for roster persistence.
pub trait RosterRepository {
    /// Loads the whole roster. Does not touch any caller-held state.
    fn import_roster(&self) -> StoreResult<Vec<Record>>;
    /// Overwrites the roster file with `roster`.
    fn export_roster(&self, roster: &[Record]) -> StoreResult<()>;
    /// Appends one student row. Not idempotent.
    fn add_student(&self, first_name: &str, last_name: &str) -> StoreResult<()>;
    /// Renames the first student matching the old identity pair.
    fn edit_student(
        &self,
        old_first_name: &str,
        old_last_name: &str,
        new_first_name: &str,
        new_last_name: &str,
    ) -> StoreResult<()>;
}

/// Roster repository bound to one file on disk.
#[derive(Debug, Clone)]
pub struct FileRosterRepository {
    path: PathBuf,
}

impl FileRosterRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_source(&self) -> StoreResult<String> {
        fs::read_to_string(&self.path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                StoreError::SourceNotFound(self.path.clone())
            } else {
                self.io_error(err)
            }
        })
    }

    fn overwrite(&self, contents: &str) -> StoreResult<()> {
        fs::write(&self.path, contents).map_err(|err| self.io_error(err))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RosterRepository for FileRosterRepository {
    fn import_roster(&self) -> StoreResult<Vec<Record>> {
        let started_at = Instant::now();
        let result = self
            .read_source()
            .and_then(|text| decode_records(&text).map_err(StoreError::from));
        match &result {
            Ok(records) => info!(
                "event=roster_import module=repo status=ok records={} duration_ms={}",
                records.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("roster_import", started_at, err),
        }
        result
    }

    fn export_roster(&self, roster: &[Record]) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = roster
            .iter()
            .try_for_each(Record::validate)
            .map_err(StoreError::from)
            .and_then(|()| self.overwrite(&encode_records(roster)));
        match &result {
            Ok(()) => info!(
                "event=roster_export module=repo status=ok records={} duration_ms={}",
                roster.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("roster_export", started_at, err),
        }
        result
    }

    fn add_student(&self, first_name: &str, last_name: &str) -> StoreResult<()> {
        let started_at = Instant::now();
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        validate_name(NameField::First, first_name)?;
        validate_name(NameField::Last, last_name)?;

        let file_exists = self.path.is_file();
        let mut chunk = String::new();
        if !file_exists {
            chunk.push_str(&render_header());
        }
        chunk.push_str(&render_added_row(first_name, last_name));

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(chunk.as_bytes()))
            .map_err(|err| self.io_error(err));
        match &result {
            Ok(()) => info!(
                "event=roster_add module=repo status=ok created_file={} duration_ms={}",
                !file_exists,
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("roster_add", started_at, err),
        }
        result
    }

    fn edit_student(
        &self,
        old_first_name: &str,
        old_last_name: &str,
        new_first_name: &str,
        new_last_name: &str,
    ) -> StoreResult<()> {
        let started_at = Instant::now();
        let old_first_name = old_first_name.trim();
        let old_last_name = old_last_name.trim();
        let new_first_name = new_first_name.trim();
        let new_last_name = new_last_name.trim();
        validate_name(NameField::First, new_first_name)?;
        validate_name(NameField::Last, new_last_name)?;

        let result = self.read_source().and_then(|text| {
            let mut table = parse_table(&text)?;
            if !table.rename_first(old_first_name, old_last_name, new_first_name, new_last_name)
            {
                return Err(StoreError::RecordNotFound {
                    first_name: old_first_name.to_string(),
                    last_name: old_last_name.to_string(),
                });
            }
            self.overwrite(&render_table(&table))?;
            Ok(table.rows.len())
        });
        match result {
            Ok(rows) => {
                info!(
                    "event=roster_edit module=repo status=ok rows={} duration_ms={}",
                    rows,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                log_failure("roster_edit", started_at, &err);
                Err(err)
            }
        }
    }
}

fn log_failure(event: &str, started_at: Instant, err: &StoreError) {
    let duration_ms = started_at.elapsed().as_millis();
    if err.is_not_found() {
        warn!(
            "event={event} module=repo status=not_found duration_ms={duration_ms} error_code={}",
            err.error_code()
        );
    } else {
        error!(
            "event={event} module=repo status=error duration_ms={duration_ms} error_code={}",
            err.error_code()
        );
    }
}
