//! Student record domain model.
//!
//! # Responsibility
//! - Define the record stored once per roster line.
//! - Validate student names before they reach any file.
//! - Parse `yes`/`no` attendance answers and apply them to a record.
//!
//! # Invariants
//! - Names are non-empty after trimming.
//! - Names never contain the field delimiter or a line break.
//! - `Attendance::Unrecorded` only exists for records added in this session.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field separator shared by every roster file variant.
pub const FIELD_DELIMITER: char = ',';

const ANSWER_YES: &str = "yes";
const ANSWER_NO: &str = "no";

/// Attendance state of one student.
///
/// Serialized as `true`, `false` or `null` so JSON consumers see a plain
/// optional boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Attendance {
    /// An explicit present (`true`) or absent (`false`) mark.
    Recorded(bool),
    /// Added to the roster but never marked.
    #[default]
    Unrecorded,
}

impl Attendance {
    /// Returns `true` only for an explicit present mark.
    pub fn is_present(self) -> bool {
        matches!(self, Self::Recorded(true))
    }

    /// Returns whether any mark has been recorded.
    pub fn is_recorded(self) -> bool {
        matches!(self, Self::Recorded(_))
    }

    /// Human-readable state used by status lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Recorded(true) => "present",
            Self::Recorded(false) => "absent",
            Self::Unrecorded => "not recorded",
        }
    }
}

impl From<Option<bool>> for Attendance {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(present) => Self::Recorded(present),
            None => Self::Unrecorded,
        }
    }
}

impl From<Attendance> for Option<bool> {
    fn from(value: Attendance) -> Self {
        match value {
            Attendance::Recorded(present) => Some(present),
            Attendance::Unrecorded => None,
        }
    }
}

/// Which name slot a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    First,
    Last,
}

impl NameField {
    fn column(self) -> &'static str {
        match self {
            Self::First => "first_name",
            Self::Last => "last_name",
        }
    }
}

/// Validation failure for record names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyName(NameField),
    /// Name contains a delimiter or line break and would corrupt the file.
    ForbiddenCharacter { field: NameField, character: char },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName(field) => write!(f, "{} cannot be empty", field.column()),
            Self::ForbiddenCharacter { field, character } => write!(
                f,
                "{} cannot contain {:?}",
                field.column(),
                character
            ),
        }
    }
}

impl Error for RecordValidationError {}

/// Rejected caller input: names, answers or session ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Full name has no whitespace to split first from last name.
    UnsplittableName(String),
    /// Attendance answer other than `yes`/`no`.
    InvalidToken(String),
    InvalidName(RecordValidationError),
    UnknownSessionId(u32),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsplittableName(name) => {
                write!(f, "cannot split `{name}` into first and last name")
            }
            Self::InvalidToken(token) => {
                write!(f, "invalid attendance answer `{token}`; expected yes|no")
            }
            Self::InvalidName(err) => write!(f, "{err}"),
            Self::UnknownSessionId(id) => write!(f, "student id {id} not found"),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidName(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RecordValidationError> for InputError {
    fn from(value: RecordValidationError) -> Self {
        Self::InvalidName(value)
    }
}

/// One student in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub first_name: String,
    pub last_name: String,
    pub present: Attendance,
}

impl Record {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        present: Attendance,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            present,
        }
    }

    /// Creates a record with an explicit present/absent mark.
    pub fn recorded(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        present: bool,
    ) -> Self {
        Self::new(first_name, last_name, Attendance::Recorded(present))
    }

    /// Creates a freshly added record that has never been marked.
    pub fn unrecorded(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self::new(first_name, last_name, Attendance::Unrecorded)
    }

    /// Checks both name fields against the roster name rules.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_name(NameField::First, &self.first_name)?;
        validate_name(NameField::Last, &self.last_name)
    }

    /// Returns whether this record carries the given identity pair.
    pub fn matches(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies a `yes`/`no` answer to this record.
    ///
    /// Returns the new present flag. On an invalid answer the record is left
    /// unchanged and the caller decides whether to ask again.
    pub fn mark(&mut self, answer: &str) -> Result<bool, InputError> {
        let present = parse_attendance_token(answer)?;
        self.present = Attendance::Recorded(present);
        Ok(present)
    }

    /// Describes the current attendance state before asking for a new one.
    pub fn status_line(&self) -> String {
        if self.present.is_recorded() {
            format!("{} is currently {}", self.full_name(), self.present.label())
        } else {
            format!(
                "{} has not had their attendance recorded yet.",
                self.full_name()
            )
        }
    }
}

/// Parses an attendance answer: `yes` -> `true`, `no` -> `false`.
///
/// Case-insensitive; surrounding whitespace is ignored.
pub fn parse_attendance_token(answer: &str) -> Result<bool, InputError> {
    let normalized = answer.trim();
    if normalized.eq_ignore_ascii_case(ANSWER_YES) {
        Ok(true)
    } else if normalized.eq_ignore_ascii_case(ANSWER_NO) {
        Ok(false)
    } else {
        Err(InputError::InvalidToken(normalized.to_string()))
    }
}

/// Validates one name against the roster name rules.
pub fn validate_name(field: NameField, value: &str) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::EmptyName(field));
    }
    if let Some(character) = value
        .chars()
        .find(|ch| *ch == FIELD_DELIMITER || *ch == '\n' || *ch == '\r')
    {
        return Err(RecordValidationError::ForbiddenCharacter { field, character });
    }
    Ok(())
}
