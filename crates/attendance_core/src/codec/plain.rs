//! Headerless roster format used by import and export.
//!
//! Each line is `first_name,last_name[,present]`. On decode a missing third
//! field means absent and any third field other than `yes` (any case) means
//! absent too. Encoding always writes `yes` or `no`.

use super::{non_blank_lines, split_fields, CodecError, CodecResult};
use crate::model::record::{Attendance, Record};

const PRESENT_TOKEN: &str = "yes";
const ABSENT_TOKEN: &str = "no";

/// Decodes headerless roster text into records, in file order.
///
/// # Errors
/// - Returns `CodecError::Format` for the first line that has fewer than two
///   or more than three fields, or an empty name field.
pub fn decode_records(text: &str) -> CodecResult<Vec<Record>> {
    let mut records = Vec::new();
    for (line_number, line) in non_blank_lines(text) {
        let record = decode_line(line).ok_or_else(|| CodecError::Format {
            line_number,
            line: line.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Encodes records as headerless text, one `\n`-terminated line each.
///
/// Unrecorded attendance is written as `no`.
pub fn encode_records(records: &[Record]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.first_name);
        out.push(',');
        out.push_str(&record.last_name);
        out.push(',');
        out.push_str(present_token(record.present));
        out.push('\n');
    }
    out
}

fn decode_line(line: &str) -> Option<Record> {
    let fields = split_fields(line);
    let (first_name, last_name, present) = match fields.as_slice() {
        [first_name, last_name] => (*first_name, *last_name, false),
        [first_name, last_name, present] => (
            *first_name,
            *last_name,
            present.eq_ignore_ascii_case(PRESENT_TOKEN),
        ),
        _ => return None,
    };
    if first_name.is_empty() || last_name.is_empty() {
        return None;
    }
    Some(Record::recorded(first_name, last_name, present))
}

fn present_token(present: Attendance) -> &'static str {
    if present.is_present() {
        PRESENT_TOKEN
    } else {
        ABSENT_TOKEN
    }
}
