//! Headered roster format used by add and edit.
//!
//! The first non-blank line is the header `first_name,last_name,present`.
//! Every row has three fields. The `present` column is kept as verbatim text
//! (`False`, `True`, `yes`, `no`, ...) so a rewrite never reinterprets it.

use super::{non_blank_lines, split_fields, CodecError, CodecResult};

pub const HEADER: &str = "first_name,last_name,present";
const HEADER_FIELDS: [&str; 3] = ["first_name", "last_name", "present"];

/// Present column written for rows appended by `add`.
pub const ADDED_PRESENT_TOKEN: &str = "False";

/// One data row of a headered roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderedRow {
    pub first_name: String,
    pub last_name: String,
    pub present: String,
}

impl HeaderedRow {
    pub fn matches(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }
}

/// Parsed headered roster: header implied, rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderedTable {
    pub rows: Vec<HeaderedRow>,
}

impl HeaderedTable {
    /// Renames the first row matching the old pair.
    ///
    /// Returns `false` when no row matched; the table is then unchanged.
    pub fn rename_first(
        &mut self,
        old_first_name: &str,
        old_last_name: &str,
        new_first_name: &str,
        new_last_name: &str,
    ) -> bool {
        match self
            .rows
            .iter_mut()
            .find(|row| row.matches(old_first_name, old_last_name))
        {
            Some(row) => {
                row.first_name = new_first_name.to_string();
                row.last_name = new_last_name.to_string();
                true
            }
            None => false,
        }
    }
}

/// Parses headered roster text.
///
/// Text with no non-blank line parses as an empty table.
///
/// # Errors
/// - `CodecError::MissingHeader` when the first non-blank line is not the header.
/// - `CodecError::Format` for a row without exactly three fields.
pub fn parse_table(text: &str) -> CodecResult<HeaderedTable> {
    let mut lines = non_blank_lines(text);
    let Some((_, header)) = lines.next() else {
        return Ok(HeaderedTable::default());
    };
    if split_fields(header) != HEADER_FIELDS {
        return Err(CodecError::MissingHeader {
            line: header.to_string(),
        });
    }

    let mut rows = Vec::new();
    for (line_number, line) in lines {
        match split_fields(line).as_slice() {
            [first_name, last_name, present] => rows.push(HeaderedRow {
                first_name: (*first_name).to_string(),
                last_name: (*last_name).to_string(),
                present: (*present).to_string(),
            }),
            _ => {
                return Err(CodecError::Format {
                    line_number,
                    line: line.to_string(),
                })
            }
        }
    }
    Ok(HeaderedTable { rows })
}

/// Renders the header and every row, `\n`-terminated.
pub fn render_table(table: &HeaderedTable) -> String {
    let mut out = render_header();
    for row in &table.rows {
        out.push_str(&render_row(&row.first_name, &row.last_name, &row.present));
    }
    out
}

pub fn render_header() -> String {
    format!("{HEADER}\n")
}

/// Renders the line appended by `add`: `first,last,False`.
pub fn render_added_row(first_name: &str, last_name: &str) -> String {
    render_row(first_name, last_name, ADDED_PRESENT_TOKEN)
}

fn render_row(first_name: &str, last_name: &str, present: &str) -> String {
    format!("{first_name},{last_name},{present}\n")
}

#[cfg(test)]
mod tests {
    use super::{parse_table, render_added_row, render_table, HeaderedRow};
    use crate::codec::CodecError;

    #[test]
    fn parse_keeps_present_text_verbatim() {
        let table =
            parse_table("first_name,last_name,present\nJohn,Doe,False\n\nJane,Smith,yes\n")
                .unwrap();
        assert_eq!(
            table.rows,
            vec![
                HeaderedRow {
                    first_name: "John".to_string(),
                    last_name: "Doe".to_string(),
                    present: "False".to_string(),
                },
                HeaderedRow {
                    first_name: "Jane".to_string(),
                    last_name: "Smith".to_string(),
                    present: "yes".to_string(),
                },
            ]
        );
    }

    #[test]
    fn parse_empty_text_is_empty_table() {
        assert!(parse_table("\n  \n").unwrap().rows.is_empty());
    }

    #[test]
    fn parse_rejects_headerless_text() {
        let err = parse_table("John,Doe,yes\n").unwrap_err();
        assert!(matches!(err, CodecError::MissingHeader { .. }));
    }

    #[test]
    fn parse_rejects_short_rows() {
        let err = parse_table("first_name,last_name,present\nJohn,Doe\n").unwrap_err();
        assert_eq!(
            err,
            CodecError::Format {
                line_number: 2,
                line: "John,Doe".to_string(),
            }
        );
    }

    #[test]
    fn rename_first_touches_only_first_match() {
        let mut table = parse_table(
            "first_name,last_name,present\nJohn,Doe,True\nJohn,Doe,False\n",
        )
        .unwrap();
        assert!(table.rename_first("John", "Doe", "Jonathan", "Doe"));
        assert_eq!(
            render_table(&table),
            "first_name,last_name,present\nJonathan,Doe,True\nJohn,Doe,False\n"
        );
        assert!(!table.rename_first("Nobody", "Here", "X", "Y"));
    }

    #[test]
    fn added_row_uses_capitalized_false() {
        assert_eq!(
            render_added_row("Charlie", "Johnson"),
            "Charlie,Johnson,False\n"
        );
    }
}
