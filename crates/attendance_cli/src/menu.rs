//! Interactive attendance menu.
//!
//! # Responsibility
//! - Drive roster and session operations from console answers.
//! - Print results and errors; never abort the loop on a rejected answer.
//!
//! # Invariants
//! - Core operations only receive trimmed answers.
//! - Re-prompting is bounded by `MAX_PROMPT_ATTEMPTS`.

use crate::console::{Console, MAX_PROMPT_ATTEMPTS};
use attendance_core::{
    parse_attendance_token, AttendanceSession, RosterRepository, RosterService, ServiceError,
    SessionId, SessionStatus,
};
use std::io::{self, BufRead, Write};

const MENU_LINES: [&str; 7] = [
    "MENU:",
    "1. Manage attendance",
    "2. Edit attendance",
    "3. Import students",
    "4. Export attendance",
    "5. Mark attendance",
    "6. Exit",
];
const PRESENCE_QUESTION: &str = "Was the student present? (yes/no): ";
const PRESENCE_RETRY: &str = "Invalid answer. Please enter 'yes' or 'no'.";

/// Runs the menu until the user exits or input ends.
pub fn run_menu<I, O, R>(
    console: &mut Console<I, O>,
    service: &mut RosterService<R>,
) -> io::Result<()>
where
    I: BufRead,
    O: Write,
    R: RosterRepository,
{
    let mut session = AttendanceSession::new();
    loop {
        for line in MENU_LINES {
            console.say(line)?;
        }
        let Some(choice) = console.ask("Choose your option: ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => manage_attendance(console, service, &mut session)?,
            "2" => edit_attendance(console, &mut session)?,
            "3" => import_students(console, service)?,
            "4" => match service.export() {
                Ok(()) => console.say(format!(
                    "Exported {} students.",
                    service.roster().len()
                ))?,
                Err(err) => console.say(format!("Export failed: {err}"))?,
            },
            "5" => mark_attendance(console, service)?,
            "6" => {
                console.say("Exiting the program.")?;
                return Ok(());
            }
            _ => console.say("Invalid choice. Please try again.")?,
        }
        console.say("")?;
    }
}

/// Collects a fresh session, adopts it as the roster and exports it.
fn manage_attendance<I: BufRead, O: Write, R: RosterRepository>(
    console: &mut Console<I, O>,
    service: &mut RosterService<R>,
    session: &mut AttendanceSession,
) -> io::Result<()> {
    *session = AttendanceSession::new();
    loop {
        let Some(first_name) = console.ask("Enter student's first name: ")? else {
            break;
        };
        let Some(last_name) = console.ask("Enter student's last name: ")? else {
            break;
        };
        match console.ask_until(PRESENCE_QUESTION, PRESENCE_RETRY, SessionStatus::from_answer)? {
            Some(status) => {
                if let Err(err) = session.record(&format!("{first_name} {last_name}"), status) {
                    console.say(format!("Student not recorded: {err}"))?;
                }
            }
            None => console.say("No attendance recorded for this student.")?,
        }

        let another = console.ask("Want to add another student? (yes/no): ")?;
        if !matches!(another.as_deref().map(parse_attendance_token), Some(Ok(true))) {
            break;
        }
    }

    service.adopt_session(session);
    if let Err(err) = service.export() {
        console.say(format!("Export failed: {err}"))?;
    }
    print_session(console, session)
}

fn edit_attendance<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    session: &mut AttendanceSession,
) -> io::Result<()> {
    let Some(id) = console.ask_until(
        "Enter student ID: ",
        "Please enter a numeric student ID.",
        |answer| answer.parse::<SessionId>(),
    )?
    else {
        return Ok(());
    };
    if session.get(id).is_none() {
        return console.say("Student not found");
    }
    let Some(status) =
        console.ask_until(PRESENCE_QUESTION, PRESENCE_RETRY, SessionStatus::from_answer)?
    else {
        return Ok(());
    };
    if let Err(err) = session.set_status(id, status) {
        return console.say(format!("{err}"));
    }
    print_session(console, session)
}

fn import_students<I: BufRead, O: Write, R: RosterRepository>(
    console: &mut Console<I, O>,
    service: &mut RosterService<R>,
) -> io::Result<()> {
    match service.import() {
        Ok(records) => {
            console.say(format!("Imported {} students:", records.len()))?;
            for record in records {
                console.say(format!(
                    "  {} {}: {}",
                    record.first_name,
                    record.last_name,
                    record.present.label()
                ))?;
            }
            Ok(())
        }
        Err(err) => console.say(format!("Import failed: {err}")),
    }
}

/// Asks for each held record in turn; rejected answers leave it unchanged.
fn mark_attendance<I: BufRead, O: Write, R: RosterRepository>(
    console: &mut Console<I, O>,
    service: &mut RosterService<R>,
) -> io::Result<()> {
    if service.roster().is_empty() {
        return console.say("No students loaded. Import students first.");
    }
    console.say("Checking attendance:")?;
    for index in 0..service.roster().len() {
        let record = &service.roster()[index];
        let question = format!("Is {} present today? (yes/no): ", record.full_name());
        console.say(record.status_line())?;

        for _ in 0..MAX_PROMPT_ATTEMPTS {
            let Some(answer) = console.ask(&question)? else {
                return Ok(());
            };
            match service.mark(index, &answer) {
                Ok(_) => break,
                Err(ServiceError::Input(_)) => {
                    console.say("Invalid input, please enter 'yes' or 'no'.")?
                }
                Err(err) => {
                    console.say(format!("{err}"))?;
                    break;
                }
            }
        }
    }
    console.say("Attendance marked. Choose export to save it.")
}

fn print_session<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    session: &AttendanceSession,
) -> io::Result<()> {
    console.say("ATTENDANCE LIST:")?;
    for (id, entry) in session.iter() {
        console.say(format!(
            "STUDENT ID: {id}, NAME: {}, ATTENDANCE STATUS: {}",
            entry.full_name(),
            entry.status
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run_menu;
    use crate::console::Console;
    use attendance_core::{Attendance, FileRosterRepository, RosterService};
    use std::fs;
    use std::io::Cursor;

    fn run_script(
        service: &mut RosterService<FileRosterRepository>,
        script: &str,
    ) -> String {
        let mut console = Console::new(Cursor::new(script.to_string()), Vec::new());
        run_menu(&mut console, service).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn manage_attendance_exports_session_and_lists_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.csv");
        let mut service = RosterService::new(FileRosterRepository::new(&path));

        let output = run_script(
            &mut service,
            "1\nJohn\nDoe\nmaybe\nyes\nyes\nJane\nSmith\nno\nno\n6\n",
        );

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "John,Doe,yes\nJane,Smith,no\n"
        );
        assert!(output.contains("STUDENT ID: 1, NAME: John Doe, ATTENDANCE STATUS: PRESENT"));
        assert!(output.contains("STUDENT ID: 2, NAME: Jane Smith, ATTENDANCE STATUS: ABSENT"));
        assert!(output.contains("Exiting the program."));
    }

    #[test]
    fn edit_attendance_reports_unknown_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut service =
            RosterService::new(FileRosterRepository::new(dir.path().join("students.csv")));

        let output = run_script(&mut service, "2\n9\n6\n");
        assert!(output.contains("Student not found"));
    }

    #[test]
    fn import_then_mark_updates_held_roster() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.csv");
        fs::write(&path, "John,Doe,no\n").unwrap();
        let mut service = RosterService::new(FileRosterRepository::new(&path));

        let output = run_script(&mut service, "3\n5\nhuh\nYES\n4\n6\n");

        assert!(output.contains("Imported 1 students:"));
        assert!(output.contains("John Doe is currently absent"));
        assert!(output.contains("Invalid input, please enter 'yes' or 'no'."));
        assert_eq!(service.roster()[0].present, Attendance::Recorded(true));
        assert_eq!(fs::read_to_string(&path).unwrap(), "John,Doe,yes\n");
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let mut service =
            RosterService::new(FileRosterRepository::new(dir.path().join("students.csv")));

        let output = run_script(&mut service, "7\n");
        assert!(output.contains("Invalid choice. Please try again."));
    }
}
