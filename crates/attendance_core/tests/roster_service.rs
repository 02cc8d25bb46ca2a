use attendance_core::{
    Attendance, AttendanceSession, FileRosterRepository, InputError, Record, RosterService,
    ServiceError, SessionStatus, StoreError,
};
use std::fs;
use tempfile::TempDir;

fn service_in(dir: &TempDir) -> RosterService<FileRosterRepository> {
    RosterService::new(FileRosterRepository::new(dir.path().join("students.csv")))
}

#[test]
fn import_adopts_roster_and_failed_import_keeps_it() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);
    let path = service.repo().path().to_path_buf();
    fs::write(&path, "John,Doe,yes\n").unwrap();

    assert_eq!(service.import().unwrap().len(), 1);

    fs::write(&path, "broken\n").unwrap();
    assert!(matches!(
        service.import().unwrap_err(),
        ServiceError::Store(StoreError::Format(_))
    ));
    assert_eq!(service.roster(), &[Record::recorded("John", "Doe", true)]);
}

#[test]
fn add_holds_unrecorded_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);

    let added = service.add(" Charlie ", "Johnson").unwrap().clone();
    assert_eq!(added, Record::unrecorded("Charlie", "Johnson"));
    assert_eq!(
        added.status_line(),
        "Charlie Johnson has not had their attendance recorded yet."
    );
    assert!(service.repo().path().is_file());
}

#[test]
fn mark_updates_only_on_valid_answer() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);
    service.add("Charlie", "Johnson").unwrap();

    let err = service.mark(0, "perhaps").unwrap_err();
    assert!(matches!(err, ServiceError::Input(InputError::InvalidToken(_))));
    assert_eq!(service.roster()[0].present, Attendance::Unrecorded);

    assert!(service.mark(0, "YES").unwrap());
    assert_eq!(service.roster()[0].present, Attendance::Recorded(true));

    assert!(matches!(
        service.mark(3, "no").unwrap_err(),
        ServiceError::IndexOutOfRange { index: 3, len: 1 }
    ));
}

#[test]
fn edit_renames_file_row_and_held_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);
    service.add("John", "Doe").unwrap();

    service.edit("John", "Doe", "Jonathan", "Doe").unwrap();

    assert!(service.roster()[0].matches("Jonathan", "Doe"));
    let text = fs::read_to_string(service.repo().path()).unwrap();
    assert!(text.contains("Jonathan,Doe,False"));
}

#[test]
fn edit_trims_padded_names_in_file_and_held_roster() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);
    service.add(" John ", "Doe").unwrap();

    service.edit("John", " Doe", " Jon ", "Doe ").unwrap();

    assert_eq!(service.roster(), &[Record::unrecorded("Jon", "Doe")]);
    assert_eq!(
        fs::read_to_string(service.repo().path()).unwrap(),
        "first_name,last_name,present\nJon,Doe,False\n"
    );

    service.edit("Jon", "Doe", "Jonathan", "Doe").unwrap();
    assert!(service.roster()[0].matches("Jonathan", "Doe"));
}

#[test]
fn edit_not_found_leaves_held_roster_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);
    service.add("John", "Doe").unwrap();

    let err = service.edit("Jane", "Doe", "Janet", "Doe").unwrap_err();
    assert!(matches!(err, ServiceError::Store(ref store) if store.is_not_found()));
    assert!(service.roster()[0].matches("John", "Doe"));
}

#[test]
fn session_export_writes_headerless_roster() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);
    let mut session = AttendanceSession::new();
    session.record("Alice Brown", SessionStatus::Present).unwrap();
    let bob = session.record("Bob Green", SessionStatus::Present).unwrap();
    session.set_status(bob, SessionStatus::Absent).unwrap();

    service.adopt_session(&session);
    service.export().unwrap();

    assert_eq!(
        fs::read_to_string(service.repo().path()).unwrap(),
        "Alice,Brown,yes\nBob,Green,no\n"
    );
}
