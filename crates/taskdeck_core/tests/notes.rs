use chrono::{Duration, TimeZone, Utc};
use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{
    FixedClock, NoteService, NoteServiceError, NoteValidationError, SqliteNoteRepository,
    StaticSession,
};

fn clock_at(minutes: i64) -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 5, 22, 9, 0, 0).unwrap() + Duration::minutes(minutes))
}

#[test]
fn create_requires_session() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::new(
        SqliteNoteRepository::new(&conn),
        StaticSession::anonymous(),
        clock_at(0),
    );

    let err = service.create_note("Ideas", "body").unwrap_err();
    assert!(matches!(err, NoteServiceError::Unauthenticated));
    assert!(matches!(
        service.list_notes().unwrap_err(),
        NoteServiceError::Unauthenticated
    ));
}

#[test]
fn create_rejects_blank_title() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::new(
        SqliteNoteRepository::new(&conn),
        StaticSession::signed_in("user-1"),
        clock_at(0),
    );

    let err = service.create_note("   ", "body").unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::Validation(NoteValidationError::EmptyTitle)
    ));
}

#[test]
fn create_update_roundtrip_refreshes_updated_at_and_preview() {
    let conn = open_db_in_memory().unwrap();
    let created = NoteService::new(
        SqliteNoteRepository::new(&conn),
        StaticSession::signed_in("user-1"),
        clock_at(0),
    )
    .create_note(" Reading list ", "")
    .unwrap();

    assert_eq!(created.note.title, "Reading list");
    assert_eq!(created.note.created_at, clock_at(0).0);
    assert_eq!(created.note.updated_at, clock_at(0).0);
    assert_eq!(created.preview_text, None);

    let updated = NoteService::new(
        SqliteNoteRepository::new(&conn),
        StaticSession::signed_in("user-1"),
        clock_at(30),
    )
    .update_note(created.note.id, "Reading list", "**Dune** and [SICP](https://x)")
    .unwrap();

    assert_eq!(updated.note.created_at, clock_at(0).0);
    assert_eq!(updated.note.updated_at, clock_at(30).0);
    assert_eq!(updated.preview_text.as_deref(), Some("Dune and SICP"));
}

#[test]
fn list_is_scoped_to_owner_and_sorted_by_latest_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = || SqliteNoteRepository::new(&conn);

    let first = NoteService::new(repo(), StaticSession::signed_in("alice"), clock_at(0))
        .create_note("first", "")
        .unwrap();
    let second = NoteService::new(repo(), StaticSession::signed_in("alice"), clock_at(10))
        .create_note("second", "")
        .unwrap();
    NoteService::new(repo(), StaticSession::signed_in("bob"), clock_at(20))
        .create_note("bob's", "")
        .unwrap();

    let alice = NoteService::new(repo(), StaticSession::signed_in("alice"), clock_at(40));
    let listed: Vec<String> = alice
        .list_notes()
        .unwrap()
        .into_iter()
        .map(|record| record.note.title)
        .collect();
    assert_eq!(listed, vec!["second", "first"]);

    alice.update_note(first.note.id, "first", "edited").unwrap();
    let listed: Vec<_> = alice
        .list_notes()
        .unwrap()
        .into_iter()
        .map(|record| record.note.id)
        .collect();
    assert_eq!(listed, vec![first.note.id, second.note.id]);
}

#[test]
fn other_users_notes_look_missing() {
    let conn = open_db_in_memory().unwrap();
    let note = NoteService::new(
        SqliteNoteRepository::new(&conn),
        StaticSession::signed_in("alice"),
        clock_at(0),
    )
    .create_note("private", "secret")
    .unwrap();

    let bob = NoteService::new(
        SqliteNoteRepository::new(&conn),
        StaticSession::signed_in("bob"),
        clock_at(5),
    );
    assert!(bob.get_note(note.note.id).unwrap().is_none());
    assert!(matches!(
        bob.update_note(note.note.id, "hijack", "").unwrap_err(),
        NoteServiceError::NoteNotFound(id) if id == note.note.id
    ));
    assert!(matches!(
        bob.delete_note(note.note.id).unwrap_err(),
        NoteServiceError::NoteNotFound(_)
    ));
}

#[test]
fn delete_removes_note() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::new(
        SqliteNoteRepository::new(&conn),
        StaticSession::signed_in("alice"),
        clock_at(0),
    );
    let note = service.create_note("temp", "").unwrap();

    service.delete_note(note.note.id).unwrap();
    assert!(service.get_note(note.note.id).unwrap().is_none());
    assert!(service.list_notes().unwrap().is_empty());
}
