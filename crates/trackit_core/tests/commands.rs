mod common;

use common::date;
use std::sync::Arc;
use tempfile::TempDir;
use trackit_core::logic::parser::ParseError;
use trackit_core::{
    CollectionError, CommandError, EntityKind, FixedClock, JsonTrackStorage, Logic, Track,
    TrackService, UserPrefs, MAX_MODULES,
};

fn logic_in(dir: &TempDir) -> Logic {
    let service = TrackService::with_clock(
        Track::new(),
        UserPrefs::default(),
        Arc::new(FixedClock(date(2024, 1, 8))),
    );
    Logic::new(service, JsonTrackStorage::new(dir.path().join("track.json")))
}

#[test]
fn task_for_unknown_module_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = logic_in(&dir);

    let err = logic
        .execute("T add n/Quiz d/01/03/2024 m/CS2103T")
        .unwrap_err();
    assert!(matches!(err, CommandError::ModuleNotFound(_)));
    assert!(logic.service().track().tasks().is_empty());
    assert!(!dir.path().join("track.json").exists());

    logic
        .execute("M add m/CS2103T n/Software Engineering")
        .unwrap();
    logic
        .execute("T add n/Quiz d/01/03/2024 m/cs2103t")
        .unwrap();
    assert_eq!(logic.service().track().tasks().len(), 1);
}

#[test]
fn lesson_for_unknown_module_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = logic_in(&dir);

    let err = logic
        .execute("L add m/CS2103T ty/lecture d/Fri 14:00-16:00 a/I3-AUD")
        .unwrap_err();
    assert!(matches!(err, CommandError::ModuleNotFound(_)));
}

#[test]
fn module_ceiling_blocks_seventh_module() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = logic_in(&dir);
    for value in ["CS1101S", "CS1231S", "CS2030S", "CS2040S", "CS2100", "CS2103T"] {
        logic
            .execute(&format!("M add m/{value} n/Module"))
            .unwrap();
    }

    let err = logic.execute("M add m/MA1521 n/Calculus").unwrap_err();
    assert!(matches!(err, CommandError::ModuleLimitReached(limit) if limit == MAX_MODULES));
    assert_eq!(logic.service().track().modules().len(), MAX_MODULES);

    let err = logic.execute("M add m/CS2100 n/Again").unwrap_err();
    assert!(matches!(
        err,
        CommandError::Collection(CollectionError::DuplicateEntity(EntityKind::Module))
    ));
}

#[test]
fn edit_and_delete_use_displayed_index() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = logic_in(&dir);
    logic
        .execute("C add n/Alice p/91234567 e/alice@example.com t/friends")
        .unwrap();
    logic
        .execute("C add n/Bob p/98765432 e/bob@example.com")
        .unwrap();

    logic.execute("C edit 2 p/90000000 t/").unwrap();
    let bob = &logic.service().track().contacts().as_slice()[1];
    assert_eq!(bob.phone().as_str(), "90000000");
    assert!(bob.tags().is_empty());

    let err = logic.execute("C delete 3").unwrap_err();
    assert!(matches!(err, CommandError::InvalidIndex(EntityKind::Contact)));

    logic.execute("C delete 1").unwrap();
    let names: Vec<_> = logic
        .service()
        .track()
        .contacts()
        .iter()
        .map(|contact| contact.name().as_str().to_string())
        .collect();
    assert_eq!(names, ["Bob"]);
}

#[test]
fn edit_into_existing_contact_is_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = logic_in(&dir);
    logic
        .execute("C add n/Alice p/91234567 e/alice@example.com")
        .unwrap();
    logic
        .execute("C add n/Bob p/98765432 e/bob@example.com")
        .unwrap();

    let err = logic.execute("C edit 2 n/alice").unwrap_err();
    assert!(matches!(
        err,
        CommandError::Collection(CollectionError::DuplicateEntity(EntityKind::Contact))
    ));
}

#[test]
fn lesson_edit_and_delete_by_code_and_type() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = logic_in(&dir);
    logic
        .execute("M add m/CS2103T n/Software Engineering")
        .unwrap();
    logic
        .execute("L add m/CS2103T ty/lecture d/Fri 14:00-16:00 a/I3-AUD")
        .unwrap();

    logic
        .execute("L edit m/CS2103T ty/lecture d/Mon 10:00-12:00")
        .unwrap();
    let lessons = logic.service().track().lessons();
    assert_eq!(lessons.as_slice()[0].date_time().to_string(), "Mon 10:00-12:00");

    let err = logic
        .execute("L delete m/CS2103T ty/tutorial")
        .unwrap_err();
    assert!(matches!(err, CommandError::LessonNotFound { .. }));
    logic.execute("L delete m/CS2103T ty/lecture").unwrap();
    assert!(logic.service().track().lessons().is_empty());
}

#[test]
fn deleting_module_keeps_its_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = logic_in(&dir);
    logic
        .execute("M add m/CS2103T n/Software Engineering")
        .unwrap();
    logic
        .execute("T add n/Quiz d/01/03/2024 m/CS2103T")
        .unwrap();

    logic.execute("M delete CS2103T").unwrap();
    assert!(logic.service().track().modules().is_empty());
    assert_eq!(logic.service().track().tasks().len(), 1);
}

#[test]
fn delete_after_overdue_uses_overdue_numbering() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = logic_in(&dir);
    logic.execute("T add n/Future essay d/01/01/2099").unwrap();
    logic.execute("T add n/Old report d/01/01/2020").unwrap();

    let shown = logic.execute("T overdue").unwrap();
    assert!(shown.feedback.contains("[1] Old report"));

    let deleted = logic.execute("T delete 1").unwrap();
    assert!(deleted.feedback.contains("Old report"));
    let remaining: Vec<_> = logic
        .service()
        .track()
        .tasks()
        .iter()
        .map(|task| task.name().as_str().to_string())
        .collect();
    assert_eq!(remaining, ["Future essay"]);
}

#[test]
fn edit_after_upcoming_uses_upcoming_numbering() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = logic_in(&dir);
    logic.execute("T add n/Later d/20/01/2024").unwrap();
    logic.execute("T add n/Today d/08/01/2024").unwrap();

    logic.execute("upcoming").unwrap();
    logic.execute("T edit 1 r/done early").unwrap();

    let tasks = logic.service().track().tasks().as_slice();
    assert_eq!(tasks[0].remark(), None);
    assert_eq!(tasks[1].remark(), Some("done early"));
}

#[test]
fn task_with_deleted_module_stays_editable() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = logic_in(&dir);
    logic
        .execute("M add m/CS2103T n/Software Engineering")
        .unwrap();
    logic
        .execute("T add n/Quiz d/01/03/2024 m/CS2103T")
        .unwrap();
    logic.execute("M delete CS2103T").unwrap();

    logic.execute("T edit 1 r/bring calculator").unwrap();
    let task = &logic.service().track().tasks().as_slice()[0];
    assert_eq!(task.remark(), Some("bring calculator"));
    assert_eq!(task.code().map(|code| code.as_str()), Some("CS2103T"));

    let err = logic.execute("T edit 1 m/CS1101S").unwrap_err();
    assert!(matches!(err, CommandError::ModuleNotFound(_)));
}

#[test]
fn successful_mutation_is_saved() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = logic_in(&dir);
    logic
        .execute("M add m/CS2103T n/Software Engineering")
        .unwrap();

    let stored = logic.storage().read_track().unwrap().unwrap();
    assert_eq!(&stored, logic.service().track());

    logic.execute("clear").unwrap();
    let stored = logic.storage().read_track().unwrap().unwrap();
    assert_eq!(stored, Track::new());
}

#[test]
fn failed_save_keeps_change_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let service = TrackService::with_clock(
        Track::new(),
        UserPrefs::default(),
        Arc::new(FixedClock(date(2024, 1, 8))),
    );
    // The target path is a directory, so every write fails.
    let mut logic = Logic::new(service, JsonTrackStorage::new(dir.path()));

    let err = logic
        .execute("M add m/CS2103T n/Software Engineering")
        .unwrap_err();
    assert!(matches!(err, CommandError::Storage(_)));
    assert!(err.to_string().contains("kept in memory"));
    assert_eq!(logic.service().track().modules().len(), 1);
}

#[test]
fn queries_render_feedback_without_saving() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = logic_in(&dir);

    let outcome = logic.execute("T overdue").unwrap();
    assert!(outcome.feedback.contains("(none)"));
    assert!(!outcome.exit);
    assert!(!dir.path().join("track.json").exists());

    let outcome = logic.execute("upcoming").unwrap();
    assert!(outcome.feedback.contains("08/01/2024"));
    assert!(logic.execute("exit").unwrap().exit);
}

#[test]
fn malformed_input_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = logic_in(&dir);

    assert!(matches!(
        logic.execute("X add").unwrap_err(),
        CommandError::Parse(ParseError::UnknownCommand(_))
    ));
    assert!(matches!(
        logic.execute("T add n/Quiz").unwrap_err(),
        CommandError::Parse(ParseError::InvalidFormat(_))
    ));
    assert!(matches!(
        logic.execute("T edit 1").unwrap_err(),
        CommandError::Parse(ParseError::NothingToEdit(_))
    ));
}
