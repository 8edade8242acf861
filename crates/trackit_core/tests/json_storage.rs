mod common;

use common::{contact, date, lesson, module, task};
use trackit_core::{
    CollectionError, EntityKind, JsonTrackStorage, LessonType, StorageError, Track,
};

fn typical_track() -> Track {
    let mut track = Track::new();
    track.add_contact(contact("Alice Pauline", &["CS2103T", "friends"])).unwrap();
    track.add_module(module("CS2103T", "Software Engineering")).unwrap();
    track
        .add_lesson(lesson("CS2103T", LessonType::Lecture, "Fri 14:00-16:00"))
        .unwrap();
    track
        .add_task(task("Quiz", date(2024, 3, 1), Some("CS2103T")))
        .unwrap();
    track
}

#[test]
fn save_then_read_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonTrackStorage::new(dir.path().join("nested").join("track.json"));
    let track = typical_track();

    storage.save_track(&track).unwrap();
    assert_eq!(storage.read_track().unwrap(), Some(track));
}

#[test]
fn missing_file_reads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonTrackStorage::new(dir.path().join("absent.json"));
    assert!(storage.read_track().unwrap().is_none());
}

#[test]
fn duplicate_entries_are_rejected_as_inconsistent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("track.json");
    std::fs::write(
        &path,
        r#"{
            "modules": [
                { "code": "CS2103T", "name": "Software Engineering" },
                { "code": "cs2103t", "name": "Another Name" }
            ]
        }"#,
    )
    .unwrap();

    let err = JsonTrackStorage::new(&path).read_track().unwrap_err();
    assert!(matches!(
        err,
        StorageError::Inconsistent(CollectionError::InconsistentSnapshot(EntityKind::Module))
    ));
}

#[test]
fn missing_field_is_reported_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("track.json");
    std::fs::write(&path, r#"{ "tasks": [ { "name": "Quiz" } ] }"#).unwrap();

    match JsonTrackStorage::new(&path).read_track().unwrap_err() {
        StorageError::InvalidData(message) => {
            assert_eq!(message, "Task's Date field is missing!")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_field_value_is_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("track.json");
    std::fs::write(
        &path,
        r#"{ "lessons": [ { "code": "CS2103T", "type": "seminar", "date": "Mon 10:00-12:00", "address": "COM1" } ] }"#,
    )
    .unwrap();

    let err = JsonTrackStorage::new(&path).read_track().unwrap_err();
    assert!(matches!(err, StorageError::InvalidData(_)));
}

#[test]
fn malformed_json_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("track.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonTrackStorage::new(&path).read_track().unwrap_err();
    assert!(matches!(err, StorageError::Json(_)));
}
