mod common;

use common::{code, contact, date, lesson, module, task};
use std::sync::Arc;
use trackit_core::predicate::contact_has_tag;
use trackit_core::{
    FixedClock, LessonType, Predicate, Tag, Task, Track, TrackService, UserPrefs, MAX_MODULES,
};

fn service_on(today: (i32, u32, u32)) -> TrackService {
    let (year, month, day) = today;
    TrackService::with_clock(
        Track::new(),
        UserPrefs::default(),
        Arc::new(FixedClock(date(year, month, day))),
    )
}

fn names(tasks: Vec<&Task>) -> Vec<String> {
    tasks
        .iter()
        .map(|task| task.name().as_str().to_string())
        .collect()
}

#[test]
fn filtered_view_tracks_later_mutations() {
    let mut service = service_on((2024, 1, 8));
    service.update_contact_filter(contact_has_tag(Tag::new("friends").unwrap()));

    service.add_contact(contact("Alice", &["friends"])).unwrap();
    service.add_contact(contact("Bob", &[])).unwrap();
    assert_eq!(service.filtered_contacts().len(), 1);

    service.add_contact(contact("Carl", &["friends"])).unwrap();
    let listed: Vec<_> = service
        .filtered_contacts()
        .iter()
        .map(|contact| contact.name().as_str().to_string())
        .collect();
    assert_eq!(listed, ["Alice", "Carl"]);

    service.update_contact_filter(Predicate::show_all());
    assert_eq!(service.filtered_contacts().len(), 3);
}

#[test]
fn clear_all_views_hides_until_next_update() {
    let mut service = service_on((2024, 1, 8));
    service.add_contact(contact("Alice", &[])).unwrap();
    service
        .add_task(task("Quiz", date(2024, 1, 9), None))
        .unwrap();

    service.clear_all_views();
    assert!(service.filtered_contacts().is_empty());
    assert!(service.filtered_tasks().is_empty());
    assert_eq!(service.all_contacts().len(), 1);
}

#[test]
fn module_ceiling_is_reported_but_not_enforced() {
    let mut service = service_on((2024, 1, 8));
    let codes = ["CS1101S", "CS1231S", "CS2030S", "CS2040S", "CS2100", "CS2103T"];
    for value in codes {
        assert!(service.can_add_more_module());
        service.add_module(module(value, "Module")).unwrap();
    }
    assert_eq!(service.track().modules().len(), MAX_MODULES);
    assert!(!service.can_add_more_module());

    service.add_module(module("MA1521", "Calculus")).unwrap();
    assert_eq!(service.track().modules().len(), MAX_MODULES + 1);
}

#[test]
fn day_upcoming_lessons_are_sorted_and_on_weekday() {
    let mut service = service_on((2024, 1, 8));
    service
        .add_lesson(lesson("CS2103T", LessonType::Lecture, "Mon 14:00-16:00"))
        .unwrap();
    service
        .add_lesson(lesson("CS1101S", LessonType::Tutorial, "Wed 10:00-11:00"))
        .unwrap();
    service
        .add_lesson(lesson("MA1521", LessonType::Lecture, "Mon 08:00-10:00"))
        .unwrap();

    let codes: Vec<_> = service
        .day_upcoming_lessons(date(2024, 1, 8))
        .iter()
        .map(|lesson| lesson.code().as_str().to_string())
        .collect();
    assert_eq!(codes, ["MA1521", "CS2103T"]);
    assert_eq!(service.filtered_lessons().len(), 3);
}

#[test]
fn date_relative_task_queries_use_clock() {
    let mut service = service_on((2024, 1, 8));
    service.add_task(task("Past", date(2024, 1, 1), None)).unwrap();
    service.add_task(task("Today", date(2024, 1, 8), None)).unwrap();
    service.add_task(task("Edge", date(2024, 1, 15), None)).unwrap();
    service.add_task(task("Later", date(2024, 1, 16), None)).unwrap();

    assert_eq!(names(service.overdue_tasks()), ["Past"]);
    assert_eq!(names(service.future_tasks()), ["Later"]);
    assert_eq!(names(service.day_upcoming_tasks(date(2024, 1, 8))), ["Today"]);
    assert_eq!(names(service.filtered_tasks()), ["Today"]);

    assert_eq!(names(service.overdue_tasks()), ["Past"]);
    assert_eq!(names(service.filtered_tasks()), ["Past"]);
}

#[test]
fn module_queries_filter_by_code() {
    let mut service = service_on((2024, 1, 8));
    service.add_contact(contact("Alice", &["CS2103T"])).unwrap();
    service.add_contact(contact("Bob", &["CS1101S"])).unwrap();
    service
        .add_task(task("Quiz", date(2024, 2, 1), Some("CS2103T")))
        .unwrap();
    service
        .add_task(task("Lab", date(2024, 2, 1), Some("CS1101S")))
        .unwrap();

    let target = code("CS2103T");
    assert_eq!(service.module_contacts(&target).len(), 1);
    assert_eq!(service.module_tasks(&target).len(), 1);
    assert_eq!(service.filtered_tasks().len(), 1);
}

#[test]
fn set_track_copies_data_and_keeps_views() {
    let mut service = service_on((2024, 1, 8));
    let mut other = Track::new();
    other.add_contact(contact("Alice", &[])).unwrap();

    service.set_track(&other).unwrap();
    assert_eq!(service.track(), &other);
    assert_eq!(service.filtered_contacts().len(), 1);
}
