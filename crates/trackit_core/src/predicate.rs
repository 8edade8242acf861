//! Composable filters over single entities.
//!
//! # Responsibility
//! - Build the predicates used by filtered views.
//! - Never mutate: predicates only answer yes/no for one entity.
//!
//! # Invariants
//! - Predicates are total over well-formed entities.
//! - `task_is_overdue` reads its clock on every evaluation; results are never cached.

use crate::clock::Clock;
use crate::model::contact::Contact;
use crate::model::fields::{Code, Tag};
use crate::model::lesson::{Lesson, LessonWeekday};
use crate::model::task::Task;
use chrono::NaiveDate;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Shared, cloneable boolean filter over `T`.
pub struct Predicate<T> {
    test: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Predicate<T> {
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            test: Arc::new(test),
        }
    }

    pub fn test(&self, item: &T) -> bool {
        (self.test)(item)
    }
}

impl<T: 'static> Predicate<T> {
    pub fn show_all() -> Self {
        Self::new(|_| true)
    }

    pub fn show_none() -> Self {
        Self::new(|_| false)
    }

    /// Logical AND of `self` and `other`.
    pub fn and(&self, other: &Predicate<T>) -> Self {
        let left = Arc::clone(&self.test);
        let right = Arc::clone(&other.test);
        Self::new(move |item| left(item) && right(item))
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            test: Arc::clone(&self.test),
        }
    }
}

impl<T> Debug for Predicate<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Predicate(..)")
    }
}

pub fn contact_has_tag(tag: Tag) -> Predicate<Contact> {
    Predicate::new(move |contact: &Contact| contact.has_tag(&tag))
}

pub fn lesson_has_code(code: Code) -> Predicate<Lesson> {
    Predicate::new(move |lesson: &Lesson| lesson.code() == &code)
}

pub fn lesson_on_weekday(weekday: LessonWeekday) -> Predicate<Lesson> {
    Predicate::new(move |lesson: &Lesson| lesson.weekday() == weekday)
}

/// Lessons recurring on the weekday `date` falls on.
pub fn lesson_on_date(date: NaiveDate) -> Predicate<Lesson> {
    lesson_on_weekday(LessonWeekday::from_date(date))
}

pub fn task_has_code(code: Code) -> Predicate<Task> {
    Predicate::new(move |task: &Task| task.code() == Some(&code))
}

pub fn task_on_date(date: NaiveDate) -> Predicate<Task> {
    Predicate::new(move |task: &Task| task.date() == date)
}

/// Tasks due strictly after `date`.
pub fn task_after_date(date: NaiveDate) -> Predicate<Task> {
    Predicate::new(move |task: &Task| task.date() > date)
}

/// Tasks due strictly before the clock's current date.
pub fn task_is_overdue(clock: Arc<dyn Clock>) -> Predicate<Task> {
    Predicate::new(move |task: &Task| task.date() < clock.today())
}
