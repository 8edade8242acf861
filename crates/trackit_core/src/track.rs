//! Track aggregate: the single owner of all entity collections.
//!
//! # Responsibility
//! - Own exactly one `UniqueList` per entity kind.
//! - Expose the only mutation entry points for those collections.
//! - Support wholesale replacement from an unchecked `TrackSnapshot`.
//!
//! # Invariants
//! - Uniqueness is enforced inside each mutation; failed calls change nothing.
//! - Module references held by tasks and lessons are not enforced here.
//!   Callers check `has_module_code` before inserting, and deleting a module
//!   never cascades.
//!
//! # Concurrency
//! - No internal synchronization. A multi-threaded host must serialize every
//!   read and mutation, e.g. behind one `Mutex`.

use crate::collection::{CollectionResult, UniqueList};
use crate::model::contact::Contact;
use crate::model::fields::Code;
use crate::model::lesson::{Lesson, LessonType};
use crate::model::module::Module;
use crate::model::task::Task;

/// Plain, unchecked data for all four collections.
///
/// Produced by `Track::snapshot` and by deserialization; turned back into a
/// Track only through `Track::reset_data` or `Track::try_from`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackSnapshot {
    pub contacts: Vec<Contact>,
    pub modules: Vec<Module>,
    pub lessons: Vec<Lesson>,
    pub tasks: Vec<Task>,
}

/// In-memory store of contacts, modules, lessons and tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    contacts: UniqueList<Contact>,
    modules: UniqueList<Module>,
    lessons: UniqueList<Lesson>,
    tasks: UniqueList<Task>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all four collections with `snapshot`.
    ///
    /// Every collection is checked before any is replaced, so an
    /// `InconsistentSnapshot` error leaves this Track untouched.
    pub fn reset_data(&mut self, snapshot: TrackSnapshot) -> CollectionResult<()> {
        UniqueList::ensure_unique(&snapshot.contacts)?;
        UniqueList::ensure_unique(&snapshot.modules)?;
        UniqueList::ensure_unique(&snapshot.lessons)?;
        UniqueList::ensure_unique(&snapshot.tasks)?;

        self.contacts.reset_to(snapshot.contacts)?;
        self.modules.reset_to(snapshot.modules)?;
        self.lessons.reset_to(snapshot.lessons)?;
        self.tasks.reset_to(snapshot.tasks)?;
        Ok(())
    }

    /// Copies the current state into a snapshot.
    pub fn snapshot(&self) -> TrackSnapshot {
        TrackSnapshot {
            contacts: self.contacts.as_slice().to_vec(),
            modules: self.modules.as_slice().to_vec(),
            lessons: self.lessons.as_slice().to_vec(),
            tasks: self.tasks.as_slice().to_vec(),
        }
    }

    /// Empties every collection.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // Contacts

    pub fn has_contact(&self, contact: &Contact) -> bool {
        self.contacts.contains(contact)
    }

    pub fn add_contact(&mut self, contact: Contact) -> CollectionResult<()> {
        self.contacts.add(contact)
    }

    pub fn remove_contact(&mut self, contact: &Contact) -> CollectionResult<Contact> {
        self.contacts.remove(contact)
    }

    pub fn set_contact(&mut self, target: &Contact, edited: Contact) -> CollectionResult<()> {
        self.contacts.replace(target, edited)
    }

    pub fn contacts(&self) -> &UniqueList<Contact> {
        &self.contacts
    }

    // Modules

    pub fn has_module(&self, module: &Module) -> bool {
        self.modules.contains(module)
    }

    /// Returns true when a module with `code` exists. Pure read.
    pub fn has_module_code(&self, code: &Code) -> bool {
        self.get_module(code).is_some()
    }

    pub fn get_module(&self, code: &Code) -> Option<&Module> {
        self.modules.find(|module| module.code() == code)
    }

    pub fn add_module(&mut self, module: Module) -> CollectionResult<()> {
        self.modules.add(module)
    }

    pub fn remove_module(&mut self, module: &Module) -> CollectionResult<Module> {
        self.modules.remove(module)
    }

    pub fn set_module(&mut self, target: &Module, edited: Module) -> CollectionResult<()> {
        self.modules.replace(target, edited)
    }

    pub fn modules(&self) -> &UniqueList<Module> {
        &self.modules
    }

    // Lessons

    pub fn has_lesson(&self, lesson: &Lesson) -> bool {
        self.lessons.contains(lesson)
    }

    pub fn get_lesson(&self, code: &Code, lesson_type: LessonType) -> Option<&Lesson> {
        self.lessons
            .find(|lesson| lesson.code() == code && lesson.lesson_type() == lesson_type)
    }

    pub fn add_lesson(&mut self, lesson: Lesson) -> CollectionResult<()> {
        self.lessons.add(lesson)
    }

    pub fn remove_lesson(&mut self, lesson: &Lesson) -> CollectionResult<Lesson> {
        self.lessons.remove(lesson)
    }

    pub fn set_lesson(&mut self, target: &Lesson, edited: Lesson) -> CollectionResult<()> {
        self.lessons.replace(target, edited)
    }

    /// Orders lessons by weekday, then start time. Ties keep their order.
    pub fn sort_lessons(&mut self) {
        self.lessons.sort_by(|left, right| {
            let left_key = (left.weekday(), left.date_time().start());
            let right_key = (right.weekday(), right.date_time().start());
            left_key.cmp(&right_key)
        });
    }

    pub fn lessons(&self) -> &UniqueList<Lesson> {
        &self.lessons
    }

    // Tasks

    pub fn has_task(&self, task: &Task) -> bool {
        self.tasks.contains(task)
    }

    pub fn add_task(&mut self, task: Task) -> CollectionResult<()> {
        self.tasks.add(task)
    }

    pub fn remove_task(&mut self, task: &Task) -> CollectionResult<Task> {
        self.tasks.remove(task)
    }

    pub fn set_task(&mut self, target: &Task, edited: Task) -> CollectionResult<()> {
        self.tasks.replace(target, edited)
    }

    pub fn tasks(&self) -> &UniqueList<Task> {
        &self.tasks
    }
}

impl TryFrom<TrackSnapshot> for Track {
    type Error = crate::collection::CollectionError;

    fn try_from(snapshot: TrackSnapshot) -> CollectionResult<Self> {
        let mut track = Track::new();
        track.reset_data(snapshot)?;
        Ok(track)
    }
}
