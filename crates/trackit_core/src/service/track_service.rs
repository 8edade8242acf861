//! Track service: Track ownership, live views and derived queries.
//!
//! # Responsibility
//! - Delegate every mutation to the Track and log its outcome.
//! - Keep one filtered view per entity kind and answer reads through them.
//! - Expose `can_add_more_module`; enforcing the ceiling is left to callers.
//!
//! # Invariants
//! - Views are re-evaluated on every read; nothing here caches results.
//! - Date-relative queries read "today" from the injected clock.
//! - Task queries leave the task view filtered to what they returned, so
//!   index-based commands resolve against the list the user saw.

use crate::clock::{Clock, SystemClock};
use crate::collection::CollectionResult;
use crate::config::UserPrefs;
use crate::model::contact::Contact;
use crate::model::fields::{Code, Tag};
use crate::model::lesson::{Lesson, LessonType};
use crate::model::module::Module;
use crate::model::task::Task;
use crate::model::{EntityKind, Identity};
use crate::predicate::{self, Predicate};
use crate::track::Track;
use crate::view::FilteredView;
use chrono::{Duration, NaiveDate};
use log::{debug, warn};
use std::sync::Arc;

/// Maximum number of modules the command layer accepts.
pub const MAX_MODULES: usize = 6;

/// Days ahead covered by the "upcoming" task window.
pub const UPCOMING_TASK_DAYS: i64 = 7;

/// Owner of the Track and its per-kind filtered views.
pub struct TrackService {
    track: Track,
    prefs: UserPrefs,
    clock: Arc<dyn Clock>,
    contact_view: FilteredView<Contact>,
    module_view: FilteredView<Module>,
    lesson_view: FilteredView<Lesson>,
    task_view: FilteredView<Task>,
}

impl TrackService {
    /// Creates a service reading "today" from the system clock.
    pub fn new(track: Track, prefs: UserPrefs) -> Self {
        Self::with_clock(track, prefs, Arc::new(SystemClock))
    }

    pub fn with_clock(track: Track, prefs: UserPrefs, clock: Arc<dyn Clock>) -> Self {
        debug!(
            "event=service_init module=service status=ok contacts={} modules={} lessons={} tasks={}",
            track.contacts().len(),
            track.modules().len(),
            track.lessons().len(),
            track.tasks().len()
        );
        Self {
            track,
            prefs,
            clock,
            contact_view: FilteredView::new(),
            module_view: FilteredView::new(),
            lesson_view: FilteredView::new(),
            task_view: FilteredView::new(),
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Replaces all Track data with a copy of `other`.
    pub fn set_track(&mut self, other: &Track) -> CollectionResult<()> {
        let result = self.track.reset_data(other.snapshot());
        if let Err(err) = &result {
            warn!("event=track_reset module=service status=error error={err}");
        }
        result
    }

    pub fn prefs(&self) -> &UserPrefs {
        &self.prefs
    }

    pub fn set_prefs(&mut self, prefs: UserPrefs) {
        self.prefs = prefs;
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Hides contacts, lessons and tasks until the next filter update.
    pub fn clear_all_views(&mut self) {
        self.contact_view.update_filter(Predicate::show_none());
        self.lesson_view.update_filter(Predicate::show_none());
        self.task_view.update_filter(Predicate::show_none());
    }

    // Contacts

    pub fn has_contact(&self, contact: &Contact) -> bool {
        self.track.has_contact(contact)
    }

    pub fn add_contact(&mut self, contact: Contact) -> CollectionResult<()> {
        let result = self.track.add_contact(contact);
        log_mutation("add", Contact::KIND, &result);
        result
    }

    pub fn delete_contact(&mut self, target: &Contact) -> CollectionResult<Contact> {
        let result = self.track.remove_contact(target);
        log_mutation("delete", Contact::KIND, &result);
        result
    }

    pub fn set_contact(&mut self, target: &Contact, edited: Contact) -> CollectionResult<()> {
        let result = self.track.set_contact(target, edited);
        log_mutation("edit", Contact::KIND, &result);
        result
    }

    pub fn filtered_contacts(&self) -> Vec<&Contact> {
        self.contact_view.items(self.track.contacts())
    }

    pub fn update_contact_filter(&mut self, predicate: Predicate<Contact>) {
        self.contact_view.update_filter(predicate);
    }

    /// Resets the contact view to show everything and returns it.
    pub fn all_contacts(&mut self) -> Vec<&Contact> {
        self.contact_view.update_filter(Predicate::show_all());
        self.filtered_contacts()
    }

    /// Filters contacts to those tagged with the module code.
    pub fn module_contacts(&mut self, code: &Code) -> Vec<&Contact> {
        self.contact_view
            .update_filter(predicate::contact_has_tag(Tag::from(code)));
        self.filtered_contacts()
    }

    // Modules

    pub fn has_module(&self, module: &Module) -> bool {
        self.track.has_module(module)
    }

    pub fn has_module_code(&self, code: &Code) -> bool {
        self.track.has_module_code(code)
    }

    pub fn get_module(&self, code: &Code) -> Option<&Module> {
        self.track.get_module(code)
    }

    /// Adds a module without checking the module ceiling.
    pub fn add_module(&mut self, module: Module) -> CollectionResult<()> {
        let result = self.track.add_module(module);
        log_mutation("add", Module::KIND, &result);
        result
    }

    /// Deletes a module. Tasks and lessons referring to it are kept.
    pub fn delete_module(&mut self, target: &Module) -> CollectionResult<Module> {
        let result = self.track.remove_module(target);
        log_mutation("delete", Module::KIND, &result);
        result
    }

    pub fn set_module(&mut self, target: &Module, edited: Module) -> CollectionResult<()> {
        let result = self.track.set_module(target, edited);
        log_mutation("edit", Module::KIND, &result);
        result
    }

    pub fn can_add_more_module(&self) -> bool {
        self.track.modules().len() < MAX_MODULES
    }

    pub fn filtered_modules(&self) -> Vec<&Module> {
        self.module_view.items(self.track.modules())
    }

    pub fn update_module_filter(&mut self, predicate: Predicate<Module>) {
        self.module_view.update_filter(predicate);
    }

    // Lessons

    pub fn has_lesson(&self, lesson: &Lesson) -> bool {
        self.track.has_lesson(lesson)
    }

    pub fn get_lesson(&self, code: &Code, lesson_type: LessonType) -> Option<&Lesson> {
        self.track.get_lesson(code, lesson_type)
    }

    pub fn add_lesson(&mut self, lesson: Lesson) -> CollectionResult<()> {
        let result = self.track.add_lesson(lesson);
        log_mutation("add", Lesson::KIND, &result);
        result
    }

    pub fn delete_lesson(&mut self, target: &Lesson) -> CollectionResult<Lesson> {
        let result = self.track.remove_lesson(target);
        log_mutation("delete", Lesson::KIND, &result);
        result
    }

    pub fn set_lesson(&mut self, target: &Lesson, edited: Lesson) -> CollectionResult<()> {
        let result = self.track.set_lesson(target, edited);
        log_mutation("edit", Lesson::KIND, &result);
        result
    }

    pub fn filtered_lessons(&self) -> Vec<&Lesson> {
        self.lesson_view.items(self.track.lessons())
    }

    pub fn update_lesson_filter(&mut self, predicate: Predicate<Lesson>) {
        self.lesson_view.update_filter(predicate);
    }

    /// Lessons on the weekday of `date`, in chronological order.
    ///
    /// Re-sorts the lesson collection and resets the lesson view first.
    pub fn day_upcoming_lessons(&mut self, date: NaiveDate) -> Vec<&Lesson> {
        self.track.sort_lessons();
        self.lesson_view.update_filter(Predicate::show_all());
        self.lesson_view
            .items_where(self.track.lessons(), &predicate::lesson_on_date(date))
    }

    /// Filters lessons to one module.
    pub fn module_lessons(&mut self, code: &Code) -> Vec<&Lesson> {
        self.lesson_view
            .update_filter(predicate::lesson_has_code(code.clone()));
        self.filtered_lessons()
    }

    // Tasks

    pub fn has_task(&self, task: &Task) -> bool {
        self.track.has_task(task)
    }

    pub fn add_task(&mut self, task: Task) -> CollectionResult<()> {
        let result = self.track.add_task(task);
        log_mutation("add", Task::KIND, &result);
        result
    }

    pub fn delete_task(&mut self, target: &Task) -> CollectionResult<Task> {
        let result = self.track.remove_task(target);
        log_mutation("delete", Task::KIND, &result);
        result
    }

    pub fn set_task(&mut self, target: &Task, edited: Task) -> CollectionResult<()> {
        let result = self.track.set_task(target, edited);
        log_mutation("edit", Task::KIND, &result);
        result
    }

    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.task_view.items(self.track.tasks())
    }

    pub fn update_task_filter(&mut self, predicate: Predicate<Task>) {
        self.task_view.update_filter(predicate);
    }

    /// Filters tasks to one module.
    pub fn module_tasks(&mut self, code: &Code) -> Vec<&Task> {
        self.task_view
            .update_filter(predicate::task_has_code(code.clone()));
        self.filtered_tasks()
    }

    /// Filters tasks to those due before today.
    ///
    /// The view keeps the clock-backed predicate, so later reads re-check
    /// against the current date.
    pub fn overdue_tasks(&mut self) -> Vec<&Task> {
        let overdue = predicate::task_is_overdue(self.clock());
        self.task_view
            .update_filter(Predicate::show_all().and(&overdue));
        self.filtered_tasks()
    }

    /// Filters tasks to those due after the upcoming window (today + 7 days).
    pub fn future_tasks(&mut self) -> Vec<&Task> {
        let cutoff = self.today() + Duration::days(UPCOMING_TASK_DAYS);
        self.task_view
            .update_filter(Predicate::show_all().and(&predicate::task_after_date(cutoff)));
        self.filtered_tasks()
    }

    /// Filters tasks to those due exactly on `date`.
    pub fn day_upcoming_tasks(&mut self, date: NaiveDate) -> Vec<&Task> {
        self.task_view
            .update_filter(Predicate::show_all().and(&predicate::task_on_date(date)));
        self.filtered_tasks()
    }
}

fn log_mutation<T>(action: &str, kind: EntityKind, result: &CollectionResult<T>) {
    match result {
        Ok(_) => debug!("event=entity_{action} module=service kind={kind} status=ok"),
        Err(err) => debug!(
            "event=entity_{action} module=service kind={kind} status=error error={err}"
        ),
    }
}
