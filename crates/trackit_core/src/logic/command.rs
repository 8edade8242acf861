//! Executable commands and the policy checks that sit in front of the Track.
//!
//! # Responsibility
//! - Reject tasks and lessons whose module does not exist.
//! - Reject new modules once `MAX_MODULES` is reached.
//! - Resolve displayed indexes against the current filtered views.
//!
//! # Invariants
//! - Policy checks run before any mutation, so a rejected command changes nothing.
//! - Module deletion never touches tasks or lessons referring to it.

use super::parser::ParseError;
use crate::collection::CollectionError;
use crate::model::contact::Contact;
use crate::model::fields::{Address, Code, Email, Name, Phone, Tag};
use crate::model::lesson::{Lesson, LessonDateTime, LessonType};
use crate::model::module::Module;
use crate::model::task::{format_date, Task};
use crate::model::{EntityKind, Identity};
use crate::predicate::Predicate;
use crate::service::track_service::{TrackService, MAX_MODULES};
use crate::storage::StorageError;
use crate::track::Track;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CommandResult<T> = Result<T, CommandError>;

/// Reasons a command failed.
///
/// Every variant except `Storage` means the Track was left unchanged.
/// `Storage` is raised after the change was applied in memory but could not
/// be written to disk.
#[derive(Debug)]
pub enum CommandError {
    Parse(ParseError),
    /// Index is beyond the currently displayed list.
    InvalidIndex(EntityKind),
    ModuleNotFound(Code),
    LessonNotFound {
        code: Code,
        lesson_type: LessonType,
    },
    ModuleLimitReached(usize),
    Collection(CollectionError),
    /// The command ran but its result could not be saved.
    Storage(StorageError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::InvalidIndex(kind) => write!(f, "the {kind} index provided is invalid"),
            Self::ModuleNotFound(code) => write!(f, "module {code} does not exist"),
            Self::LessonNotFound { code, lesson_type } => {
                write!(f, "{code} has no {lesson_type} lesson")
            }
            Self::ModuleLimitReached(limit) => {
                write!(f, "module limit reached: at most {limit} modules can be tracked")
            }
            Self::Collection(err) => write!(f, "{err}"),
            Self::Storage(err) => {
                write!(f, "change kept in memory but could not be saved: {err}")
            }
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Collection(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for CommandError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<CollectionError> for CommandError {
    fn from(value: CollectionError) -> Self {
        Self::Collection(value)
    }
}

impl From<StorageError> for CommandError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Feedback returned to the user after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub feedback: String,
    pub exit: bool,
}

impl CommandOutcome {
    fn message(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            exit: false,
        }
    }
}

/// Field replacements for a contact edit; `None` keeps the old value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactEdit {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    /// Replaces the whole tag set when present.
    pub tags: Option<Vec<Tag>>,
}

impl ContactEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.tags.is_none()
    }

    fn apply(self, target: &Contact) -> Contact {
        Contact::new(
            self.name.unwrap_or_else(|| target.name().clone()),
            self.phone.unwrap_or_else(|| target.phone().clone()),
            self.email.unwrap_or_else(|| target.email().clone()),
            self.address.or_else(|| target.address().cloned()),
            self.tags
                .unwrap_or_else(|| target.tags().iter().cloned().collect()),
        )
    }
}

/// Field replacements for a task edit; `None` keeps the old value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub name: Option<Name>,
    pub date: Option<NaiveDate>,
    pub code: Option<Code>,
    /// An empty remark clears the old one.
    pub remark: Option<String>,
}

impl TaskEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.date.is_none() && self.code.is_none() && self.remark.is_none()
    }

    fn apply(self, target: &Task) -> Task {
        Task::new(
            self.name.unwrap_or_else(|| target.name().clone()),
            self.date.unwrap_or_else(|| target.date()),
            self.code.or_else(|| target.code().cloned()),
            self.remark.or_else(|| target.remark().map(str::to_string)),
        )
    }
}

/// A parsed, ready-to-run command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddContact(Contact),
    EditContact { index: usize, edit: ContactEdit },
    DeleteContact(usize),
    ListContacts,
    AddModule(Module),
    EditModule {
        code: Code,
        name: Option<Name>,
        description: Option<String>,
    },
    DeleteModule(Code),
    ViewModule(Code),
    ListModules,
    AddLesson(Lesson),
    EditLesson {
        code: Code,
        lesson_type: LessonType,
        date_time: Option<LessonDateTime>,
        address: Option<Address>,
    },
    DeleteLesson {
        code: Code,
        lesson_type: LessonType,
    },
    ListLessons(Option<Code>),
    AddTask(Task),
    EditTask { index: usize, edit: TaskEdit },
    DeleteTask(usize),
    ListTasks,
    OverdueTasks,
    FutureTasks,
    /// Lessons and tasks for a date; `None` means today.
    Upcoming(Option<NaiveDate>),
    Clear,
    Help,
    Exit,
}

impl Command {
    /// Short stable name used in log events.
    pub fn word(&self) -> &'static str {
        match self {
            Self::AddContact(_) => "contact_add",
            Self::EditContact { .. } => "contact_edit",
            Self::DeleteContact(_) => "contact_delete",
            Self::ListContacts => "contact_list",
            Self::AddModule(_) => "module_add",
            Self::EditModule { .. } => "module_edit",
            Self::DeleteModule(_) => "module_delete",
            Self::ViewModule(_) => "module_view",
            Self::ListModules => "module_list",
            Self::AddLesson(_) => "lesson_add",
            Self::EditLesson { .. } => "lesson_edit",
            Self::DeleteLesson { .. } => "lesson_delete",
            Self::ListLessons(_) => "lesson_list",
            Self::AddTask(_) => "task_add",
            Self::EditTask { .. } => "task_edit",
            Self::DeleteTask(_) => "task_delete",
            Self::ListTasks => "task_list",
            Self::OverdueTasks => "task_overdue",
            Self::FutureTasks => "task_future",
            Self::Upcoming(_) => "upcoming",
            Self::Clear => "clear",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    /// Whether a successful run changes Track data and must be saved.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::AddContact(_)
                | Self::EditContact { .. }
                | Self::DeleteContact(_)
                | Self::AddModule(_)
                | Self::EditModule { .. }
                | Self::DeleteModule(_)
                | Self::AddLesson(_)
                | Self::EditLesson { .. }
                | Self::DeleteLesson { .. }
                | Self::AddTask(_)
                | Self::EditTask { .. }
                | Self::DeleteTask(_)
                | Self::Clear
        )
    }

    pub fn execute(self, service: &mut TrackService) -> CommandResult<CommandOutcome> {
        match self {
            Self::AddContact(contact) => {
                let feedback = format!("New contact added: {contact}");
                service.add_contact(contact)?;
                Ok(CommandOutcome::message(feedback))
            }
            Self::EditContact { index, edit } => {
                let target = service
                    .filtered_contacts()
                    .get(index)
                    .map(|contact| (*contact).clone())
                    .ok_or(CommandError::InvalidIndex(Contact::KIND))?;
                let edited = edit.apply(&target);
                let feedback = format!("Edited contact: {edited}");
                service.set_contact(&target, edited)?;
                service.update_contact_filter(Predicate::show_all());
                Ok(CommandOutcome::message(feedback))
            }
            Self::DeleteContact(index) => {
                let target = service
                    .filtered_contacts()
                    .get(index)
                    .map(|contact| (*contact).clone())
                    .ok_or(CommandError::InvalidIndex(Contact::KIND))?;
                let removed = service.delete_contact(&target)?;
                Ok(CommandOutcome::message(format!("Deleted contact: {removed}")))
            }
            Self::ListContacts => Ok(CommandOutcome::message(render(
                "Listed all contacts",
                &service.all_contacts(),
            ))),
            Self::AddModule(module) => {
                if service.has_module(&module) {
                    return Err(CollectionError::DuplicateEntity(Module::KIND).into());
                }
                if !service.can_add_more_module() {
                    return Err(CommandError::ModuleLimitReached(MAX_MODULES));
                }
                let feedback = format!("New module added: {module}");
                service.add_module(module)?;
                Ok(CommandOutcome::message(feedback))
            }
            Self::EditModule {
                code,
                name,
                description,
            } => {
                let target = existing_module(service, &code)?;
                let edited = Module::new(
                    code,
                    name.unwrap_or_else(|| target.name().clone()),
                    description.unwrap_or_else(|| target.description().to_string()),
                );
                let feedback = format!("Edited module: {edited}");
                service.set_module(&target, edited)?;
                Ok(CommandOutcome::message(feedback))
            }
            Self::DeleteModule(code) => {
                let target = existing_module(service, &code)?;
                let removed = service.delete_module(&target)?;
                Ok(CommandOutcome::message(format!("Deleted module: {removed}")))
            }
            Self::ViewModule(code) => {
                let module = existing_module(service, &code)?;
                let lessons = render("Lessons", &service.module_lessons(&code));
                let tasks = render("Tasks", &service.module_tasks(&code));
                let contacts = render("Contacts", &service.module_contacts(&code));
                Ok(CommandOutcome::message(format!(
                    "{module}\n{lessons}\n{tasks}\n{contacts}"
                )))
            }
            Self::ListModules => {
                service.update_module_filter(Predicate::show_all());
                Ok(CommandOutcome::message(render(
                    "Listed all modules",
                    &service.filtered_modules(),
                )))
            }
            Self::AddLesson(lesson) => {
                if service.has_lesson(&lesson) {
                    return Err(CollectionError::DuplicateEntity(Lesson::KIND).into());
                }
                ensure_module(service, lesson.code())?;
                let feedback = format!("New lesson added: {lesson}");
                service.add_lesson(lesson)?;
                Ok(CommandOutcome::message(feedback))
            }
            Self::EditLesson {
                code,
                lesson_type,
                date_time,
                address,
            } => {
                let target = service
                    .get_lesson(&code, lesson_type)
                    .cloned()
                    .ok_or_else(|| CommandError::LessonNotFound {
                        code: code.clone(),
                        lesson_type,
                    })?;
                let edited = Lesson::new(
                    code,
                    lesson_type,
                    date_time.unwrap_or(*target.date_time()),
                    address.unwrap_or_else(|| target.address().clone()),
                );
                let feedback = format!("Edited lesson: {edited}");
                service.set_lesson(&target, edited)?;
                Ok(CommandOutcome::message(feedback))
            }
            Self::DeleteLesson { code, lesson_type } => {
                let target = service
                    .get_lesson(&code, lesson_type)
                    .cloned()
                    .ok_or(CommandError::LessonNotFound { code, lesson_type })?;
                let removed = service.delete_lesson(&target)?;
                Ok(CommandOutcome::message(format!("Deleted lesson: {removed}")))
            }
            Self::ListLessons(code) => {
                let lessons = match &code {
                    Some(code) => service.module_lessons(code),
                    None => {
                        service.update_lesson_filter(Predicate::show_all());
                        service.filtered_lessons()
                    }
                };
                Ok(CommandOutcome::message(render("Listed lessons", &lessons)))
            }
            Self::AddTask(task) => {
                if service.has_task(&task) {
                    return Err(CollectionError::DuplicateEntity(Task::KIND).into());
                }
                if let Some(code) = task.code() {
                    ensure_module(service, code)?;
                }
                let feedback = format!("New task added: {task}");
                service.add_task(task)?;
                Ok(CommandOutcome::message(feedback))
            }
            Self::EditTask { index, edit } => {
                let target = service
                    .filtered_tasks()
                    .get(index)
                    .map(|task| (*task).clone())
                    .ok_or(CommandError::InvalidIndex(Task::KIND))?;
                // Only a newly given code must exist; a stale one is kept as is.
                if let Some(code) = &edit.code {
                    ensure_module(service, code)?;
                }
                let edited = edit.apply(&target);
                let feedback = format!("Edited task: {edited}");
                service.set_task(&target, edited)?;
                Ok(CommandOutcome::message(feedback))
            }
            Self::DeleteTask(index) => {
                let target = service
                    .filtered_tasks()
                    .get(index)
                    .map(|task| (*task).clone())
                    .ok_or(CommandError::InvalidIndex(Task::KIND))?;
                let removed = service.delete_task(&target)?;
                Ok(CommandOutcome::message(format!("Deleted task: {removed}")))
            }
            Self::ListTasks => {
                service.update_task_filter(Predicate::show_all());
                Ok(CommandOutcome::message(render(
                    "Listed all tasks",
                    &service.filtered_tasks(),
                )))
            }
            Self::OverdueTasks => Ok(CommandOutcome::message(render(
                "Overdue tasks",
                &service.overdue_tasks(),
            ))),
            Self::FutureTasks => Ok(CommandOutcome::message(render(
                "Tasks due after the coming week",
                &service.future_tasks(),
            ))),
            Self::Upcoming(date) => {
                let date = date.unwrap_or_else(|| service.today());
                let lessons = render("Lessons", &service.day_upcoming_lessons(date));
                let tasks = render("Tasks", &service.day_upcoming_tasks(date));
                Ok(CommandOutcome::message(format!(
                    "Upcoming on {}\n{lessons}\n{tasks}",
                    format_date(date)
                )))
            }
            Self::Clear => {
                service.set_track(&Track::new())?;
                service.update_contact_filter(Predicate::show_all());
                service.update_module_filter(Predicate::show_all());
                service.update_lesson_filter(Predicate::show_all());
                service.update_task_filter(Predicate::show_all());
                Ok(CommandOutcome::message("All data has been cleared"))
            }
            Self::Help => Ok(CommandOutcome::message(help_text())),
            Self::Exit => Ok(CommandOutcome {
                feedback: "Exiting TrackIt".to_string(),
                exit: true,
            }),
        }
    }
}

fn existing_module(service: &TrackService, code: &Code) -> CommandResult<Module> {
    service
        .get_module(code)
        .cloned()
        .ok_or_else(|| CommandError::ModuleNotFound(code.clone()))
}

fn ensure_module(service: &TrackService, code: &Code) -> CommandResult<()> {
    if service.has_module_code(code) {
        Ok(())
    } else {
        Err(CommandError::ModuleNotFound(code.clone()))
    }
}

fn render<T: Display>(header: &str, items: &[&T]) -> String {
    let mut out = format!("{header}:");
    if items.is_empty() {
        out.push_str("\n  (none)");
    }
    for (index, item) in items.iter().enumerate() {
        out.push_str(&format!("\n  [{}] {item}", index + 1));
    }
    out
}

fn help_text() -> String {
    use super::parser::{
        CONTACT_ADD_USAGE, CONTACT_DELETE_USAGE, CONTACT_EDIT_USAGE, LESSON_ADD_USAGE,
        LESSON_DELETE_USAGE, LESSON_EDIT_USAGE, MODULE_ADD_USAGE, MODULE_CODE_USAGE,
        MODULE_EDIT_USAGE, TASK_ADD_USAGE, TASK_DELETE_USAGE, TASK_EDIT_USAGE, UPCOMING_USAGE,
    };

    [
        CONTACT_ADD_USAGE,
        CONTACT_EDIT_USAGE,
        CONTACT_DELETE_USAGE,
        "C list",
        MODULE_ADD_USAGE,
        MODULE_EDIT_USAGE,
        MODULE_CODE_USAGE,
        "M list",
        LESSON_ADD_USAGE,
        LESSON_EDIT_USAGE,
        LESSON_DELETE_USAGE,
        "L list [m/CODE]",
        TASK_ADD_USAGE,
        TASK_EDIT_USAGE,
        TASK_DELETE_USAGE,
        "T list | T overdue | T future",
        UPCOMING_USAGE,
        "clear | help | exit",
    ]
    .join("\n")
}
