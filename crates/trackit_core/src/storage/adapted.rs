//! Serde-facing mirrors of the entity types.
//!
//! Required fields are `Option` so a missing field can be reported by name
//! instead of as a generic deserialization failure.

use super::{StorageError, StorageResult};
use crate::model::contact::Contact;
use crate::model::fields::{Address, Code, Email, FieldError, Name, Phone, Tag};
use crate::model::lesson::{Lesson, LessonDateTime, LessonType};
use crate::model::module::Module;
use crate::model::task::{format_date, parse_date, Task};
use crate::track::{Track, TrackSnapshot};
use serde::{Deserialize, Serialize};

fn required<'a>(value: &'a Option<String>, entity: &str, field: &str) -> StorageResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| StorageError::InvalidData(format!("{entity}'s {field} field is missing!")))
}

fn invalid(err: FieldError) -> StorageError {
    StorageError::InvalidData(err.constraint().to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AdaptedContact {
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    tags: Vec<String>,
}

impl From<&Contact> for AdaptedContact {
    fn from(contact: &Contact) -> Self {
        Self {
            name: Some(contact.name().to_string()),
            phone: Some(contact.phone().to_string()),
            email: Some(contact.email().to_string()),
            address: contact.address().map(ToString::to_string),
            tags: contact.tags().iter().map(ToString::to_string).collect(),
        }
    }
}

impl AdaptedContact {
    fn to_model(&self) -> StorageResult<Contact> {
        let name = Name::new(required(&self.name, "Contact", "Name")?).map_err(invalid)?;
        let phone = Phone::new(required(&self.phone, "Contact", "Phone")?).map_err(invalid)?;
        let email = Email::new(required(&self.email, "Contact", "Email")?).map_err(invalid)?;
        let address = self
            .address
            .as_deref()
            .map(Address::new)
            .transpose()
            .map_err(invalid)?;
        let tags = self
            .tags
            .iter()
            .map(|tag| Tag::new(tag))
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;
        Ok(Contact::new(name, phone, email, address, tags))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AdaptedModule {
    code: Option<String>,
    name: Option<String>,
    description: String,
}

impl From<&Module> for AdaptedModule {
    fn from(module: &Module) -> Self {
        Self {
            code: Some(module.code().to_string()),
            name: Some(module.name().to_string()),
            description: module.description().to_string(),
        }
    }
}

impl AdaptedModule {
    fn to_model(&self) -> StorageResult<Module> {
        let code = Code::new(required(&self.code, "Module", "Code")?).map_err(invalid)?;
        let name = Name::new(required(&self.name, "Module", "Name")?).map_err(invalid)?;
        Ok(Module::new(code, name, self.description.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AdaptedLesson {
    code: Option<String>,
    #[serde(rename = "type")]
    lesson_type: Option<String>,
    date: Option<String>,
    address: Option<String>,
}

impl From<&Lesson> for AdaptedLesson {
    fn from(lesson: &Lesson) -> Self {
        Self {
            code: Some(lesson.code().to_string()),
            lesson_type: Some(lesson.lesson_type().to_string()),
            date: Some(lesson.date_time().to_string()),
            address: Some(lesson.address().to_string()),
        }
    }
}

impl AdaptedLesson {
    fn to_model(&self) -> StorageResult<Lesson> {
        let code = Code::new(required(&self.code, "Lesson", "Code")?).map_err(invalid)?;
        let lesson_type = required(&self.lesson_type, "Lesson", "Type")?
            .parse::<LessonType>()
            .map_err(invalid)?;
        let date_time = required(&self.date, "Lesson", "Date")?
            .parse::<LessonDateTime>()
            .map_err(invalid)?;
        let address =
            Address::new(required(&self.address, "Lesson", "Address")?).map_err(invalid)?;
        Ok(Lesson::new(code, lesson_type, date_time, address))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AdaptedTask {
    name: Option<String>,
    date: Option<String>,
    code: Option<String>,
    remark: Option<String>,
}

impl From<&Task> for AdaptedTask {
    fn from(task: &Task) -> Self {
        Self {
            name: Some(task.name().to_string()),
            date: Some(format_date(task.date())),
            code: task.code().map(ToString::to_string),
            remark: task.remark().map(ToString::to_string),
        }
    }
}

impl AdaptedTask {
    fn to_model(&self) -> StorageResult<Task> {
        let name = Name::new(required(&self.name, "Task", "Name")?).map_err(invalid)?;
        let date = parse_date(required(&self.date, "Task", "Date")?).map_err(invalid)?;
        let code = self
            .code
            .as_deref()
            .map(Code::new)
            .transpose()
            .map_err(invalid)?;
        Ok(Task::new(name, date, code, self.remark.clone()))
    }
}

/// Top-level JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct SerializableTrack {
    contacts: Vec<AdaptedContact>,
    modules: Vec<AdaptedModule>,
    lessons: Vec<AdaptedLesson>,
    tasks: Vec<AdaptedTask>,
}

impl From<&Track> for SerializableTrack {
    fn from(track: &Track) -> Self {
        Self {
            contacts: track.contacts().iter().map(AdaptedContact::from).collect(),
            modules: track.modules().iter().map(AdaptedModule::from).collect(),
            lessons: track.lessons().iter().map(AdaptedLesson::from).collect(),
            tasks: track.tasks().iter().map(AdaptedTask::from).collect(),
        }
    }
}

impl SerializableTrack {
    /// Validates every entry and rebuilds the Track.
    pub(super) fn to_model(&self) -> StorageResult<Track> {
        let snapshot = TrackSnapshot {
            contacts: self
                .contacts
                .iter()
                .map(AdaptedContact::to_model)
                .collect::<StorageResult<_>>()?,
            modules: self
                .modules
                .iter()
                .map(AdaptedModule::to_model)
                .collect::<StorageResult<_>>()?,
            lessons: self
                .lessons
                .iter()
                .map(AdaptedLesson::to_model)
                .collect::<StorageResult<_>>()?,
            tasks: self
                .tasks
                .iter()
                .map(AdaptedTask::to_model)
                .collect::<StorageResult<_>>()?,
        };
        Ok(Track::try_from(snapshot)?)
    }
}
