//! Text command parsing.
//!
//! # Responsibility
//! - Split command text into a command word and prefixed arguments.
//! - Build validated entity values before any command touches the Track.
//!
//! # Invariants
//! - A prefix is only recognized at the start of the arguments or after whitespace.
//! - Indexes are one-based in text and zero-based once parsed.

use super::command::{Command, ContactEdit, TaskEdit};
use crate::model::contact::Contact;
use crate::model::fields::{Address, Code, Email, FieldError, Name, Phone, Tag};
use crate::model::lesson::{Lesson, LessonDateTime, LessonType};
use crate::model::module::Module;
use crate::model::task::{parse_date, Task};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const PREFIX_NAME: &str = "n/";
pub const PREFIX_PHONE: &str = "p/";
pub const PREFIX_EMAIL: &str = "e/";
pub const PREFIX_ADDRESS: &str = "a/";
pub const PREFIX_TAG: &str = "t/";
pub const PREFIX_CODE: &str = "m/";
pub const PREFIX_TYPE: &str = "ty/";
pub const PREFIX_DATE: &str = "d/";
pub const PREFIX_REMARK: &str = "r/";
pub const PREFIX_DESCRIPTION: &str = "desc/";

pub const CONTACT_ADD_USAGE: &str = "C add n/NAME p/PHONE e/EMAIL [a/ADDRESS] [t/TAG]...";
pub const CONTACT_EDIT_USAGE: &str = "C edit INDEX [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [t/TAG]...";
pub const CONTACT_DELETE_USAGE: &str = "C delete INDEX";
pub const MODULE_ADD_USAGE: &str = "M add m/CODE n/NAME [desc/DESCRIPTION]";
pub const MODULE_EDIT_USAGE: &str = "M edit CODE [n/NAME] [desc/DESCRIPTION]";
pub const MODULE_CODE_USAGE: &str = "M delete CODE | M view CODE";
pub const LESSON_ADD_USAGE: &str = "L add m/CODE ty/TYPE d/DAY HH:MM-HH:MM a/VENUE";
pub const LESSON_EDIT_USAGE: &str = "L edit m/CODE ty/TYPE [d/DAY HH:MM-HH:MM] [a/VENUE]";
pub const LESSON_DELETE_USAGE: &str = "L delete m/CODE ty/TYPE";
pub const TASK_ADD_USAGE: &str = "T add n/NAME d/DD/MM/YYYY [m/CODE] [r/REMARK]";
pub const TASK_EDIT_USAGE: &str = "T edit INDEX [n/NAME] [d/DD/MM/YYYY] [m/CODE] [r/REMARK]";
pub const TASK_DELETE_USAGE: &str = "T delete INDEX";
pub const UPCOMING_USAGE: &str = "upcoming [d/DD/MM/YYYY]";

const ALL_PREFIXES: &[&str] = &[
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_TAG,
    PREFIX_CODE,
    PREFIX_TYPE,
    PREFIX_DATE,
    PREFIX_REMARK,
    PREFIX_DESCRIPTION,
];

pub type ParseResult<T> = Result<T, ParseError>;

/// Command text that cannot be turned into a `Command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    /// Arguments do not match the command's usage.
    InvalidFormat(&'static str),
    /// Index is not a positive integer.
    InvalidIndex(String),
    /// An edit command named no field to change.
    NothingToEdit(&'static str),
    Field(FieldError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(word) => write!(f, "unknown command: `{word}` (try `help`)"),
            Self::InvalidFormat(usage) => write!(f, "invalid command format, usage: {usage}"),
            Self::InvalidIndex(value) => {
                write!(f, "index `{value}` is not a non-zero unsigned integer")
            }
            Self::NothingToEdit(usage) => {
                write!(f, "at least one field to edit must be provided, usage: {usage}")
            }
            Self::Field(err) => write!(f, "{}", err.constraint()),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for ParseError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

/// Preamble plus prefixed values of one command's argument text.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ArgumentMap {
    preamble: String,
    values: HashMap<&'static str, Vec<String>>,
}

impl ArgumentMap {
    /// Splits `args` on the known prefixes.
    pub fn tokenize(args: &str) -> Self {
        let mut markers: Vec<(usize, &'static str)> = Vec::new();
        let mut previous_is_space = true;
        for (offset, ch) in args.char_indices() {
            if previous_is_space {
                if let Some(prefix) = ALL_PREFIXES
                    .iter()
                    .find(|prefix| args[offset..].starts_with(**prefix))
                {
                    markers.push((offset, *prefix));
                }
            }
            previous_is_space = ch.is_whitespace();
        }

        let preamble_end = markers.first().map_or(args.len(), |(offset, _)| *offset);
        let mut map = Self {
            preamble: args[..preamble_end].trim().to_string(),
            values: HashMap::new(),
        };
        for (index, (offset, prefix)) in markers.iter().enumerate() {
            let value_end = markers
                .get(index + 1)
                .map_or(args.len(), |(next_offset, _)| *next_offset);
            let value = args[offset + prefix.len()..value_end].trim().to_string();
            map.values.entry(*prefix).or_default().push(value);
        }
        map
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: &str) -> Option<&str> {
        self.values
            .get(prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: &str) -> &[String] {
        self.values.get(prefix).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, prefix: &str) -> bool {
        self.values.contains_key(prefix)
    }

    fn require(&self, prefix: &str, usage: &'static str) -> ParseResult<&str> {
        self.value(prefix).ok_or(ParseError::InvalidFormat(usage))
    }

    fn require_empty_preamble(&self, usage: &'static str) -> ParseResult<()> {
        if self.preamble.is_empty() {
            Ok(())
        } else {
            Err(ParseError::InvalidFormat(usage))
        }
    }
}

/// Parses one line of user input.
pub fn parse_command(input: &str) -> ParseResult<Command> {
    let trimmed = input.trim();
    let (first, rest) = split_word(trimmed);
    match first {
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        "clear" => Ok(Command::Clear),
        "upcoming" => parse_upcoming(rest),
        "C" | "M" | "L" | "T" => {
            let (word, args) = split_word(rest);
            match first {
                "C" => parse_contact_command(word, args),
                "M" => parse_module_command(word, args),
                "L" => parse_lesson_command(word, args),
                _ => parse_task_command(word, args),
            }
        }
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

/// Parses a one-based index into a zero-based one.
pub fn parse_index(value: &str) -> ParseResult<usize> {
    let trimmed = value.trim();
    match trimmed.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index - 1),
        _ => Err(ParseError::InvalidIndex(trimmed.to_string())),
    }
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(end) => (&text[..end], &text[end..]),
        None => (text, ""),
    }
}

fn parse_contact_command(word: &str, args: &str) -> ParseResult<Command> {
    let map = ArgumentMap::tokenize(args);
    match word {
        "add" => {
            map.require_empty_preamble(CONTACT_ADD_USAGE)?;
            let name = Name::new(map.require(PREFIX_NAME, CONTACT_ADD_USAGE)?)?;
            let phone = Phone::new(map.require(PREFIX_PHONE, CONTACT_ADD_USAGE)?)?;
            let email = Email::new(map.require(PREFIX_EMAIL, CONTACT_ADD_USAGE)?)?;
            let address = map.value(PREFIX_ADDRESS).map(Address::new).transpose()?;
            let tags = parse_tags(map.all_values(PREFIX_TAG))?;
            Ok(Command::AddContact(Contact::new(
                name, phone, email, address, tags,
            )))
        }
        "edit" => {
            let index = parse_index(map.preamble())?;
            let edit = ContactEdit {
                name: map.value(PREFIX_NAME).map(Name::new).transpose()?,
                phone: map.value(PREFIX_PHONE).map(Phone::new).transpose()?,
                email: map.value(PREFIX_EMAIL).map(Email::new).transpose()?,
                address: map.value(PREFIX_ADDRESS).map(Address::new).transpose()?,
                tags: if map.has(PREFIX_TAG) {
                    Some(parse_tags(map.all_values(PREFIX_TAG))?)
                } else {
                    None
                },
            };
            if edit.is_empty() {
                return Err(ParseError::NothingToEdit(CONTACT_EDIT_USAGE));
            }
            Ok(Command::EditContact { index, edit })
        }
        "delete" => Ok(Command::DeleteContact(parse_index(map.preamble())?)),
        "list" => Ok(Command::ListContacts),
        _ => Err(ParseError::UnknownCommand(format!("C {word}"))),
    }
}

/// A lone empty `t/` clears all tags.
fn parse_tags(values: &[String]) -> ParseResult<Vec<Tag>> {
    if values.len() == 1 && values[0].is_empty() {
        return Ok(Vec::new());
    }
    Ok(values
        .iter()
        .map(|value| Tag::new(value))
        .collect::<Result<Vec<_>, _>>()?)
}

fn parse_module_command(word: &str, args: &str) -> ParseResult<Command> {
    let map = ArgumentMap::tokenize(args);
    match word {
        "add" => {
            map.require_empty_preamble(MODULE_ADD_USAGE)?;
            let code = Code::new(map.require(PREFIX_CODE, MODULE_ADD_USAGE)?)?;
            let name = Name::new(map.require(PREFIX_NAME, MODULE_ADD_USAGE)?)?;
            let description = map.value(PREFIX_DESCRIPTION).unwrap_or_default();
            Ok(Command::AddModule(Module::new(code, name, description)))
        }
        "edit" => {
            let code = Code::new(map.preamble())?;
            let name = map.value(PREFIX_NAME).map(Name::new).transpose()?;
            let description = map.value(PREFIX_DESCRIPTION).map(str::to_string);
            if name.is_none() && description.is_none() {
                return Err(ParseError::NothingToEdit(MODULE_EDIT_USAGE));
            }
            Ok(Command::EditModule {
                code,
                name,
                description,
            })
        }
        "delete" => Ok(Command::DeleteModule(parse_code_preamble(&map)?)),
        "view" => Ok(Command::ViewModule(parse_code_preamble(&map)?)),
        "list" => Ok(Command::ListModules),
        _ => Err(ParseError::UnknownCommand(format!("M {word}"))),
    }
}

fn parse_code_preamble(map: &ArgumentMap) -> ParseResult<Code> {
    if map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat(MODULE_CODE_USAGE));
    }
    Ok(Code::new(map.preamble())?)
}

fn parse_lesson_command(word: &str, args: &str) -> ParseResult<Command> {
    let map = ArgumentMap::tokenize(args);
    match word {
        "add" => {
            map.require_empty_preamble(LESSON_ADD_USAGE)?;
            let code = Code::new(map.require(PREFIX_CODE, LESSON_ADD_USAGE)?)?;
            let lesson_type = map
                .require(PREFIX_TYPE, LESSON_ADD_USAGE)?
                .parse::<LessonType>()?;
            let date_time = map
                .require(PREFIX_DATE, LESSON_ADD_USAGE)?
                .parse::<LessonDateTime>()?;
            let address = Address::new(map.require(PREFIX_ADDRESS, LESSON_ADD_USAGE)?)?;
            Ok(Command::AddLesson(Lesson::new(
                code,
                lesson_type,
                date_time,
                address,
            )))
        }
        "edit" => {
            map.require_empty_preamble(LESSON_EDIT_USAGE)?;
            let code = Code::new(map.require(PREFIX_CODE, LESSON_EDIT_USAGE)?)?;
            let lesson_type = map
                .require(PREFIX_TYPE, LESSON_EDIT_USAGE)?
                .parse::<LessonType>()?;
            let date_time = map
                .value(PREFIX_DATE)
                .map(str::parse::<LessonDateTime>)
                .transpose()?;
            let address = map.value(PREFIX_ADDRESS).map(Address::new).transpose()?;
            if date_time.is_none() && address.is_none() {
                return Err(ParseError::NothingToEdit(LESSON_EDIT_USAGE));
            }
            Ok(Command::EditLesson {
                code,
                lesson_type,
                date_time,
                address,
            })
        }
        "delete" => {
            map.require_empty_preamble(LESSON_DELETE_USAGE)?;
            let code = Code::new(map.require(PREFIX_CODE, LESSON_DELETE_USAGE)?)?;
            let lesson_type = map
                .require(PREFIX_TYPE, LESSON_DELETE_USAGE)?
                .parse::<LessonType>()?;
            Ok(Command::DeleteLesson { code, lesson_type })
        }
        "list" => {
            let code = map.value(PREFIX_CODE).map(Code::new).transpose()?;
            Ok(Command::ListLessons(code))
        }
        _ => Err(ParseError::UnknownCommand(format!("L {word}"))),
    }
}

fn parse_task_command(word: &str, args: &str) -> ParseResult<Command> {
    let map = ArgumentMap::tokenize(args);
    match word {
        "add" => {
            map.require_empty_preamble(TASK_ADD_USAGE)?;
            let name = Name::new(map.require(PREFIX_NAME, TASK_ADD_USAGE)?)?;
            let date = parse_date(map.require(PREFIX_DATE, TASK_ADD_USAGE)?)?;
            let code = map.value(PREFIX_CODE).map(Code::new).transpose()?;
            let remark = map.value(PREFIX_REMARK).map(str::to_string);
            Ok(Command::AddTask(Task::new(name, date, code, remark)))
        }
        "edit" => {
            let index = parse_index(map.preamble())?;
            let edit = TaskEdit {
                name: map.value(PREFIX_NAME).map(Name::new).transpose()?,
                date: map.value(PREFIX_DATE).map(parse_date).transpose()?,
                code: map.value(PREFIX_CODE).map(Code::new).transpose()?,
                remark: map.value(PREFIX_REMARK).map(str::to_string),
            };
            if edit.is_empty() {
                return Err(ParseError::NothingToEdit(TASK_EDIT_USAGE));
            }
            Ok(Command::EditTask { index, edit })
        }
        "delete" => Ok(Command::DeleteTask(parse_index(map.preamble())?)),
        "list" => Ok(Command::ListTasks),
        "overdue" => Ok(Command::OverdueTasks),
        "future" => Ok(Command::FutureTasks),
        _ => Err(ParseError::UnknownCommand(format!("T {word}"))),
    }
}

fn parse_upcoming(args: &str) -> ParseResult<Command> {
    let map = ArgumentMap::tokenize(args);
    map.require_empty_preamble(UPCOMING_USAGE)?;
    let date = map.value(PREFIX_DATE).map(parse_date).transpose()?;
    Ok(Command::Upcoming(date))
}

#[cfg(test)]
mod tests {
    use super::{parse_index, ArgumentMap, ParseError, PREFIX_DESCRIPTION, PREFIX_TAG, PREFIX_TYPE};

    #[test]
    fn tokenize_splits_preamble_and_repeated_prefixes() {
        let map = ArgumentMap::tokenize(" 2 t/friends t/classmate desc/a/b");
        assert_eq!(map.preamble(), "2");
        assert_eq!(map.all_values(PREFIX_TAG), ["friends", "classmate"]);
        assert_eq!(map.value(PREFIX_DESCRIPTION), Some("a/b"));
    }

    #[test]
    fn tokenize_ignores_prefixes_inside_words() {
        let map = ArgumentMap::tokenize("ty/lab a/COM1/B1");
        assert_eq!(map.value(PREFIX_TYPE), Some("lab"));
        assert_eq!(map.value("a/"), Some("COM1/B1"));
    }

    #[test]
    fn index_is_one_based() {
        assert_eq!(parse_index(" 3 ").unwrap(), 2);
        assert_eq!(
            parse_index("0").unwrap_err(),
            ParseError::InvalidIndex("0".to_string())
        );
        assert!(parse_index("-1").is_err());
    }
}
