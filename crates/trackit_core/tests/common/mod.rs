#![allow(dead_code)]

use chrono::NaiveDate;
use trackit_core::{
    Address, Code, Contact, Email, Lesson, LessonDateTime, LessonType, Module, Name, Phone, Tag,
    Task,
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn code(value: &str) -> Code {
    Code::new(value).unwrap()
}

pub fn contact(name: &str, tags: &[&str]) -> Contact {
    Contact::new(
        Name::new(name).unwrap(),
        Phone::new("94351253").unwrap(),
        Email::new("alice@example.com").unwrap(),
        Some(Address::new("123, Jurong West Ave 6, #08-111").unwrap()),
        tags.iter().map(|tag| Tag::new(tag).unwrap()),
    )
}

pub fn module(value: &str, name: &str) -> Module {
    Module::new(code(value), Name::new(name).unwrap(), "")
}

pub fn lesson(value: &str, lesson_type: LessonType, slot: &str) -> Lesson {
    Lesson::new(
        code(value),
        lesson_type,
        slot.parse::<LessonDateTime>().unwrap(),
        Address::new("COM1-B103").unwrap(),
    )
}

pub fn task(name: &str, due: NaiveDate, module_code: Option<&str>) -> Task {
    Task::new(Name::new(name).unwrap(), due, module_code.map(code), None)
}
