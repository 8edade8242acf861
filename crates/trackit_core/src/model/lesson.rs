//! Lesson entity and its weekly schedule types.
//!
//! # Invariants
//! - A lesson is identified by `(code, lesson_type)`: one lesson per type per module.
//! - `LessonDateTime::start` is strictly before `LessonDateTime::end`.

use super::fields::{Address, Code, FieldError, FieldResult};
use super::{EntityKind, Identity};
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const LESSON_TYPE_CONSTRAINTS: &str =
    "Lesson type should be one of: lecture, tutorial, lab, recitation, sectional";
pub const LESSON_DATE_TIME_CONSTRAINTS: &str =
    "Lesson time should be of the format `Ddd HH:MM-HH:MM`, e.g. `Mon 17:45-21:00`, with start before end";

const TIME_FORMAT: &str = "%H:%M";

/// Closed set of lesson kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LessonType {
    Lecture,
    Tutorial,
    Lab,
    Recitation,
    Sectional,
}

impl LessonType {
    pub const ALL: [LessonType; 5] = [
        Self::Lecture,
        Self::Tutorial,
        Self::Lab,
        Self::Recitation,
        Self::Sectional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lecture => "lecture",
            Self::Tutorial => "tutorial",
            Self::Lab => "lab",
            Self::Recitation => "recitation",
            Self::Sectional => "sectional",
        }
    }
}

impl FromStr for LessonType {
    type Err = FieldError;

    fn from_str(value: &str) -> FieldResult<Self> {
        match value.trim() {
            "lecture" => Ok(Self::Lecture),
            "tutorial" => Ok(Self::Tutorial),
            "lab" => Ok(Self::Lab),
            "recitation" => Ok(Self::Recitation),
            "sectional" => Ok(Self::Sectional),
            _ => Err(FieldError::InvalidLessonType(value.to_string())),
        }
    }
}

impl Display for LessonType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week a lesson recurs on, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LessonWeekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl LessonWeekday {
    /// Maps a calendar date to the lesson weekday it falls on.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mon => "Mon",
            Self::Tue => "Tue",
            Self::Wed => "Wed",
            Self::Thu => "Thu",
            Self::Fri => "Fri",
            Self::Sat => "Sat",
            Self::Sun => "Sun",
        }
    }
}

impl From<Weekday> for LessonWeekday {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Mon => Self::Mon,
            Weekday::Tue => Self::Tue,
            Weekday::Wed => Self::Wed,
            Weekday::Thu => Self::Thu,
            Weekday::Fri => Self::Fri,
            Weekday::Sat => Self::Sat,
            Weekday::Sun => Self::Sun,
        }
    }
}

impl FromStr for LessonWeekday {
    type Err = FieldError;

    fn from_str(value: &str) -> FieldResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mon" => Ok(Self::Mon),
            "tue" => Ok(Self::Tue),
            "wed" => Ok(Self::Wed),
            "thu" => Ok(Self::Thu),
            "fri" => Ok(Self::Fri),
            "sat" => Ok(Self::Sat),
            "sun" => Ok(Self::Sun),
            _ => Err(FieldError::InvalidLessonDateTime(value.to_string())),
        }
    }
}

impl Display for LessonWeekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weekly time slot: weekday plus start and end time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LessonDateTime {
    weekday: LessonWeekday,
    start: NaiveTime,
    end: NaiveTime,
}

impl LessonDateTime {
    pub fn new(weekday: LessonWeekday, start: NaiveTime, end: NaiveTime) -> FieldResult<Self> {
        if start >= end {
            return Err(FieldError::InvalidLessonDateTime(format!(
                "{weekday} {}-{}",
                start.format(TIME_FORMAT),
                end.format(TIME_FORMAT)
            )));
        }
        Ok(Self {
            weekday,
            start,
            end,
        })
    }

    pub fn weekday(&self) -> LessonWeekday {
        self.weekday
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }
}

impl FromStr for LessonDateTime {
    type Err = FieldError;

    fn from_str(value: &str) -> FieldResult<Self> {
        let invalid = || FieldError::InvalidLessonDateTime(value.to_string());
        let (day, range) = value.trim().split_once(' ').ok_or_else(invalid)?;
        let (start, end) = range.trim().split_once('-').ok_or_else(invalid)?;
        let weekday = day.parse::<LessonWeekday>().map_err(|_| invalid())?;
        let start = NaiveTime::parse_from_str(start.trim(), TIME_FORMAT).map_err(|_| invalid())?;
        let end = NaiveTime::parse_from_str(end.trim(), TIME_FORMAT).map_err(|_| invalid())?;
        Self::new(weekday, start, end).map_err(|_| invalid())
    }
}

impl Display for LessonDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.weekday,
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

/// A weekly lesson of a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lesson {
    code: Code,
    lesson_type: LessonType,
    date_time: LessonDateTime,
    address: Address,
}

impl Lesson {
    pub fn new(
        code: Code,
        lesson_type: LessonType,
        date_time: LessonDateTime,
        address: Address,
    ) -> Self {
        Self {
            code,
            lesson_type,
            date_time,
            address,
        }
    }

    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn lesson_type(&self) -> LessonType {
        self.lesson_type
    }

    pub fn date_time(&self) -> &LessonDateTime {
        &self.date_time
    }

    pub fn weekday(&self) -> LessonWeekday {
        self.date_time.weekday
    }

    pub fn address(&self) -> &Address {
        &self.address
    }
}

impl Identity for Lesson {
    const KIND: EntityKind = EntityKind::Lesson;

    fn is_same(&self, other: &Self) -> bool {
        self.code == other.code && self.lesson_type == other.lesson_type
    }
}

impl Display for Lesson {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} at {}",
            self.code, self.lesson_type, self.date_time, self.address
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{LessonDateTime, LessonType, LessonWeekday};
    use chrono::NaiveDate;

    #[test]
    fn date_time_parses_and_displays_canonical_form() {
        let parsed: LessonDateTime = "mon 09:05-10:00".parse().unwrap();
        assert_eq!(parsed.weekday(), LessonWeekday::Mon);
        assert_eq!(parsed.to_string(), "Mon 09:05-10:00");
    }

    #[test]
    fn date_time_rejects_reversed_range() {
        assert!("Tue 12:00-10:00".parse::<LessonDateTime>().is_err());
        assert!("Tue 12:00-12:00".parse::<LessonDateTime>().is_err());
        assert!("Someday 12:00-13:00".parse::<LessonDateTime>().is_err());
    }

    #[test]
    fn weekday_maps_calendar_dates() {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(LessonWeekday::from_date(monday), LessonWeekday::Mon);
        assert_eq!(LessonWeekday::from_date(sunday), LessonWeekday::Sun);
    }

    #[test]
    fn lesson_type_rejects_unknown_names() {
        for lesson_type in LessonType::ALL {
            assert_eq!(lesson_type.as_str().parse::<LessonType>().unwrap(), lesson_type);
        }
        assert!("seminar".parse::<LessonType>().is_err());
    }
}
