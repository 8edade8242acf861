//! Validated field value types shared by all entities.
//!
//! # Responsibility
//! - Enforce per-field constraints at construction time.
//! - Keep invalid text from ever reaching an entity or the Track.
//!
//! # Invariants
//! - Every constructor trims input before validating it.
//! - A value that exists has already passed its constraint check.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{Alphabetic}\p{N}]+( [\p{Alphabetic}\p{N}]+)*$").expect("valid name regex")
});
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]([A-Za-z0-9+_.\-]*[A-Za-z0-9])?@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)*[A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])$",
    )
    .expect("valid email regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid tag regex"));
static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2,3}\d{4}[A-Z]?$").expect("valid code regex"));

pub const NAME_CONSTRAINTS: &str =
    "Names should only contain alphanumeric characters and spaces, and it should not be blank";
pub const PHONE_CONSTRAINTS: &str =
    "Phone numbers should only contain numbers, and it should be at least 3 digits long";
pub const EMAIL_CONSTRAINTS: &str =
    "Emails should be of the format local-part@domain with alphanumeric labels";
pub const ADDRESS_CONSTRAINTS: &str = "Addresses can take any values, and it should not be blank";
pub const TAG_CONSTRAINTS: &str = "Tag names should be alphanumeric";
pub const CODE_CONSTRAINTS: &str =
    "Module codes should be 2-3 letters, 4 digits and an optional letter suffix, e.g. CS2103T";

/// Field constraint violation raised while constructing a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    InvalidName(String),
    InvalidPhone(String),
    InvalidEmail(String),
    InvalidAddress(String),
    InvalidTag(String),
    InvalidCode(String),
    InvalidLessonType(String),
    InvalidLessonDateTime(String),
    InvalidDate(String),
}

impl FieldError {
    /// Returns the user-facing constraint message for this violation.
    pub fn constraint(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => NAME_CONSTRAINTS,
            Self::InvalidPhone(_) => PHONE_CONSTRAINTS,
            Self::InvalidEmail(_) => EMAIL_CONSTRAINTS,
            Self::InvalidAddress(_) => ADDRESS_CONSTRAINTS,
            Self::InvalidTag(_) => TAG_CONSTRAINTS,
            Self::InvalidCode(_) => CODE_CONSTRAINTS,
            Self::InvalidLessonType(_) => super::lesson::LESSON_TYPE_CONSTRAINTS,
            Self::InvalidLessonDateTime(_) => super::lesson::LESSON_DATE_TIME_CONSTRAINTS,
            Self::InvalidDate(_) => super::task::DATE_CONSTRAINTS,
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::InvalidName(value)
            | Self::InvalidPhone(value)
            | Self::InvalidEmail(value)
            | Self::InvalidAddress(value)
            | Self::InvalidTag(value)
            | Self::InvalidCode(value)
            | Self::InvalidLessonType(value)
            | Self::InvalidLessonDateTime(value)
            | Self::InvalidDate(value) => value,
        };
        write!(f, "invalid value `{value}`: {}", self.constraint())
    }
}

impl Error for FieldError {}

pub type FieldResult<T> = Result<T, FieldError>;

macro_rules! text_field {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = FieldError;

            fn from_str(value: &str) -> FieldResult<Self> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = FieldError;

            fn try_from(value: String) -> FieldResult<Self> {
                Self::new(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

text_field!(
    /// Person, module or task name.
    Name
);
text_field!(
    /// Contact phone number.
    Phone
);
text_field!(
    /// Contact email address.
    Email
);
text_field!(
    /// Postal address or lesson venue.
    Address
);
text_field!(
    /// Contact tag. Module codes double as tags for module contacts.
    Tag
);
text_field!(
    /// Unique module code, e.g. `CS2103T`.
    Code
);

impl Name {
    pub fn new(value: &str) -> FieldResult<Self> {
        let trimmed = value.trim();
        if !NAME_RE.is_match(trimmed) {
            return Err(FieldError::InvalidName(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Case-insensitive comparison used for contact identity.
    pub fn eq_ignore_case(&self, other: &Name) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl Phone {
    pub fn new(value: &str) -> FieldResult<Self> {
        let trimmed = value.trim();
        if !PHONE_RE.is_match(trimmed) {
            return Err(FieldError::InvalidPhone(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Email {
    pub fn new(value: &str) -> FieldResult<Self> {
        let trimmed = value.trim();
        let domain_ok = trimmed
            .rsplit_once('@')
            .and_then(|(_, domain)| domain.rsplit('.').next())
            .map(|last_label| last_label.len() >= 2)
            .unwrap_or(false);
        if !EMAIL_RE.is_match(trimmed) || !domain_ok {
            return Err(FieldError::InvalidEmail(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Address {
    pub fn new(value: &str) -> FieldResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FieldError::InvalidAddress(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Tag {
    pub fn new(value: &str) -> FieldResult<Self> {
        let trimmed = value.trim();
        if !TAG_RE.is_match(trimmed) {
            return Err(FieldError::InvalidTag(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Code {
    /// Creates a module code; input is uppercased before validation.
    pub fn new(value: &str) -> FieldResult<Self> {
        let normalized = value.trim().to_ascii_uppercase();
        if !CODE_RE.is_match(&normalized) {
            return Err(FieldError::InvalidCode(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

impl From<&Code> for Tag {
    fn from(code: &Code) -> Self {
        // Codes are alphanumeric, so they are always valid tags.
        Tag(code.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{Address, Code, Email, FieldError, Name, Phone, Tag};

    #[test]
    fn name_trims_and_rejects_symbols() {
        assert_eq!(Name::new("  Alex Yeoh ").unwrap().as_str(), "Alex Yeoh");
        assert!(Name::new("").is_err());
        assert!(Name::new("alex*").is_err());
        assert!(Name::new("two  spaces").is_err());
    }

    #[test]
    fn name_identity_ignores_case() {
        let lower = Name::new("alex yeoh").unwrap();
        let upper = Name::new("ALEX YEOH").unwrap();
        assert!(lower.eq_ignore_case(&upper));
        assert_ne!(lower, upper);
    }

    #[test]
    fn phone_requires_three_digits() {
        assert!(Phone::new("911").is_ok());
        assert!(Phone::new("91").is_err());
        assert!(Phone::new("9011p041").is_err());
    }

    #[test]
    fn email_accepts_common_shapes() {
        assert!(Email::new("alexyeoh@example.com").is_ok());
        assert!(Email::new("a.b+c@u.nus.edu").is_ok());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("alex@").is_err());
        assert!(Email::new("alex@example.c").is_err());
        assert!(Email::new(".alex@example.com").is_err());
    }

    #[test]
    fn code_is_uppercased() {
        let code = Code::new("cs2103t").unwrap();
        assert_eq!(code.as_str(), "CS2103T");
        assert!(Code::new("CS21").is_err());
        assert!(Code::new("C2103").is_err());
    }

    #[test]
    fn blank_address_and_tag_are_rejected() {
        assert!(Address::new("   ").is_err());
        assert!(Tag::new("friends").is_ok());
        assert!(Tag::new("best friends").is_err());
    }

    #[test]
    fn deserialize_goes_through_validation() {
        let err = serde_json::from_str::<Phone>("\"12\"").unwrap_err();
        assert!(err.to_string().contains("at least 3 digits"));

        let error = FieldError::InvalidCode("X".to_string());
        assert!(error.to_string().contains("`X`"));
    }
}
