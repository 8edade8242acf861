//! Contact entity.

use super::fields::{Address, Email, Name, Phone, Tag};
use super::{EntityKind, Identity};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// A person, identified by name regardless of letter case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    name: Name,
    phone: Phone,
    email: Email,
    address: Option<Address>,
    tags: BTreeSet<Tag>,
}

impl Contact {
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        address: Option<Address>,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            tags: tags.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Tags in sorted order.
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

impl Identity for Contact {
    const KIND: EntityKind = EntityKind::Contact;

    fn is_same(&self, other: &Self) -> bool {
        self.name.eq_ignore_case(&other.name)
    }
}

impl Display for Contact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Phone: {} Email: {}", self.name, self.phone, self.email)?;
        if let Some(address) = &self.address {
            write!(f, " Address: {address}")?;
        }
        if !self.tags.is_empty() {
            let tags = self
                .tags
                .iter()
                .map(|tag| format!("[{tag}]"))
                .collect::<Vec<_>>()
                .join("");
            write!(f, " Tags: {tags}")?;
        }
        Ok(())
    }
}
