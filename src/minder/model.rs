use crate::error::{MinderError, Result};
use crate::fields::{Address, Birthday, Email, Phone};
use serde::{Deserialize, Serialize};

/// A contact record, keyed by its (case-sensitive) name in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub phones: Vec<Phone>,
    #[serde(default)]
    pub emails: Vec<Email>,
    pub birthday: Option<Birthday>,
    pub address: Option<Address>,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phones: Vec::new(),
            emails: Vec::new(),
            birthday: None,
            address: None,
        }
    }

    /// Duplicate numbers within one contact are rejected.
    pub fn add_phone(&mut self, phone: Phone) -> Result<()> {
        if self.phones.contains(&phone) {
            return Err(MinderError::Validation(format!(
                "Phone {} is already on this contact",
                phone
            )));
        }
        self.phones.push(phone);
        Ok(())
    }

    /// Duplicate addresses within one contact are rejected.
    pub fn add_email(&mut self, email: Email) -> Result<()> {
        if self.emails.contains(&email) {
            return Err(MinderError::Validation(format!(
                "Email {} is already on this contact",
                email
            )));
        }
        self.emails.push(email);
        Ok(())
    }
}

pub type NoteId = u64;

/// A free-form note. The id is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    /// Tags are a set in insertion order; adding an existing tag is a no-op.
    /// Returns whether the tag was actually added.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.tags.iter().any(|t| *t == tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Returns whether the tag was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Exact-match, case-sensitive.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
