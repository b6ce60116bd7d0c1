//! Command layer: business logic for every verb, free of I/O assumptions.
//!
//! Handlers operate on the [`Store`] through a [`CommandContext`] and return
//! structured [`CmdResult`] values; the binary decides how to render them.
//! The only interactive seam is the [`Prompter`] trait, which the guided
//! `add-contact` / `change-contact` flows use to gather field values.

use crate::error::Result;
use crate::model::{Contact, Note};
use crate::store::Store;
use chrono::NaiveDate;

pub mod contacts;
pub mod dispatch;
pub mod notes;

/// Interactive input seam. The console implementation lives in the binary;
/// tests script answers instead of touching a terminal.
pub trait Prompter {
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Inline feedback during a guided flow (invalid value, retry hint).
    fn warn(&mut self, _message: &str) {}
}

/// Everything a handler may need: the store, the prompt seam, and a fixed
/// `today` so date logic stays deterministic.
pub struct CommandContext<'a> {
    pub store: &'a mut Store,
    pub prompter: &'a mut dyn Prompter,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Structured outcome of one command, rendered by the I/O layer.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub contacts: Vec<Contact>,
    pub notes: Vec<Note>,
    pub birthdays: Vec<(Contact, NaiveDate)>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.contacts = contacts;
        self
    }

    pub fn with_notes(mut self, notes: Vec<Note>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_birthdays(mut self, birthdays: Vec<(Contact, NaiveDate)>) -> Self {
        self.birthdays = birthdays;
        self
    }
}
