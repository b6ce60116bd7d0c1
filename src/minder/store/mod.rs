//! # Record Store
//!
//! [`Store`] is the single in-memory owner of all contacts and notes plus
//! the note-id counter. Everything the command layer does goes through it,
//! and the whole struct is the serializable snapshot that [`fs`] persists.
//!
//! Insertion order is part of the contract: listings and searches report
//! records in the order they were added.

use crate::error::{MinderError, Result};
use crate::fields::{Address, Birthday, Email, Phone};
use crate::model::{Contact, Note, NoteId};
use serde::{Deserialize, Serialize};

pub mod fs;

/// Replacement values for `update_contact`; `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct ContactUpdate {
    pub phones: Option<Vec<Phone>>,
    pub emails: Option<Vec<Email>>,
    pub birthday: Option<Birthday>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    contacts: Vec<Contact>,
    notes: Vec<Note>,
    next_note_id: NoteId,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            contacts: Vec::new(),
            notes: Vec::new(),
            next_note_id: 1,
        }
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // --- contacts ---

    pub fn add_contact(&mut self, contact: Contact) -> Result<()> {
        if contact.name.trim().is_empty() {
            return Err(MinderError::Validation(
                "Contact name cannot be empty".to_string(),
            ));
        }
        if self.contacts.iter().any(|c| c.name == contact.name) {
            return Err(MinderError::Duplicate(contact.name));
        }
        self.contacts.push(contact);
        Ok(())
    }

    pub fn get_contact(&self, name: &str) -> Result<&Contact> {
        self.contacts
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| MinderError::NotFound(format!("Contact '{}'", name)))
    }

    /// Applies only the supplied fields. Lists are validated before any
    /// mutation, so a failed update leaves the contact untouched.
    pub fn update_contact(&mut self, name: &str, update: ContactUpdate) -> Result<&Contact> {
        if let Some(phones) = &update.phones {
            ensure_unique(phones, |p| p.as_str(), "phone")?;
        }
        if let Some(emails) = &update.emails {
            ensure_unique(emails, |e| e.as_str(), "email")?;
        }

        let contact = self
            .contacts
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| MinderError::NotFound(format!("Contact '{}'", name)))?;

        if let Some(phones) = update.phones {
            contact.phones = phones;
        }
        if let Some(emails) = update.emails {
            contact.emails = emails;
        }
        if let Some(birthday) = update.birthday {
            contact.birthday = Some(birthday);
        }
        if let Some(address) = update.address {
            contact.address = Some(address);
        }
        Ok(contact)
    }

    pub fn delete_contact(&mut self, name: &str) -> Result<Contact> {
        let pos = self
            .contacts
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| MinderError::NotFound(format!("Contact '{}'", name)))?;
        Ok(self.contacts.remove(pos))
    }

    /// Contacts in insertion order.
    pub fn contacts(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    /// Case-insensitive substring match against name, any phone, any email,
    /// or the address. Matches come back in insertion order.
    pub fn search_contacts(&self, query: &str) -> Vec<&Contact> {
        let needle = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.phones.iter().any(|p| p.as_str().contains(&needle))
                    || c.emails
                        .iter()
                        .any(|e| e.as_str().to_lowercase().contains(&needle))
                    || c.address
                        .as_ref()
                        .is_some_and(|a| a.as_str().to_lowercase().contains(&needle))
            })
            .collect()
    }

    // --- notes ---

    /// Ids come from a store-wide counter and are never reused, even after
    /// the note they belonged to is deleted.
    pub fn add_note(&mut self, text: impl Into<String>) -> NoteId {
        let id = self.next_note_id;
        self.next_note_id += 1;
        self.notes.push(Note {
            id,
            text: text.into(),
            tags: Vec::new(),
        });
        id
    }

    pub fn get_note(&self, id: NoteId) -> Result<&Note> {
        self.notes
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| MinderError::NotFound(format!("Note {}", id)))
    }

    pub fn update_note(&mut self, id: NoteId, text: impl Into<String>) -> Result<&Note> {
        let note = self.note_mut(id)?;
        note.text = text.into();
        Ok(note)
    }

    pub fn delete_note(&mut self, id: NoteId) -> Result<Note> {
        let pos = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| MinderError::NotFound(format!("Note {}", id)))?;
        Ok(self.notes.remove(pos))
    }

    /// Notes in insertion order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    /// When every whitespace token is tag-form (`#tag`), returns notes
    /// carrying *all* of the queried tags (exact-match, case-sensitive).
    /// Otherwise the query is a case-insensitive substring match on text.
    pub fn search_notes(&self, query: &str) -> Vec<&Note> {
        let tokens: Vec<&str> = query.split_whitespace().collect();
        let all_tags = !tokens.is_empty() && tokens.iter().all(|t| t.len() > 1 && t.starts_with('#'));

        if all_tags {
            let wanted: Vec<&str> = tokens.iter().map(|t| &t[1..]).collect();
            self.notes
                .iter()
                .filter(|n| wanted.iter().all(|t| n.has_tag(t)))
                .collect()
        } else {
            let needle = query.trim().to_lowercase();
            self.notes
                .iter()
                .filter(|n| n.text.to_lowercase().contains(&needle))
                .collect()
        }
    }

    /// Adding a tag the note already carries is a no-op. Tags are stored
    /// without a leading `#`, so `#todo` and `todo` name the same tag.
    /// Returns how many tags were actually added.
    pub fn add_note_tags<S: AsRef<str>>(&mut self, id: NoteId, tags: &[S]) -> Result<usize> {
        let note = self.note_mut(id)?;
        let mut added = 0;
        for tag in tags {
            if note.add_tag(normalize_tag(tag.as_ref())) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Removing a tag the note does not carry is an error.
    pub fn remove_note_tag(&mut self, id: NoteId, tag: &str) -> Result<()> {
        let tag = normalize_tag(tag);
        let note = self.note_mut(id)?;
        if !note.remove_tag(tag) {
            return Err(MinderError::NotFound(format!(
                "Tag '{}' on note {}",
                tag, id
            )));
        }
        Ok(())
    }

    fn note_mut(&mut self, id: NoteId) -> Result<&mut Note> {
        self.notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| MinderError::NotFound(format!("Note {}", id)))
    }
}

fn normalize_tag(tag: &str) -> &str {
    tag.strip_prefix('#').unwrap_or(tag)
}

fn ensure_unique<T, F: Fn(&T) -> &str>(values: &[T], key: F, kind: &str) -> Result<()> {
    for (i, value) in values.iter().enumerate() {
        if values[..i].iter().any(|v| key(v) == key(value)) {
            return Err(MinderError::Validation(format!(
                "Duplicate {} {}",
                kind,
                key(value)
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn contact(name: &str) -> Contact {
        Contact::new(name)
    }

    #[test]
    fn add_then_get_returns_stored_values() {
        let mut store = Store::new();
        let mut alice = contact("Alice");
        alice.add_phone(Phone::parse("0501234567").unwrap()).unwrap();
        alice.add_email(Email::parse("alice@example.com").unwrap()).unwrap();
        store.add_contact(alice.clone()).unwrap();

        assert_eq!(store.get_contact("Alice").unwrap(), &alice);
    }

    #[test]
    fn add_contact_rejects_duplicate_name() {
        let mut store = Store::new();
        store.add_contact(contact("Alice")).unwrap();
        assert!(matches!(
            store.add_contact(contact("Alice")),
            Err(MinderError::Duplicate(_))
        ));
    }

    #[test]
    fn add_contact_rejects_empty_name() {
        let mut store = Store::new();
        assert!(matches!(
            store.add_contact(contact("  ")),
            Err(MinderError::Validation(_))
        ));
    }

    #[test]
    fn contact_names_are_case_sensitive_keys() {
        let mut store = Store::new();
        store.add_contact(contact("Alice")).unwrap();
        store.add_contact(contact("alice")).unwrap();
        assert_eq!(store.contacts().count(), 2);
    }

    #[test]
    fn delete_then_get_fails_with_not_found() {
        let mut store = Store::new();
        store.add_contact(contact("Alice")).unwrap();
        store.delete_contact("Alice").unwrap();
        assert!(matches!(
            store.get_contact("Alice"),
            Err(MinderError::NotFound(_))
        ));
    }

    #[test]
    fn update_unknown_contact_leaves_store_unchanged() {
        let mut store = Store::new();
        store.add_contact(contact("Alice")).unwrap();
        let before = store.clone();

        let update = ContactUpdate {
            phones: Some(vec![Phone::parse("0501234567").unwrap()]),
            ..Default::default()
        };
        assert!(matches!(
            store.update_contact("Bob", update),
            Err(MinderError::NotFound(_))
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn update_with_duplicate_phones_is_rejected_before_mutation() {
        let mut store = Store::new();
        let mut alice = contact("Alice");
        alice.add_phone(Phone::parse("1112223334").unwrap()).unwrap();
        store.add_contact(alice).unwrap();
        let before = store.clone();

        let dup = Phone::parse("0501234567").unwrap();
        let update = ContactUpdate {
            phones: Some(vec![dup.clone(), dup]),
            ..Default::default()
        };
        assert!(store.update_contact("Alice", update).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn update_replaces_only_supplied_fields() {
        let mut store = Store::new();
        let mut alice = contact("Alice");
        alice.add_phone(Phone::parse("1112223334").unwrap()).unwrap();
        alice.birthday = Some(Birthday::parse("24.02.1990", today()).unwrap());
        store.add_contact(alice).unwrap();

        let update = ContactUpdate {
            phones: Some(vec![Phone::parse("0501234567").unwrap()]),
            ..Default::default()
        };
        store.update_contact("Alice", update).unwrap();

        let alice = store.get_contact("Alice").unwrap();
        assert_eq!(alice.phones[0].as_str(), "0501234567");
        assert_eq!(
            alice.birthday.unwrap().to_string(),
            "24.02.1990",
            "unsupplied fields must survive"
        );
    }

    #[test]
    fn search_contacts_matches_any_field_case_insensitively() {
        let mut store = Store::new();
        let mut alice = contact("Alice");
        alice.add_phone(Phone::parse("0501234567").unwrap()).unwrap();
        alice.address = Some(Address::parse("12 Baker Street").unwrap());
        store.add_contact(alice).unwrap();
        let mut bob = contact("Bob");
        bob.add_email(Email::parse("bob@example.com").unwrap()).unwrap();
        store.add_contact(bob).unwrap();

        assert_eq!(store.search_contacts("ALICE").len(), 1);
        assert_eq!(store.search_contacts("12345").len(), 1);
        assert_eq!(store.search_contacts("baker").len(), 1);
        assert_eq!(store.search_contacts("EXAMPLE.COM").len(), 1);
        assert_eq!(store.search_contacts("nobody").len(), 0);
    }

    #[test]
    fn search_contacts_preserves_insertion_order() {
        let mut store = Store::new();
        store.add_contact(contact("Carol")).unwrap();
        store.add_contact(contact("Aaron")).unwrap();
        store.add_contact(contact("Cara")).unwrap();

        let hits: Vec<&str> = store
            .search_contacts("car")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(hits, vec!["Carol", "Cara"]);
    }

    #[test]
    fn note_ids_are_monotonic_and_never_reused() {
        let mut store = Store::new();
        assert_eq!(store.add_note("one"), 1);
        assert_eq!(store.add_note("two"), 2);
        assert_eq!(store.add_note("three"), 3);

        store.delete_note(2).unwrap();
        let next = store.add_note("four");
        assert_eq!(next, 4);
        assert!(store.get_note(2).is_err());
    }

    #[test]
    fn update_note_replaces_text() {
        let mut store = Store::new();
        let id = store.add_note("draft");
        store.update_note(id, "final").unwrap();
        assert_eq!(store.get_note(id).unwrap().text, "final");
    }

    #[test]
    fn note_ops_fail_on_unknown_id() {
        let mut store = Store::new();
        assert!(matches!(
            store.update_note(99, "x"),
            Err(MinderError::NotFound(_))
        ));
        assert!(matches!(store.delete_note(99), Err(MinderError::NotFound(_))));
        assert!(matches!(
            store.add_note_tags(99, &["a"]),
            Err(MinderError::NotFound(_))
        ));
    }

    #[test]
    fn tag_search_requires_every_queried_tag() {
        let mut store = Store::new();
        let both = store.add_note("has both");
        store.add_note_tags(both, &["a", "b"]).unwrap();
        let only_a = store.add_note("has a");
        store.add_note_tags(only_a, &["a"]).unwrap();

        let hits = store.search_notes("#a #b");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, both);
    }

    #[test]
    fn text_search_is_case_insensitive_substring() {
        let mut store = Store::new();
        store.add_note("Buy milk tomorrow");
        store.add_note("call the bank");

        let hits = store.search_notes("MILK");
        assert_eq!(hits.len(), 1);
        assert_eq!(store.search_notes("nothing").len(), 0);
    }

    #[test]
    fn mixed_tokens_fall_back_to_text_search() {
        let mut store = Store::new();
        let id = store.add_note("groceries #todo list");
        store.add_note_tags(id, &["todo"]).unwrap();

        // "#todo list" is not all tag-form, so it substring-matches the text
        let hits = store.search_notes("#todo list");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn adding_existing_tag_is_a_noop() {
        let mut store = Store::new();
        let id = store.add_note("n");
        assert_eq!(store.add_note_tags(id, &["a", "a", "b"]).unwrap(), 2);
        assert_eq!(store.get_note(id).unwrap().tags, vec!["a", "b"]);
    }

    #[test]
    fn hash_prefix_is_stripped_so_add_and_search_agree() {
        let mut store = Store::new();
        let id = store.add_note("n");
        assert_eq!(store.add_note_tags(id, &["#todo"]).unwrap(), 1);
        assert_eq!(store.get_note(id).unwrap().tags, vec!["todo"]);
        assert_eq!(store.search_notes("#todo").len(), 1);

        // bare and prefixed forms name the same tag
        assert_eq!(store.add_note_tags(id, &["todo"]).unwrap(), 0);
        store.remove_note_tag(id, "#todo").unwrap();
        assert!(store.get_note(id).unwrap().tags.is_empty());
    }

    #[test]
    fn removing_missing_tag_fails_with_not_found() {
        let mut store = Store::new();
        let id = store.add_note("n");
        store.add_note_tags(id, &["a"]).unwrap();
        assert!(matches!(
            store.remove_note_tag(id, "b"),
            Err(MinderError::NotFound(_))
        ));
        store.remove_note_tag(id, "a").unwrap();
    }

    #[test]
    fn snapshot_round_trip_preserves_everything() {
        let mut store = Store::new();
        let mut alice = contact("Alice");
        alice.add_phone(Phone::parse("0501234567").unwrap()).unwrap();
        alice.birthday = Some(Birthday::parse("24.02.1990", today()).unwrap());
        store.add_contact(alice).unwrap();
        let id = store.add_note("remember");
        store.add_note_tags(id, &["todo"]).unwrap();
        let gone = store.add_note("gone");
        store.delete_note(gone).unwrap();

        let json = serde_json::to_string(&store).unwrap();
        let reloaded: Store = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, store);

        // counter survives too: the next id continues past the deleted note
        let mut reloaded = reloaded;
        assert_eq!(reloaded.add_note("next"), 3);
    }
}
