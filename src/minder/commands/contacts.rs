//! Contact verbs: the guided add/change flows plus lookup and search.

use crate::birthdays;
use crate::commands::{CmdMessage, CmdResult, CommandContext};
use crate::error::{MinderError, Result};
use crate::fields::{Address, Birthday, Email, Phone};
use crate::model::Contact;
use crate::store::ContactUpdate;

/// `add-contact <name>` — creates the contact, then gathers phones, emails,
/// address and birthday through the prompt seam. Bad values warn and
/// re-prompt; nothing is stored until the whole flow finishes.
pub fn add(ctx: &mut CommandContext, args: &[String]) -> Result<CmdResult> {
    let name = args.join(" ");
    if ctx.store.get_contact(&name).is_ok() {
        return Err(MinderError::Duplicate(name));
    }
    let mut contact = Contact::new(name.clone());

    loop {
        let answer = ctx.prompter.ask("Phone number (or 'n' to skip)")?;
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("n") {
            break;
        }
        if answer.is_empty() {
            ctx.prompter.warn("Phone number cannot be empty. Enter 'n' to skip.");
            continue;
        }
        if let Err(e) = Phone::parse(answer).and_then(|p| contact.add_phone(p)) {
            ctx.prompter.warn(&e.to_string());
        }
    }

    loop {
        let answer = ctx.prompter.ask("Email (or 'n' to skip)")?;
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("n") {
            break;
        }
        if answer.is_empty() {
            ctx.prompter.warn("Email cannot be empty. Enter 'n' to skip.");
            continue;
        }
        if let Err(e) = Email::parse(answer).and_then(|e| contact.add_email(e)) {
            ctx.prompter.warn(&e.to_string());
        }
    }

    loop {
        let answer = ctx.prompter.ask("Address (or 'n' to skip)")?;
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("n") {
            break;
        }
        match Address::parse(answer) {
            Ok(address) => {
                contact.address = Some(address);
                break;
            }
            Err(e) => ctx.prompter.warn(&e.to_string()),
        }
    }

    loop {
        let answer = ctx.prompter.ask("Birthday DD.MM.YYYY (or 'n' to skip)")?;
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("n") {
            break;
        }
        match Birthday::parse(answer, ctx.today) {
            Ok(birthday) => {
                contact.birthday = Some(birthday);
                break;
            }
            Err(e) => ctx.prompter.warn(&e.to_string()),
        }
    }

    ctx.store.add_contact(contact)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Contact '{}' added.", name))))
}

/// `change-contact <name>` — prompts replacement values per field; an empty
/// answer keeps the current value. The store is mutated once, at the end.
pub fn change(ctx: &mut CommandContext, args: &[String]) -> Result<CmdResult> {
    let name = args.join(" ");
    // fail before prompting so the user is not walked through a dead flow
    ctx.store.get_contact(&name)?;

    let mut update = ContactUpdate::default();

    loop {
        let answer = ctx
            .prompter
            .ask("New phone numbers, comma-separated (empty to keep current)")?;
        let answer = answer.trim();
        if answer.is_empty() {
            break;
        }
        match parse_list(answer, Phone::parse) {
            Ok(phones) => {
                update.phones = Some(phones);
                break;
            }
            Err(e) => ctx.prompter.warn(&e.to_string()),
        }
    }

    loop {
        let answer = ctx
            .prompter
            .ask("New emails, comma-separated (empty to keep current)")?;
        let answer = answer.trim();
        if answer.is_empty() {
            break;
        }
        match parse_list(answer, Email::parse) {
            Ok(emails) => {
                update.emails = Some(emails);
                break;
            }
            Err(e) => ctx.prompter.warn(&e.to_string()),
        }
    }

    loop {
        let answer = ctx.prompter.ask("New address (empty to keep current)")?;
        let answer = answer.trim();
        if answer.is_empty() {
            break;
        }
        match Address::parse(answer) {
            Ok(address) => {
                update.address = Some(address);
                break;
            }
            Err(e) => ctx.prompter.warn(&e.to_string()),
        }
    }

    loop {
        let answer = ctx
            .prompter
            .ask("New birthday DD.MM.YYYY (empty to keep current)")?;
        let answer = answer.trim();
        if answer.is_empty() {
            break;
        }
        match Birthday::parse(answer, ctx.today) {
            Ok(birthday) => {
                update.birthday = Some(birthday);
                break;
            }
            Err(e) => ctx.prompter.warn(&e.to_string()),
        }
    }

    let contact = ctx.store.update_contact(&name, update)?.clone();
    Ok(CmdResult::default()
        .with_contacts(vec![contact])
        .with_message(CmdMessage::success(format!("Contact '{}' updated.", name))))
}

pub fn delete(ctx: &mut CommandContext, args: &[String]) -> Result<CmdResult> {
    let name = args.join(" ");
    ctx.store.delete_contact(&name)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Contact '{}' deleted.", name))))
}

pub fn all(ctx: &mut CommandContext, _args: &[String]) -> Result<CmdResult> {
    let contacts: Vec<Contact> = ctx.store.contacts().cloned().collect();
    if contacts.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No contacts.")));
    }
    Ok(CmdResult::default().with_contacts(contacts))
}

pub fn search(ctx: &mut CommandContext, args: &[String]) -> Result<CmdResult> {
    let query = args.join(" ");
    let hits: Vec<Contact> = ctx
        .store
        .search_contacts(&query)
        .into_iter()
        .cloned()
        .collect();
    if hits.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "No contacts matched '{}'.",
            query
        ))));
    }
    Ok(CmdResult::default().with_contacts(hits))
}

pub fn show_phones(ctx: &mut CommandContext, args: &[String]) -> Result<CmdResult> {
    let name = args.join(" ");
    let contact = ctx.store.get_contact(&name)?;
    let message = if contact.phones.is_empty() {
        CmdMessage::info(format!("{} has no phone numbers recorded.", name))
    } else {
        let phones: Vec<String> = contact.phones.iter().map(ToString::to_string).collect();
        CmdMessage::info(format!("{}: {}", name, phones.join(", ")))
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn show_birthday(ctx: &mut CommandContext, args: &[String]) -> Result<CmdResult> {
    let name = args.join(" ");
    let contact = ctx.store.get_contact(&name)?;
    let message = match contact.birthday {
        Some(birthday) => CmdMessage::info(format!("{}: {}", name, birthday)),
        None => CmdMessage::info(format!("{} has no birthday recorded.", name)),
    };
    Ok(CmdResult::default().with_message(message))
}

/// `birthdays [days]` — upcoming birthdays within the window (default 7).
pub fn upcoming(ctx: &mut CommandContext, args: &[String]) -> Result<CmdResult> {
    let window_days = match args.first() {
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            MinderError::Validation(format!("Invalid number of days '{}'", raw))
        })?,
        None => birthdays::DEFAULT_WINDOW_DAYS,
    };
    if window_days > birthdays::MAX_WINDOW_DAYS {
        return Err(MinderError::Validation(format!(
            "Window of {} days is too large (max {})",
            window_days,
            birthdays::MAX_WINDOW_DAYS
        )));
    }

    let hits: Vec<_> = birthdays::upcoming_birthdays(ctx.store.contacts(), ctx.today, window_days)
        .into_iter()
        .map(|(contact, date)| (contact.clone(), date))
        .collect();

    if hits.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "There are no upcoming birthdays within {} days.",
            window_days
        ))));
    }
    Ok(CmdResult::default().with_birthdays(hits))
}

fn parse_list<T, F: Fn(&str) -> Result<T>>(raw: &str, parse: F) -> Result<Vec<T>> {
    raw.split(',').map(|part| parse(part.trim())).collect()
}
