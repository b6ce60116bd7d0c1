//! Note verbs: CRUD, tagging, and the text-or-tag search.

use crate::commands::{CmdMessage, CmdResult, CommandContext};
use crate::error::{MinderError, Result};
use crate::model::{Note, NoteId};

pub fn add(ctx: &mut CommandContext, args: &[String]) -> Result<CmdResult> {
    let text = args.join(" ");
    let id = ctx.store.add_note(text);
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Note added (id {}).", id))))
}

pub fn change(ctx: &mut CommandContext, args: &[String]) -> Result<CmdResult> {
    let id = parse_note_id(&args[0])?;
    let text = args[1..].join(" ");
    ctx.store.update_note(id, text)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Note {} changed.", id))))
}

pub fn delete(ctx: &mut CommandContext, args: &[String]) -> Result<CmdResult> {
    let id = parse_note_id(&args[0])?;
    ctx.store.delete_note(id)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Note {} deleted.", id))))
}

pub fn all(ctx: &mut CommandContext, _args: &[String]) -> Result<CmdResult> {
    let notes: Vec<Note> = ctx.store.notes().cloned().collect();
    if notes.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No notes.")));
    }
    Ok(CmdResult::default().with_notes(notes))
}

pub fn search(ctx: &mut CommandContext, args: &[String]) -> Result<CmdResult> {
    let query = args.join(" ");
    let hits: Vec<Note> = ctx.store.search_notes(&query).into_iter().cloned().collect();
    if hits.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "No notes matched '{}'.",
            query
        ))));
    }
    Ok(CmdResult::default().with_notes(hits))
}

pub fn add_tags(ctx: &mut CommandContext, args: &[String]) -> Result<CmdResult> {
    let id = parse_note_id(&args[0])?;
    let added = ctx.store.add_note_tags(id, &args[1..])?;
    let message = if added == 0 {
        CmdMessage::info(format!("Note {} already carries those tags.", id))
    } else {
        CmdMessage::success(format!("Added {} tag(s) to note {}.", added, id))
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn remove_tag(ctx: &mut CommandContext, args: &[String]) -> Result<CmdResult> {
    let id = parse_note_id(&args[0])?;
    ctx.store.remove_note_tag(id, &args[1])?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Removed tag '{}' from note {}.",
        args[1], id
    ))))
}

fn parse_note_id(raw: &str) -> Result<NoteId> {
    raw.parse()
        .map_err(|_| MinderError::Validation(format!("Invalid note id '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ctx, ScriptedPrompter};
    use crate::store::Store;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn add_joins_args_into_the_note_text() {
        let mut store = Store::new();
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        add(&mut ctx(&mut store, &mut prompter), &args(&["buy", "milk"])).unwrap();
        assert_eq!(store.get_note(1).unwrap().text, "buy milk");
    }

    #[test]
    fn change_requires_a_numeric_id() {
        let mut store = Store::new();
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        let err = change(&mut ctx(&mut store, &mut prompter), &args(&["abc", "text"]));
        assert!(matches!(err, Err(MinderError::Validation(_))));
    }

    #[test]
    fn tag_commands_round_trip() {
        let mut store = Store::new();
        store.add_note("n");
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        add_tags(&mut ctx(&mut store, &mut prompter), &args(&["1", "a", "b"])).unwrap();
        assert_eq!(store.get_note(1).unwrap().tags, vec!["a", "b"]);

        remove_tag(&mut ctx(&mut store, &mut prompter), &args(&["1", "a"])).unwrap();
        assert_eq!(store.get_note(1).unwrap().tags, vec!["b"]);

        let err = remove_tag(&mut ctx(&mut store, &mut prompter), &args(&["1", "zz"]));
        assert!(matches!(err, Err(MinderError::NotFound(_))));
    }

    #[test]
    fn search_falls_back_to_info_message_when_empty() {
        let mut store = Store::new();
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        let result = search(&mut ctx(&mut store, &mut prompter), &args(&["#ghost"])).unwrap();
        assert!(result.notes.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
