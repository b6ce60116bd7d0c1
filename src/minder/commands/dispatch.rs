//! Verb dispatch.
//!
//! One fixed table maps each verb to its arity bounds, usage string, and
//! handler; the table is built once at startup. The dispatcher itself is
//! stateless between commands — all state lives in the store.

use crate::commands::{contacts, notes, CmdMessage, CmdResult, CommandContext};
use crate::error::{MinderError, Result};
use log::debug;
use once_cell::sync::Lazy;

type Handler = fn(&mut CommandContext, &[String]) -> Result<CmdResult>;

pub struct CommandSpec {
    pub verb: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    min_args: usize,
    max_args: Option<usize>,
    handler: Handler,
}

impl CommandSpec {
    fn arity_ok(&self, count: usize) -> bool {
        count >= self.min_args && self.max_args.map_or(true, |max| count <= max)
    }
}

static COMMANDS: Lazy<Vec<CommandSpec>> = Lazy::new(|| {
    vec![
        CommandSpec {
            verb: "hello",
            usage: "hello",
            summary: "Greet the user",
            min_args: 0,
            max_args: Some(0),
            handler: hello,
        },
        CommandSpec {
            verb: "help",
            usage: "help",
            summary: "List available commands",
            min_args: 0,
            max_args: Some(0),
            handler: help,
        },
        CommandSpec {
            verb: "add-contact",
            usage: "add-contact <name>",
            summary: "Add a new contact (guided field flow)",
            min_args: 1,
            max_args: None,
            handler: contacts::add,
        },
        CommandSpec {
            verb: "change-contact",
            usage: "change-contact <name>",
            summary: "Update an existing contact (guided field flow)",
            min_args: 1,
            max_args: None,
            handler: contacts::change,
        },
        CommandSpec {
            verb: "delete-contact",
            usage: "delete-contact <name>",
            summary: "Remove a contact by name",
            min_args: 1,
            max_args: None,
            handler: contacts::delete,
        },
        CommandSpec {
            verb: "all-contacts",
            usage: "all-contacts",
            summary: "Display all contacts",
            min_args: 0,
            max_args: Some(0),
            handler: contacts::all,
        },
        CommandSpec {
            verb: "search-contact",
            usage: "search-contact <input>",
            summary: "Display contacts matching the input",
            min_args: 1,
            max_args: None,
            handler: contacts::search,
        },
        CommandSpec {
            verb: "show-phones",
            usage: "show-phones <name>",
            summary: "Display a contact's phone numbers",
            min_args: 1,
            max_args: None,
            handler: contacts::show_phones,
        },
        CommandSpec {
            verb: "show-birthday",
            usage: "show-birthday <name>",
            summary: "Display a contact's birthday",
            min_args: 1,
            max_args: None,
            handler: contacts::show_birthday,
        },
        CommandSpec {
            verb: "birthdays",
            usage: "birthdays [<number_of_days>]",
            summary: "List upcoming birthdays (default window: 7 days)",
            min_args: 0,
            max_args: Some(1),
            handler: contacts::upcoming,
        },
        CommandSpec {
            verb: "add-note",
            usage: "add-note <note text>",
            summary: "Add a new note",
            min_args: 1,
            max_args: None,
            handler: notes::add,
        },
        CommandSpec {
            verb: "change-note",
            usage: "change-note <id> <new_text>",
            summary: "Replace a note's text",
            min_args: 2,
            max_args: None,
            handler: notes::change,
        },
        CommandSpec {
            verb: "delete-note",
            usage: "delete-note <id>",
            summary: "Remove a note by id",
            min_args: 1,
            max_args: Some(1),
            handler: notes::delete,
        },
        CommandSpec {
            verb: "all-notes",
            usage: "all-notes",
            summary: "Display all notes",
            min_args: 0,
            max_args: Some(0),
            handler: notes::all,
        },
        CommandSpec {
            verb: "search-note",
            usage: "search-note <input> | search-note #<tag> [#<tag2> ...]",
            summary: "Search notes by text or by tags",
            min_args: 1,
            max_args: None,
            handler: notes::search,
        },
        CommandSpec {
            verb: "add-note-tag",
            usage: "add-note-tag <id> <tag1> [<tag2> ...]",
            summary: "Add tags to a note",
            min_args: 2,
            max_args: None,
            handler: notes::add_tags,
        },
        CommandSpec {
            verb: "delete-note-tag",
            usage: "delete-note-tag <id> <tag>",
            summary: "Remove a tag from a note",
            min_args: 2,
            max_args: Some(2),
            handler: notes::remove_tag,
        },
    ]
});

/// What one dispatched line amounts to.
#[derive(Debug)]
pub enum Outcome {
    Continue(CmdResult),
    Exit,
}

/// Split a line into verb + args and run the matching handler. Errors are
/// recoverable: the caller renders them and keeps reading.
pub fn dispatch(ctx: &mut CommandContext, line: &str) -> Result<Outcome> {
    let mut parts = line.split_whitespace();
    let verb = match parts.next() {
        Some(v) => v.to_lowercase(),
        None => return Ok(Outcome::Continue(CmdResult::default())),
    };
    let args: Vec<String> = parts.map(str::to_string).collect();
    debug!("dispatch verb={} args={}", verb, args.len());

    if verb == "close" || verb == "exit" {
        if !args.is_empty() {
            return Err(MinderError::Usage {
                usage: verb.to_string(),
            });
        }
        return Ok(Outcome::Exit);
    }

    let spec = COMMANDS
        .iter()
        .find(|c| c.verb == verb)
        .ok_or(MinderError::UnknownCommand(verb))?;

    if !spec.arity_ok(args.len()) {
        return Err(MinderError::Usage {
            usage: spec.usage.to_string(),
        });
    }

    (spec.handler)(ctx, &args).map(Outcome::Continue)
}

fn hello(_ctx: &mut CommandContext, _args: &[String]) -> Result<CmdResult> {
    Ok(CmdResult::default().with_message(CmdMessage::info("Hello! How can I help you?")))
}

fn help(_ctx: &mut CommandContext, _args: &[String]) -> Result<CmdResult> {
    let mut lines = vec!["Available commands:".to_string()];
    for spec in COMMANDS.iter() {
        lines.push(format!("  {:<45} {}", spec.usage, spec.summary));
    }
    lines.push(format!("  {:<45} Exit the program", "close | exit"));
    Ok(CmdResult::default().with_message(CmdMessage::info(lines.join("\n"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ctx, ScriptedPrompter};
    use crate::store::Store;

    fn run(store: &mut Store, line: &str) -> Result<Outcome> {
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        dispatch(&mut ctx(store, &mut prompter), line)
    }

    #[test]
    fn close_and_exit_signal_termination() {
        let mut store = Store::new();
        assert!(matches!(run(&mut store, "close").unwrap(), Outcome::Exit));
        assert!(matches!(run(&mut store, "exit").unwrap(), Outcome::Exit));
        assert!(matches!(run(&mut store, "EXIT").unwrap(), Outcome::Exit));
    }

    #[test]
    fn unknown_verb_is_an_unknown_command_error() {
        let mut store = Store::new();
        assert!(matches!(
            run(&mut store, "frobnicate"),
            Err(MinderError::UnknownCommand(_))
        ));
    }

    #[test]
    fn arity_violations_carry_the_usage_string() {
        let mut store = Store::new();
        match run(&mut store, "delete-note") {
            Err(MinderError::Usage { usage }) => assert_eq!(usage, "delete-note <id>"),
            other => panic!("expected usage error, got {:?}", other),
        }
        assert!(matches!(
            run(&mut store, "delete-note 1 2"),
            Err(MinderError::Usage { .. })
        ));
        assert!(matches!(
            run(&mut store, "delete-note-tag 1"),
            Err(MinderError::Usage { .. })
        ));
    }

    #[test]
    fn blank_lines_are_a_quiet_noop() {
        let mut store = Store::new();
        match run(&mut store, "   ").unwrap() {
            Outcome::Continue(result) => assert!(result.messages.is_empty()),
            Outcome::Exit => panic!("blank line must not exit"),
        }
    }

    #[test]
    fn verbs_are_case_insensitive() {
        let mut store = Store::new();
        store.add_note("milk run");
        match run(&mut store, "Search-Note milk").unwrap() {
            Outcome::Continue(result) => assert_eq!(result.notes.len(), 1),
            Outcome::Exit => panic!("unexpected exit"),
        }
    }

    #[test]
    fn handler_errors_propagate_as_recoverable() {
        let mut store = Store::new();
        assert!(matches!(
            run(&mut store, "delete-note 42"),
            Err(MinderError::NotFound(_))
        ));
        // the store is still usable afterwards
        store.add_note("still alive");
        assert_eq!(store.notes().count(), 1);
    }

    #[test]
    fn note_verbs_drive_the_store_end_to_end() {
        let mut store = Store::new();
        run(&mut store, "add-note buy milk").unwrap();
        run(&mut store, "add-note-tag 1 todo errand").unwrap();

        match run(&mut store, "search-note #todo #errand").unwrap() {
            Outcome::Continue(result) => {
                assert_eq!(result.notes.len(), 1);
                assert_eq!(result.notes[0].text, "buy milk");
            }
            Outcome::Exit => panic!("unexpected exit"),
        }
    }

    #[test]
    fn help_lists_every_verb() {
        let mut store = Store::new();
        match run(&mut store, "help").unwrap() {
            Outcome::Continue(result) => {
                let text = &result.messages[0].content;
                for spec in COMMANDS.iter() {
                    assert!(text.contains(spec.verb), "help is missing {}", spec.verb);
                }
            }
            Outcome::Exit => panic!("unexpected exit"),
        }
    }
}
