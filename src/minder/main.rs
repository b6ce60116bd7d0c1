use chrono::Local;
use clap::Parser;
use colored::*;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use log::info;
use minder::commands::dispatch::{dispatch, Outcome};
use minder::commands::{CmdMessage, CmdResult, CommandContext, MessageLevel, Prompter};
use minder::error::{MinderError, Result};
use minder::model::{Contact, Note};
use minder::store::fs as snapshot;
use std::io::{self, Write};
use std::path::Path;

mod args;
use args::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        let code = match e {
            MinderError::CorruptStore(_) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let store_path = match &cli.store_path {
        Some(path) => path.clone(),
        None => snapshot::default_store_path().ok_or_else(|| {
            MinderError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine a data directory",
            ))
        })?,
    };
    let log_dir = cli
        .log_dir
        .clone()
        .or_else(|| store_path.parent().map(Path::to_path_buf));
    let _logger = log_dir.and_then(|dir| init_logging(&cli.log_level, &dir));

    let mut store = if cli.ignore_corrupt {
        snapshot::load_or_empty(&store_path)
    } else {
        snapshot::load(&store_path)?
    };
    info!("store loaded from {}", store_path.display());

    println!("Welcome to minder! Type 'help' to list commands.");

    let mut prompter = ConsolePrompter;
    let stdin = io::stdin();
    loop {
        print!("{} ", ">".cyan());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // EOF behaves like close
            break;
        }

        let mut ctx = CommandContext {
            store: &mut store,
            prompter: &mut prompter,
            today: Local::now().date_naive(),
        };
        match dispatch(&mut ctx, &line) {
            Ok(Outcome::Exit) => {
                println!("Good bye!");
                break;
            }
            Ok(Outcome::Continue(result)) => {
                render(&result);
                snapshot::save(&store, &store_path)?;
            }
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    snapshot::save(&store, &store_path)?;
    Ok(())
}

fn init_logging(level: &str, log_dir: &Path) -> Option<LoggerHandle> {
    let _ = std::fs::create_dir_all(log_dir);
    let started = Logger::try_with_str(level).and_then(|logger| {
        logger
            .log_to_file(FileSpec::default().directory(log_dir).basename("minder"))
            .append()
            .start()
    });
    match started {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    }
}

struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        print!("{}: ", prompt.cyan());
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Err(MinderError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed during prompt",
            )));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn warn(&mut self, message: &str) {
        println!("{}", message.yellow());
    }
}

fn render(result: &CmdResult) {
    for contact in &result.contacts {
        println!("{}", format_contact(contact));
    }
    for note in &result.notes {
        println!("{}", format_note(note));
    }
    for (contact, date) in &result.birthdays {
        println!(
            "{} congratulate on {}",
            format!("{}:", contact.name).bold(),
            date.format(minder::fields::BIRTHDAY_FORMAT).to_string().green()
        );
    }
    print_messages(&result.messages);
}

fn format_contact(contact: &Contact) -> String {
    let birthday = contact
        .birthday
        .map(|b| b.to_string())
        .unwrap_or_else(|| "---".to_string());
    let phones = join_or_dashes(contact.phones.iter());
    let emails = join_or_dashes(contact.emails.iter());
    let address = contact
        .address
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "---".to_string());
    format!(
        "{} | Birthday: {} | Phones: {} | Emails: {} | Address: {}",
        contact.name.bold(),
        birthday,
        phones,
        emails,
        address
    )
}

fn format_note(note: &Note) -> String {
    let mut line = format!("{:>4} | {}", note.id, note.text);
    if !note.tags.is_empty() {
        line.push_str(&format!(" ({})", note.tags.join(", ")));
    }
    line
}

fn join_or_dashes<T: ToString>(values: impl Iterator<Item = T>) -> String {
    let parts: Vec<String> = values.map(|v| v.to_string()).collect();
    if parts.is_empty() {
        "---".to_string()
    } else {
        parts.join(", ")
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}
