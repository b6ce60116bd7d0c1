//! # Minder Architecture
//!
//! Minder is a **UI-agnostic contact-and-note library**; the interactive
//! REPL in `main.rs` is just one client of it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  REPL (main.rs)                                             │
//! │  - Reads command lines, renders results, owns the terminal  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command layer (commands/)                                  │
//! │  - Fixed verb table with arity checks (dispatch)            │
//! │  - Handlers return structured Result<CmdResult>             │
//! │  - Interactive input only through the Prompter seam         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Record store (store/)                                      │
//! │  - In-memory owner of contacts, notes, and the id counter   │
//! │  - store::fs persists the whole thing as one JSON snapshot  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key principle: no I/O assumptions in core
//!
//! From `commands/` inward, code takes regular arguments, returns regular
//! `Result` types, and never touches stdout, stderr, or the process exit
//! code. The `Prompter` trait is the single exception-shaped seam: guided
//! flows ask it for field values, and tests script the answers.
//!
//! ## Module overview
//!
//! - [`commands`]: verb handlers and the dispatch table
//! - [`store`]: the record store and its snapshot persistence
//! - [`model`]: `Contact` and `Note` entities
//! - [`fields`]: validated field newtypes (phone, email, birthday, address)
//! - [`birthdays`]: upcoming-birthday window calculation
//! - [`error`]: error taxonomy and `Result` alias

pub mod birthdays;
pub mod commands;
pub mod error;
pub mod fields;
pub mod model;
pub mod store;
