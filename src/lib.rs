//! # wordwise - Concurrent word-by-word translation
//!
//! `wordwise` translates text through a remote translation API one word at a
//! time, fanning the words out over a bounded worker pool and reassembling
//! the results in their original order. Every completed translation is
//! recorded in a local SQLite history log.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a file
//! wordwise --from en --to fr ./notes.txt
//!
//! # Translate from stdin
//! echo "hello world" | wordwise --from en --to fr
//!
//! # Ask the backend which languages it supports
//! wordwise languages
//!
//! # Inspect the history log
//! wordwise history --limit 20
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/wordwise/config.toml`:
//!
//! ```toml
//! [backend]
//! endpoint = "https://translate.example.com"
//! api_key_env = "WORDWISE_API_KEY"
//!
//! [pool]
//! workers = 10
//!
//! [history]
//! max_insert_attempts = 5
//! ```
//!
//! ## Guarantees
//!
//! - Output word order always matches input order, however backend calls
//!   interleave.
//! - A failed unit fails the whole request: pending units are cancelled and
//!   nothing is recorded.
//! - History records get fresh random ids until the insert lands, so an id
//!   collision can never drop a translation.

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// Durable history of completed translations.
pub mod history;

/// Structured logging setup.
pub mod logging;

/// XDG-style path utilities for configuration and data.
pub mod paths;

/// The translation pipeline and its backend client.
pub mod translation;
