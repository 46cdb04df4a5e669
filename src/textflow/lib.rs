//! # Textflow Architecture
//!
//! Textflow computes statistics about a piece of text and keeps per-user text
//! snapshots ("histories") that can be listed, searched, fetched, deleted and
//! bulk-imported from a client-side export. It is a library first; the CLI is
//! one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Picks the caller token (--user, env, config)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Resolves caller token → user                             │
//! │  - Boundary validation, list-vs-search routing              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - create / list / search / get / delete / import / count   │
//! │  - Uses metrics.rs and title.rs, owner id always explicit   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - HistoryStore + UserDirectory traits                      │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//!
//! There is no ambient "current user". The API resolves a token once and every
//! history command receives the owner id as an argument. Stores filter by that
//! id on every read and delete, and a record owned by someone else is reported
//! as not found.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//!
//! Diagnostics go through the `log` facade; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`metrics`]: Text statistics
//! - [`title`]: Title inference for untitled histories
//! - [`store`]: Storage ports and implementations
//! - [`model`]: Core data types (`TextRecord`, `User`, paging)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod store;
pub mod title;
