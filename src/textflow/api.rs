//! # API Facade
//!
//! The API layer is the history manager every UI client talks to. It is a
//! **thin facade** over the command layer.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Authenticates** the caller by resolving an opaque token through the
//!   [`UserDirectory`]; every history operation then takes the resolved owner id
//!   explicitly
//! - **Validates** boundary input (title and content limits)
//! - **Routes** an absent or empty search query to `list`
//! - **Dispatches** to the appropriate command function
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Generic Over Storage
//!
//! `TextflowApi<S>` works with anything implementing both storage ports:
//! - Production: `TextflowApi<FileStore>`
//! - Testing: `TextflowApi<InMemoryStore>`

use crate::commands;
use crate::error::{Result, TextflowError};
use crate::model::{HistoryId, ImportItem, PageRequest, User, UserId};
use crate::store::{HistoryStore, UserDirectory};
use std::path::PathBuf;

pub use crate::model::{MAX_CONTENT_CHARS, MAX_CONTENT_TYPE_CHARS, MAX_TITLE_CHARS};

/// The main API facade for textflow operations.
pub struct TextflowApi<S: HistoryStore + UserDirectory> {
    store: S,
    data_dir: PathBuf,
}

impl<S: HistoryStore + UserDirectory> TextflowApi<S> {
    pub fn new(store: S, data_dir: PathBuf) -> Self {
        Self { store, data_dir }
    }

    /// Resolve the caller token to a user. A missing token is unauthenticated.
    pub fn authenticate(&self, token: Option<&str>) -> Result<User> {
        match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => self.store.resolve(token),
            None => Err(TextflowError::Unauthenticated),
        }
    }

    pub fn count_text(&self, text: Option<&str>) -> Result<commands::CmdResult> {
        if let Some(text) = text {
            check_max_chars("Text", text, MAX_CONTENT_CHARS)?;
        }
        Ok(commands::count::run(text))
    }

    pub fn create_history(
        &mut self,
        owner: UserId,
        title: Option<&str>,
        content: String,
        content_type: Option<String>,
    ) -> Result<commands::CmdResult> {
        if let Some(title) = title {
            check_max_chars("Title", title, MAX_TITLE_CHARS)?;
        }
        if content.trim().is_empty() {
            return Err(TextflowError::Validation(
                "Content must not be blank".to_string(),
            ));
        }
        check_max_chars("Content", &content, MAX_CONTENT_CHARS)?;
        if let Some(content_type) = &content_type {
            check_max_chars("Content type", content_type, MAX_CONTENT_TYPE_CHARS)?;
        }
        commands::create::run(&mut self.store, owner, title, content, content_type)
    }

    pub fn list_histories(
        &self,
        owner: UserId,
        request: &PageRequest,
    ) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, owner, request)
    }

    /// Title search; an absent or empty query lists everything instead.
    pub fn search_histories(
        &self,
        owner: UserId,
        query: Option<&str>,
        request: &PageRequest,
    ) -> Result<commands::CmdResult> {
        match query.filter(|q| !q.is_empty()) {
            Some(query) => commands::search::run(&self.store, owner, query, request),
            None => commands::list::run(&self.store, owner, request),
        }
    }

    pub fn get_history(&self, owner: UserId, id: HistoryId) -> Result<commands::CmdResult> {
        commands::get::run(&self.store, owner, id)
    }

    pub fn delete_history(&mut self, owner: UserId, id: HistoryId) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, owner, id)
    }

    pub fn import_histories(
        &mut self,
        owner: UserId,
        items: Vec<ImportItem>,
    ) -> Result<commands::CmdResult> {
        if items.is_empty() {
            return Err(TextflowError::Validation(
                "Nothing to import".to_string(),
            ));
        }
        commands::import::run(&mut self.store, owner, items)
    }

    pub fn register(&mut self, username: &str, email: &str) -> Result<commands::CmdResult> {
        commands::users::register(&mut self.store, username.trim(), email.trim())
    }

    pub fn login(&mut self, token: &str) -> Result<commands::CmdResult> {
        let user = self.authenticate(Some(token))?;
        commands::users::touch_login(&mut self.store, user.id)
    }

    pub fn profile(&self, owner: UserId) -> Result<commands::CmdResult> {
        commands::users::profile(&self.store, owner)
    }

    pub fn rename_user(&mut self, owner: UserId, username: &str) -> Result<commands::CmdResult> {
        commands::users::rename(&mut self.store, owner, username.trim())
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}

fn check_max_chars(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(TextflowError::Validation(format!(
            "{} must be at most {} characters (got {})",
            field, max, len
        )));
    }
    Ok(())
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
