use crate::config::TextflowConfig;
use crate::metrics::TextStats;
use crate::model::{HistorySummary, Page, TextRecord, User};

pub mod config;
pub mod count;
pub mod create;
pub mod delete;
pub mod get;
pub mod import;
pub mod list;
pub mod search;
pub mod users;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
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

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Full records created, fetched or removed by the command.
    pub affected_histories: Vec<TextRecord>,
    pub listed: Option<Page<HistorySummary>>,
    pub stats: Option<TextStats>,
    pub user: Option<User>,
    pub history_count: Option<u64>,
    pub imported_count: Option<usize>,
    pub config: Option<TextflowConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_histories(mut self, histories: Vec<TextRecord>) -> Self {
        self.affected_histories = histories;
        self
    }

    pub fn with_listed(mut self, page: Page<HistorySummary>) -> Self {
        self.listed = Some(page);
        self
    }

    pub fn with_stats(mut self, stats: TextStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_config(mut self, config: TextflowConfig) -> Self {
        self.config = Some(config);
        self
    }
}
