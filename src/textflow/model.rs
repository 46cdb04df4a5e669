use crate::metrics;
use crate::title::derive_title;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const DEFAULT_CONTENT_TYPE: &str = "plain";
pub const DEFAULT_PLAN: &str = "free";

/// Stored field limits, in `char`s.
pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_CONTENT_CHARS: usize = 100_000;
pub const MAX_CONTENT_TYPE_CHARS: usize = 20;

pub type UserId = Uuid;

/// Store-assigned identifier of a text history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(pub u64);

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HistoryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(HistoryId)
    }
}

/// A persisted text snapshot. Content and counts never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    pub id: HistoryId,
    pub owner_id: UserId,
    pub title: String,
    pub content: String,
    pub content_type: String,
    pub char_count: usize,
    pub line_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TextRecord {
    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            id: self.id,
            title: self.title.clone(),
            char_count: self.char_count,
            line_count: self.line_count,
            content_type: self.content_type.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A record as handed to the store, before it has an id or timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTextRecord {
    pub owner_id: UserId,
    pub title: String,
    pub content: String,
    pub content_type: String,
    pub char_count: usize,
    pub line_count: usize,
}

impl NewTextRecord {
    /// Applies title inference, content type defaulting and the frozen counts.
    pub fn new(
        owner_id: UserId,
        title: Option<&str>,
        content: String,
        content_type: Option<String>,
    ) -> Self {
        let title = derive_title(title, &content);
        let char_count = metrics::char_count(&content);
        let line_count = metrics::line_count(&content);
        Self {
            owner_id,
            title,
            content,
            content_type: content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            char_count,
            line_count,
        }
    }

    pub fn into_record(self, id: HistoryId, now: DateTime<Utc>) -> TextRecord {
        TextRecord {
            id,
            owner_id: self.owner_id,
            title: self.title,
            content: self.content,
            content_type: self.content_type,
            char_count: self.char_count,
            line_count: self.line_count,
            created_at: now,
            updated_at: now,
        }
    }
}

/// List/search shape of a record: everything but the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub id: HistoryId,
    pub title: String,
    pub char_count: usize,
    pub line_count: usize,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub plan: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(username: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            plan: DEFAULT_PLAN.to_string(),
            created_at: Utc::now(),
            last_login_at: None,
        }
    }
}

/// One entry of a client-side history export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    /// Accepted for compatibility with exports; the store stamps its own time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ImportItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

/// Shapes accepted by `import`: the `{"histories": [...]}` request body or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportDocument {
    Wrapped { histories: Vec<ImportItem> },
    Bare(Vec<ImportItem>),
}

pub fn parse_import_document(raw: &str) -> serde_json::Result<Vec<ImportItem>> {
    let doc: ImportDocument = serde_json::from_str(raw)?;
    Ok(match doc {
        ImportDocument::Wrapped { histories } => histories,
        ImportDocument::Bare(items) => items,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    CharCount,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" | "createdAt" | "created_at" => Ok(SortKey::CreatedAt),
            "updated" | "updatedAt" | "updated_at" => Ok(SortKey::UpdatedAt),
            "title" => Ok(SortKey::Title),
            "chars" | "charCount" | "char_count" => Ok(SortKey::CharCount),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub key: SortKey,
    pub direction: Direction,
}

impl Sort {
    pub fn new(key: SortKey, direction: Direction) -> Self {
        Self { key, direction }
    }
}

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number.
    pub page: usize,
    pub size: usize,
    pub sort: Sort,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Sort::default(),
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: &PageRequest, total_items: usize) -> Self {
        let size = request.size.max(1);
        Self {
            items,
            page: request.page,
            size,
            total_items,
            total_pages: total_items.div_ceil(size),
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
