//! # Storage Layer
//!
//! Two narrow ports sit between the command layer and persistence:
//!
//! - [`HistoryStore`]: user-scoped CRUD and the paged/sorted/title-search query
//!   surface over text histories.
//! - [`UserDirectory`]: user records and the mapping from a caller token to a user.
//!
//! ## Ownership Scoping
//!
//! Every history query takes the owner's id as a mandatory argument. A record
//! that exists but belongs to someone else is indistinguishable from a record
//! that does not exist: both come back as `None` / `NotFound`.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON files in a data directory
//!   ```text
//!   <data dir>/
//!   ├── histories.json   # next id + every history record
//!   ├── users.json       # registered users
//!   └── config.json      # CLI configuration
//!   ```
//! - [`memory::InMemoryStore`]: no persistence, used by tests
//!
//! Both share [`select_page`] so sorting, tie-breaking and paging behave the same.

use crate::error::{Result, TextflowError};
use crate::model::{
    Direction, HistoryId, NewTextRecord, Page, PageRequest, SortKey, TextRecord, User, UserId,
};
use std::cmp::Ordering;

pub mod fs;
pub mod memory;

/// Persistence port for text histories.
pub trait HistoryStore {
    /// Persist a new record; the store assigns id and timestamps.
    fn save(&mut self, record: NewTextRecord) -> Result<TextRecord>;

    /// One page of the owner's records.
    fn find_page(&self, owner: UserId, request: &PageRequest) -> Result<Page<TextRecord>>;

    /// One page of the owner's records whose title contains `substring`,
    /// compared case-insensitively.
    fn find_page_by_title(
        &self,
        owner: UserId,
        substring: &str,
        request: &PageRequest,
    ) -> Result<Page<TextRecord>>;

    /// The record with `id`, only if it belongs to `owner`.
    fn find_one(&self, id: HistoryId, owner: UserId) -> Result<Option<TextRecord>>;

    /// Remove a record previously returned by `find_one`.
    fn delete(&mut self, record: &TextRecord) -> Result<()>;

    fn count(&self, owner: UserId) -> Result<u64>;
}

/// Persistence port for users.
pub trait UserDirectory {
    /// Fails with `Conflict` when the email or username is already taken; the
    /// check and the insert happen as one step.
    fn insert_user(&mut self, user: &User) -> Result<()>;

    fn update_user(&mut self, user: &User) -> Result<()>;

    fn find_user(&self, id: UserId) -> Result<Option<User>>;

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Map a caller token (the authenticated email) to its user.
    fn resolve(&self, token: &str) -> Result<User> {
        self.find_user_by_email(token)?
            .ok_or(TextflowError::Unauthenticated)
    }
}

/// Email is checked before username.
pub(crate) fn check_unique<'a>(
    existing: impl IntoIterator<Item = &'a User>,
    candidate: &User,
) -> Result<()> {
    let existing: Vec<&User> = existing.into_iter().collect();
    if existing.iter().any(|u| u.email == candidate.email) {
        return Err(TextflowError::Conflict {
            resource: "User",
            field: "email",
            value: candidate.email.clone(),
        });
    }
    if existing.iter().any(|u| u.username == candidate.username) {
        return Err(TextflowError::Conflict {
            resource: "User",
            field: "username",
            value: candidate.username.clone(),
        });
    }
    Ok(())
}

/// Filters `records` down to `owner` (and an optional title substring), sorts
/// them and cuts out the requested page.
pub fn select_page<I>(
    records: I,
    owner: UserId,
    title_filter: Option<&str>,
    request: &PageRequest,
) -> Page<TextRecord>
where
    I: IntoIterator<Item = TextRecord>,
{
    let needle = title_filter.map(str::to_lowercase);
    let mut matching: Vec<TextRecord> = records
        .into_iter()
        .filter(|r| r.owner_id == owner)
        .filter(|r| match &needle {
            Some(n) => r.title.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .collect();

    matching.sort_by(|a, b| {
        let ord = compare_by(a, b, request.sort.key).then_with(|| a.id.cmp(&b.id));
        match request.sort.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    });

    let total = matching.len();
    let items = matching
        .into_iter()
        .skip(request.offset())
        .take(request.size.max(1))
        .collect();
    Page::new(items, request, total)
}

fn compare_by(a: &TextRecord, b: &TextRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::CharCount => a.char_count.cmp(&b.char_count),
    }
}
