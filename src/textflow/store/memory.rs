use super::{check_unique, select_page, HistoryStore, UserDirectory};
use crate::error::{Result, TextflowError};
use crate::model::{HistoryId, NewTextRecord, Page, PageRequest, TextRecord, User, UserId};
use chrono::Utc;
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    histories: HashMap<HistoryId, TextRecord>,
    users: HashMap<UserId, User>,
    next_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryStore {
    fn save(&mut self, record: NewTextRecord) -> Result<TextRecord> {
        self.next_id += 1;
        let saved = record.into_record(HistoryId(self.next_id), Utc::now());
        self.histories.insert(saved.id, saved.clone());
        Ok(saved)
    }

    fn find_page(&self, owner: UserId, request: &PageRequest) -> Result<Page<TextRecord>> {
        Ok(select_page(
            self.histories.values().cloned(),
            owner,
            None,
            request,
        ))
    }

    fn find_page_by_title(
        &self,
        owner: UserId,
        substring: &str,
        request: &PageRequest,
    ) -> Result<Page<TextRecord>> {
        Ok(select_page(
            self.histories.values().cloned(),
            owner,
            Some(substring),
            request,
        ))
    }

    fn find_one(&self, id: HistoryId, owner: UserId) -> Result<Option<TextRecord>> {
        Ok(self
            .histories
            .get(&id)
            .filter(|r| r.owner_id == owner)
            .cloned())
    }

    fn delete(&mut self, record: &TextRecord) -> Result<()> {
        match self.histories.get(&record.id) {
            Some(existing) if existing.owner_id == record.owner_id => {
                self.histories.remove(&record.id);
                Ok(())
            }
            _ => Err(TextflowError::history_not_found(record.id)),
        }
    }

    fn count(&self, owner: UserId) -> Result<u64> {
        Ok(self
            .histories
            .values()
            .filter(|r| r.owner_id == owner)
            .count() as u64)
    }
}

impl UserDirectory for InMemoryStore {
    fn insert_user(&mut self, user: &User) -> Result<()> {
        check_unique(self.users.values(), user)?;
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    fn update_user(&mut self, user: &User) -> Result<()> {
        if !self.users.contains_key(&user.id) {
            return Err(TextflowError::NotFound {
                resource: "User",
                id: user.id.to_string(),
            });
        }
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    fn find_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.get(&id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.values().find(|u| u.email == email).cloned())
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.users.values().find(|u| u.username == username).cloned())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Registers a user whose caller token is `<username>@example.com`.
        pub fn with_user(mut self, username: &str) -> (Self, User) {
            let user = User::new(username.to_string(), format!("{}@example.com", username));
            self.store.insert_user(&user).unwrap();
            (self, user)
        }

        pub fn with_histories(mut self, owner: UserId, count: usize) -> Self {
            for i in 0..count {
                let record = NewTextRecord::new(
                    owner,
                    Some(&format!("Test History {}", i + 1)),
                    format!("Content for history {}", i + 1),
                    None,
                );
                self.store.save(record).unwrap();
            }
            self
        }
    }
}
