use super::{check_unique, select_page, HistoryStore, UserDirectory};
use crate::error::{Result, TextflowError};
use crate::model::{HistoryId, NewTextRecord, Page, PageRequest, TextRecord, User, UserId};
use chrono::Utc;
use fs2::FileExt;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const HISTORIES_FILE: &str = "histories.json";
const USERS_FILE: &str = "users.json";
const LOCK_FILE: &str = ".lock";

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryData {
    next_id: u64,
    records: Vec<TextRecord>,
}

/// JSON-file store rooted at a data directory.
///
/// Every write holds an exclusive OS lock on `.lock` for its whole
/// load-modify-save cycle, so separate processes never interleave writes.
/// Files are replaced by renaming a finished temp file over them, so readers
/// see either the old or the new contents.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn locked<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        self.ensure_dir()?;
        let lock = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.root.join(LOCK_FILE))
            .map_err(TextflowError::Io)?;
        FileExt::lock_exclusive(&lock).map_err(TextflowError::Io)?;
        let outcome = f();
        let _ = FileExt::unlock(&lock);
        outcome
    }

    fn write_atomic(&self, name: &str, content: &str) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(&self.root).map_err(TextflowError::Io)?;
        tmp.write_all(content.as_bytes()).map_err(TextflowError::Io)?;
        tmp.as_file().sync_all().map_err(TextflowError::Io)?;
        tmp.persist(self.root.join(name))
            .map_err(|e| TextflowError::Io(e.error))?;
        Ok(())
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(TextflowError::Io)?;
        }
        Ok(())
    }

    fn load_histories(&self) -> Result<HistoryData> {
        let data_file = self.root.join(HISTORIES_FILE);
        if !data_file.exists() {
            return Ok(HistoryData::default());
        }
        let content = fs::read_to_string(data_file).map_err(TextflowError::Io)?;
        let data: HistoryData =
            serde_json::from_str(&content).map_err(TextflowError::Serialization)?;
        Ok(data)
    }

    fn save_histories(&self, data: &HistoryData) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(data).map_err(TextflowError::Serialization)?;
        self.write_atomic(HISTORIES_FILE, &content)
    }

    fn load_users(&self) -> Result<Vec<User>> {
        let users_file = self.root.join(USERS_FILE);
        if !users_file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(users_file).map_err(TextflowError::Io)?;
        let users: Vec<User> =
            serde_json::from_str(&content).map_err(TextflowError::Serialization)?;
        Ok(users)
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(users).map_err(TextflowError::Serialization)?;
        self.write_atomic(USERS_FILE, &content)
    }
}

impl HistoryStore for FileStore {
    fn save(&mut self, record: NewTextRecord) -> Result<TextRecord> {
        let saved = self.locked(|| {
            let mut data = self.load_histories()?;
            data.next_id += 1;
            let saved = record.into_record(HistoryId(data.next_id), Utc::now());
            data.records.push(saved.clone());
            self.save_histories(&data)?;
            Ok(saved)
        })?;
        debug!("wrote history {} to {}", saved.id, self.root.display());
        Ok(saved)
    }

    fn find_page(&self, owner: UserId, request: &PageRequest) -> Result<Page<TextRecord>> {
        let data = self.load_histories()?;
        Ok(select_page(data.records, owner, None, request))
    }

    fn find_page_by_title(
        &self,
        owner: UserId,
        substring: &str,
        request: &PageRequest,
    ) -> Result<Page<TextRecord>> {
        let data = self.load_histories()?;
        Ok(select_page(data.records, owner, Some(substring), request))
    }

    fn find_one(&self, id: HistoryId, owner: UserId) -> Result<Option<TextRecord>> {
        let data = self.load_histories()?;
        Ok(data
            .records
            .into_iter()
            .find(|r| r.id == id && r.owner_id == owner))
    }

    fn delete(&mut self, record: &TextRecord) -> Result<()> {
        self.locked(|| {
            let mut data = self.load_histories()?;
            let before = data.records.len();
            data.records
                .retain(|r| !(r.id == record.id && r.owner_id == record.owner_id));
            if data.records.len() == before {
                return Err(TextflowError::history_not_found(record.id));
            }
            self.save_histories(&data)
        })?;
        debug!("removed history {} from {}", record.id, self.root.display());
        Ok(())
    }

    fn count(&self, owner: UserId) -> Result<u64> {
        let data = self.load_histories()?;
        Ok(data.records.iter().filter(|r| r.owner_id == owner).count() as u64)
    }
}

impl UserDirectory for FileStore {
    fn insert_user(&mut self, user: &User) -> Result<()> {
        self.locked(|| {
            let mut users = self.load_users()?;
            check_unique(&users, user)?;
            users.push(user.clone());
            self.save_users(&users)
        })
    }

    fn update_user(&mut self, user: &User) -> Result<()> {
        self.locked(|| {
            let mut users = self.load_users()?;
            let slot = users
                .iter_mut()
                .find(|u| u.id == user.id)
                .ok_or_else(|| TextflowError::NotFound {
                    resource: "User",
                    id: user.id.to_string(),
                })?;
            *slot = user.clone();
            self.save_users(&users)
        })
    }

    fn find_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.load_users()?.into_iter().find(|u| u.id == id))
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.load_users()?.into_iter().find(|u| u.email == email))
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.load_users()?.into_iter().find(|u| u.username == username))
    }
}
