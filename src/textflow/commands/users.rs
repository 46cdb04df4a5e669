//! User directory operations: registration, profile, rename and login stamping.
//!
//! Registration checks uniqueness up front (email before username) for a clear
//! error; the store repeats the check atomically on insert.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TextflowError};
use crate::model::{User, UserId};
use crate::store::{HistoryStore, UserDirectory};
use chrono::Utc;
use log::info;

pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 50;
pub const EMAIL_MAX_CHARS: usize = 255;

fn validate_username(username: &str) -> Result<()> {
    let len = username.chars().count();
    if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&len) {
        return Err(TextflowError::Validation(format!(
            "Username must be {}-{} characters",
            USERNAME_MIN_CHARS, USERNAME_MAX_CHARS
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    };
    if !well_formed || email.chars().count() > EMAIL_MAX_CHARS {
        return Err(TextflowError::Validation(format!(
            "Invalid email address: {}",
            email
        )));
    }
    Ok(())
}

fn load_user<D: UserDirectory>(directory: &D, id: UserId) -> Result<User> {
    directory
        .find_user(id)?
        .ok_or_else(|| TextflowError::NotFound {
            resource: "User",
            id: id.to_string(),
        })
}

pub fn register<D: UserDirectory>(
    directory: &mut D,
    username: &str,
    email: &str,
) -> Result<CmdResult> {
    validate_username(username)?;
    validate_email(email)?;

    if directory.find_user_by_email(email)?.is_some() {
        return Err(TextflowError::Conflict {
            resource: "User",
            field: "email",
            value: email.to_string(),
        });
    }
    if directory.find_user_by_username(username)?.is_some() {
        return Err(TextflowError::Conflict {
            resource: "User",
            field: "username",
            value: username.to_string(),
        });
    }

    let user = User::new(username.to_string(), email.to_string());
    directory.insert_user(&user)?;
    info!("registered user {}", user.id);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Registered {} <{}>",
        user.username, user.email
    )));
    Ok(result.with_user(user))
}

/// The user record plus how many histories they own.
pub fn profile<S: UserDirectory + HistoryStore>(store: &S, id: UserId) -> Result<CmdResult> {
    let user = load_user(store, id)?;
    let count = store.count(id)?;
    let mut result = CmdResult::default().with_user(user);
    result.history_count = Some(count);
    Ok(result)
}

pub fn rename<D: UserDirectory>(directory: &mut D, id: UserId, username: &str) -> Result<CmdResult> {
    validate_username(username)?;
    let mut user = load_user(directory, id)?;

    if user.username == username {
        return Ok(CmdResult::default().with_user(user));
    }
    if directory.find_user_by_username(username)?.is_some() {
        return Err(TextflowError::Conflict {
            resource: "User",
            field: "username",
            value: username.to_string(),
        });
    }

    user.username = username.to_string();
    directory.update_user(&user)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Username changed to {}", username)));
    Ok(result.with_user(user))
}

pub fn touch_login<D: UserDirectory>(directory: &mut D, id: UserId) -> Result<CmdResult> {
    let mut user = load_user(directory, id)?;
    user.last_login_at = Some(Utc::now());
    directory.update_user(&user)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Logged in as {}", user.email)));
    Ok(result.with_user(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn registers_with_free_plan() {
        let mut store = InMemoryStore::new();
        let result = register(&mut store, "alice", "alice@example.com").unwrap();
        let user = result.user.unwrap();
        assert_eq!(user.plan, "free");
        assert!(user.last_login_at.is_none());
        assert_eq!(store.resolve("alice@example.com").unwrap().id, user.id);
    }

    #[test]
    fn duplicate_email_conflicts_before_username() {
        let mut store = InMemoryStore::new();
        register(&mut store, "alice", "alice@example.com").unwrap();

        let err = register(&mut store, "alice", "alice@example.com").unwrap_err();
        assert!(matches!(err, TextflowError::Conflict { field: "email", .. }));

        let err = register(&mut store, "alice", "other@example.com").unwrap_err();
        assert!(matches!(
            err,
            TextflowError::Conflict {
                field: "username",
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_registration() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            register(&mut store, "al", "al@example.com"),
            Err(TextflowError::Validation(_))
        ));
        assert!(matches!(
            register(&mut store, "alice", "not-an-email"),
            Err(TextflowError::Validation(_))
        ));
        assert!(matches!(
            register(&mut store, &"n".repeat(51), "n@example.com"),
            Err(TextflowError::Validation(_))
        ));
    }

    #[test]
    fn profile_counts_owned_histories() {
        let mut store = InMemoryStore::new();
        let alice = register(&mut store, "alice", "alice@example.com")
            .unwrap()
            .user
            .unwrap();
        create::run(&mut store, alice.id, None, "one".into(), None).unwrap();
        create::run(&mut store, alice.id, None, "two".into(), None).unwrap();

        let result = profile(&store, alice.id).unwrap();
        assert_eq!(result.history_count, Some(2));
        assert_eq!(result.user.unwrap().username, "alice");
    }

    #[test]
    fn rename_checks_uniqueness() {
        let mut store = InMemoryStore::new();
        let alice = register(&mut store, "alice", "alice@example.com")
            .unwrap()
            .user
            .unwrap();
        register(&mut store, "bob", "bob@example.com").unwrap();

        assert!(matches!(
            rename(&mut store, alice.id, "bob"),
            Err(TextflowError::Conflict { .. })
        ));

        rename(&mut store, alice.id, "alicia").unwrap();
        assert_eq!(
            store.resolve("alice@example.com").unwrap().username,
            "alicia"
        );
        assert!(rename(&mut store, alice.id, "alicia").is_ok());
    }

    #[test]
    fn login_stamps_last_login() {
        let mut store = InMemoryStore::new();
        let alice = register(&mut store, "alice", "alice@example.com")
            .unwrap()
            .user
            .unwrap();
        touch_login(&mut store, alice.id).unwrap();
        assert!(store
            .resolve("alice@example.com")
            .unwrap()
            .last_login_at
            .is_some());
    }
}
