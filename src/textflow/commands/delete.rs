use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{HistoryId, UserId};
use crate::store::HistoryStore;
use log::info;

use super::get::find_owned;

pub fn run<S: HistoryStore>(store: &mut S, owner: UserId, id: HistoryId) -> Result<CmdResult> {
    let record = find_owned(store, owner, id)?;
    store.delete(&record)?;
    info!("deleted history {}", record.id);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "History deleted ({}): {}",
        record.id, record.title
    )));
    result.affected_histories.push(record);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, get};
    use crate::error::TextflowError;
    use crate::store::memory::InMemoryStore;
    use uuid::Uuid;

    fn create_one(store: &mut InMemoryStore, owner: Uuid) -> HistoryId {
        create::run(store, owner, Some("Doomed"), "bye".into(), None)
            .unwrap()
            .affected_histories[0]
            .id
    }

    #[test]
    fn removes_the_record() {
        let mut store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let id = create_one(&mut store, owner);

        run(&mut store, owner, id).unwrap();
        assert!(matches!(
            get::run(&store, owner, id),
            Err(TextflowError::NotFound { .. })
        ));
        assert_eq!(store.count(owner).unwrap(), 0);
    }

    #[test]
    fn second_delete_fails() {
        let mut store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let id = create_one(&mut store, owner);

        run(&mut store, owner, id).unwrap();
        assert!(matches!(
            run(&mut store, owner, id),
            Err(TextflowError::NotFound { .. })
        ));
    }

    #[test]
    fn cannot_delete_someone_elses_history() {
        let mut store = InMemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let id = create_one(&mut store, alice);

        assert!(matches!(
            run(&mut store, bob, id),
            Err(TextflowError::NotFound { .. })
        ));
        assert_eq!(store.count(alice).unwrap(), 1);
    }
}
