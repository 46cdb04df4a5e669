use crate::commands::CmdResult;
use crate::error::{Result, TextflowError};
use crate::model::{HistoryId, TextRecord, UserId};
use crate::store::HistoryStore;

/// Looks up a history owned by `owner`. Someone else's id is reported exactly
/// like an id that was never issued.
pub(crate) fn find_owned<S: HistoryStore>(
    store: &S,
    owner: UserId,
    id: HistoryId,
) -> Result<TextRecord> {
    store
        .find_one(id, owner)?
        .ok_or_else(|| TextflowError::history_not_found(id))
}

pub fn run<S: HistoryStore>(store: &S, owner: UserId, id: HistoryId) -> Result<CmdResult> {
    let record = find_owned(store, owner, id)?;
    Ok(CmdResult::default().with_affected_histories(vec![record]))
}
