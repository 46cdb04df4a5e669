use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{PageRequest, UserId};
use crate::store::HistoryStore;

pub fn run<S: HistoryStore>(store: &S, owner: UserId, request: &PageRequest) -> Result<CmdResult> {
    let page = store.find_page(owner, request)?;
    Ok(CmdResult::default().with_listed(page.map(|r| r.summary())))
}
