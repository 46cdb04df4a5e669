use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{PageRequest, UserId};
use crate::store::HistoryStore;

/// Histories whose title contains `query`, ignoring case.
///
/// The query is used literally: a whitespace-only query only matches titles
/// containing that whitespace. Callers wanting "no query means everything"
/// should route an absent query to `list` instead.
pub fn run<S: HistoryStore>(
    store: &S,
    owner: UserId,
    query: &str,
    request: &PageRequest,
) -> Result<CmdResult> {
    let page = store.find_page_by_title(owner, query, request)?;
    Ok(CmdResult::default().with_listed(page.map(|r| r.summary())))
}
