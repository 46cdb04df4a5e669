use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{
    ImportItem, NewTextRecord, UserId, MAX_CONTENT_CHARS, MAX_CONTENT_TYPE_CHARS, MAX_TITLE_CHARS,
};
use crate::store::HistoryStore;
use log::{debug, info};

fn exceeds(value: Option<&str>, max: usize) -> bool {
    value.is_some_and(|v| v.chars().count() > max)
}

/// Why an item cannot be stored, if it cannot.
fn rejection(item: &ImportItem) -> Option<&'static str> {
    match item.content.as_deref() {
        None | Some("") => Some("without content"),
        Some(content) if content.chars().count() > MAX_CONTENT_CHARS => {
            Some("with oversized content")
        }
        _ if exceeds(item.title.as_deref(), MAX_TITLE_CHARS) => Some("with oversized title"),
        _ if exceeds(item.content_type.as_deref(), MAX_CONTENT_TYPE_CHARS) => {
            Some("with oversized content type")
        }
        _ => None,
    }
}

/// Persists a batch of client-side histories in the order given.
///
/// Items without content, or with a field over its stored limit, are dropped
/// and not counted. Each surviving item is an independent write: there is no
/// rollback, and a store error stops the batch with the earlier writes already
/// in place.
pub fn run<S: HistoryStore>(
    store: &mut S,
    owner: UserId,
    items: Vec<ImportItem>,
) -> Result<CmdResult> {
    let mut imported_count = 0;
    let mut skipped_count = 0;

    for (position, item) in items.into_iter().enumerate() {
        if let Some(reason) = rejection(&item) {
            debug!("skipping import item {} {}", position, reason);
            skipped_count += 1;
            continue;
        }
        let content = item.content.unwrap_or_default();

        let record = NewTextRecord::new(owner, item.title.as_deref(), content, item.content_type);
        store.save(record)?;
        imported_count += 1;
    }

    info!(
        "imported {} histories, skipped {}",
        imported_count, skipped_count
    );

    let mut result = CmdResult {
        imported_count: Some(imported_count),
        ..CmdResult::default()
    };
    result.add_message(CmdMessage::success(format!(
        "Imported {} histories",
        imported_count
    )));
    if skipped_count > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Skipped {} items that were empty or too long",
            skipped_count
        )));
    }
    Ok(result)
}
