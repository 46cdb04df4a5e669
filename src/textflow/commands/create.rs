use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TextflowError};
use crate::model::{NewTextRecord, UserId};
use crate::store::HistoryStore;
use log::info;

pub fn run<S: HistoryStore>(
    store: &mut S,
    owner: UserId,
    title: Option<&str>,
    content: String,
    content_type: Option<String>,
) -> Result<CmdResult> {
    if content.is_empty() {
        return Err(TextflowError::Validation(
            "Content must not be empty".to_string(),
        ));
    }

    let saved = store.save(NewTextRecord::new(owner, title, content, content_type))?;
    info!(
        "created history {} ({} chars, {} lines)",
        saved.id, saved.char_count, saved.line_count
    );

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "History saved ({}): {}",
        saved.id, saved.title
    )));
    result.affected_histories.push(saved);
    Ok(result)
}
