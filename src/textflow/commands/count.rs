use crate::commands::CmdResult;
use crate::metrics;

/// Statistics for a free-standing text; no history or user is involved.
pub fn run(text: Option<&str>) -> CmdResult {
    CmdResult::default().with_stats(metrics::compute(text.unwrap_or_default()))
}
