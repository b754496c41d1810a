use crate::commands::{CmdMessage, CmdResult};
use crate::store::LabelStore;

/// Empties the store. Confirmation is the caller's business.
pub fn run<S: LabelStore>(store: &mut S) -> CmdResult {
    let removed = store.count();
    store.clear();
    tracing::debug!(removed, "cleared label store");

    let mut result = CmdResult::default();
    if removed == 0 {
        result.add_message(CmdMessage::info("No labels to clear."));
    } else {
        result.add_message(CmdMessage::success(format!("Cleared {} labels.", removed)));
    }
    result
}
