use tracing::debug;

use super::Trigger;
use crate::document::Document;
use crate::mutations::{Mutation, MutationError};

/// Restyle the trigger's range in the caret's block
///
/// Produces exactly one `ApplyInlineStyle` transition. The text and the
/// collapsed caret are left as they were.
pub fn apply(trigger: &Trigger, snapshot: &Document) -> Result<Document, MutationError> {
    let block_key = snapshot.selection().block_key.clone();
    let mutation = Mutation::ApplyInlineStyle {
        block_key,
        start: trigger.range.start,
        end: trigger.range.end,
        style: trigger.style,
    };

    let next = snapshot.apply(&mutation)?;
    debug!(
        "Autoformat {} over {:?} in block {}",
        trigger.style,
        trigger.range,
        mutation.block_key()
    );
    Ok(next)
}
