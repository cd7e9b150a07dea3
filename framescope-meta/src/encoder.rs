//! Intent encoder: numbers button leaves in depth-first traversal order.

use crate::card::MAX_BUTTONS;
use crate::counter::ButtonIndexTracker;
use crate::decoder::PROPERTY_BUTTON;
use crate::error::{MetaError, MetaResult};
use crate::intent::{IntentNode, Intents, MetaDescriptor};

/// Resolves every node and rewrites button leaves to `fc:frame:button:<n>`.
///
/// The first button met gets index 1, the next 2, and so on. Nothing here
/// limits the count; use [`encode_checked`] to reject more than four.
pub fn encode(intents: impl Into<Intents>) -> Vec<MetaDescriptor> {
    encode_counted(intents.into()).0
}

/// Like [`encode`], but fails when the tree holds more buttons than a frame
/// supports.
pub fn encode_checked(intents: impl Into<Intents>) -> MetaResult<Vec<MetaDescriptor>> {
    let (encoded, found) = encode_counted(intents.into());
    if found > MAX_BUTTONS {
        return Err(MetaError::TooManyButtons {
            found,
            max: MAX_BUTTONS,
        });
    }
    Ok(encoded)
}

fn encode_counted(intents: Intents) -> (Vec<MetaDescriptor>, usize) {
    let mut tracker = ButtonIndexTracker::new();
    let mut encoded = Vec::new();
    for node in intents.into_nodes() {
        encode_node(node, &mut tracker, &mut encoded);
    }
    tracing::debug!(
        tags = encoded.len(),
        buttons = tracker.issued(),
        "encoded intents"
    );
    (encoded, tracker.issued())
}

/// Depth-first walk; the tracker is shared by every subtree of one pass.
fn encode_node(node: IntentNode, tracker: &mut ButtonIndexTracker, out: &mut Vec<MetaDescriptor>) {
    match node {
        IntentNode::Tag(mut descriptor) => {
            if descriptor.is_provisional_button() {
                descriptor.property = format!("{}:{}", PROPERTY_BUTTON, tracker.next_index());
                descriptor.content = descriptor.children.take();
            }
            out.push(descriptor);
        }
        IntentNode::Group(children) => {
            for child in children {
                encode_node(child, tracker, out);
            }
        }
        IntentNode::Deferred(f) => encode_node(f(), tracker, out),
    }
}
