//! Message classification.
//!
//! A single `Content` can satisfy more than one extractor: a data message
//! flagged as a timer update is also shaped like a visible message. The
//! extractors are therefore tried in a fixed priority order and the first
//! match wins.

use crate::messages::{
    ClosedGroupUpdate, ExpirationTimerUpdate, MessageKind, ReadReceipt, TypingIndicator,
    VisibleMessage,
};
use crate::wire::Content;

type Extractor = fn(&Content) -> Option<MessageKind>;

fn read_receipt(content: &Content) -> Option<MessageKind> {
    ReadReceipt::from_content(content).map(MessageKind::ReadReceipt)
}

fn typing_indicator(content: &Content) -> Option<MessageKind> {
    TypingIndicator::from_content(content).map(MessageKind::TypingIndicator)
}

fn closed_group_update(content: &Content) -> Option<MessageKind> {
    ClosedGroupUpdate::from_content(content).map(MessageKind::ClosedGroupUpdate)
}

fn expiration_timer_update(content: &Content) -> Option<MessageKind> {
    ExpirationTimerUpdate::from_content(content).map(MessageKind::ExpirationTimerUpdate)
}

fn visible_message(content: &Content) -> Option<MessageKind> {
    VisibleMessage::from_content(content).map(MessageKind::VisibleMessage)
}

/// Extractors in priority order.
const EXTRACTORS: [Extractor; 5] = [
    read_receipt,
    typing_indicator,
    closed_group_update,
    expiration_timer_update,
    visible_message,
];

/// Resolve `content` to the highest-priority matching message kind.
///
/// Returns `None` when no extractor matches.
pub fn classify(content: &Content) -> Option<MessageKind> {
    EXTRACTORS.iter().find_map(|extract| extract(content))
}
