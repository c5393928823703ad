//! Proptest generators for property-based testing.

use proptest::prelude::*;

use warble_core::{Timeline, TimelineError, UserId};

/// Generate a random UserId.
pub fn user_id() -> impl Strategy<Value = UserId> {
    any::<[u8; 32]>().prop_map(UserId::from_bytes)
}

/// Generate a display name within the registry's limits.
pub fn display_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,48}[A-Za-z0-9]".prop_map(String::from)
}

/// Generate tweet content of at most `max_chars` characters.
pub fn content(max_chars: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..=max_chars)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generate a reasonable timestamp.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=i64::MAX / 2
}

/// One operation against a single author's timeline.
///
/// Like/unlike ids are generated small so that sequences exercise both the
/// hit and miss paths.
#[derive(Debug, Clone)]
pub enum TimelineOp {
    Create { content: String },
    Like { id: u64 },
    Unlike { id: u64 },
}

/// Generate a sequence of timeline operations.
pub fn timeline_ops(max_ops: usize) -> impl Strategy<Value = Vec<TimelineOp>> {
    prop::collection::vec(
        prop_oneof![
            content(40).prop_map(|content| TimelineOp::Create { content }),
            (0u64..8).prop_map(|id| TimelineOp::Like { id }),
            (0u64..8).prop_map(|id| TimelineOp::Unlike { id }),
        ],
        0..=max_ops,
    )
}

/// Apply operations to a timeline, ignoring rejected ones.
pub fn apply_ops(timeline: &mut Timeline, ops: &[TimelineOp]) {
    for op in ops {
        match op {
            TimelineOp::Create { content } => {
                timeline.append(content.clone(), 0);
            }
            TimelineOp::Like { id } => {
                let _ = timeline.like(*id);
            }
            TimelineOp::Unlike { id } => {
                let _ = timeline.unlike(*id);
            }
        }
    }
}
