//! Outcome model: what dispatch and propagation decided.
//!
//! These are derived values. Nothing here is stored; callers compute them,
//! inspect them, and drop them.

use serde::Serialize;

use super::condition::Condition;
use super::ids::{BlockDepth, ClausePosition};

/// Result of matching one condition against one handler list.
///
/// Serialized as `{"outcome":"MATCHED","position":1,"catch_all":false}` or
/// `{"outcome":"UNHANDLED"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchResult {
    Matched {
        position: ClausePosition,
        catch_all: bool,
    },
    Unhandled,
}

impl DispatchResult {
    pub fn position(&self) -> Option<ClausePosition> {
        match self {
            Self::Matched { position, .. } => Some(*position),
            Self::Unhandled => None,
        }
    }

    pub fn is_unhandled(&self) -> bool {
        matches!(self, Self::Unhandled)
    }
}

/// What happened in one block while a condition travelled outward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropagationStep {
    pub depth: BlockDepth,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// The condition as this block saw it (name resolved or hidden).
    pub seen_as: Condition,

    pub result: DispatchResult,

    /// The matching clause re-raised.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub reraised: bool,
}

/// Final answer for a raised condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Propagation {
    /// A clause caught the condition and did not re-raise.
    Handled {
        depth: BlockDepth,
        position: ClausePosition,
        condition: Condition,
        steps: Vec<PropagationStep>,
    },
    /// The condition left the outermost block; the host terminates.
    Unhandled {
        condition: Condition,
        steps: Vec<PropagationStep>,
    },
}

impl Propagation {
    pub fn steps(&self) -> &[PropagationStep] {
        match self {
            Self::Handled { steps, .. } | Self::Unhandled { steps, .. } => steps,
        }
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled { .. })
    }
}
