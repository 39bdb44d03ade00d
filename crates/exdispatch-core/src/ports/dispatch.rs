//! DispatchStrategy port - Condition と handler list から発火する clause を選ぶ
//!
//! Strategies are pure functions: same condition and same clauses, same
//! answer. No side effects beyond tracing.

use crate::domain::{Condition, DispatchResult, HandlerClauses};

/// DispatchStrategy は一つの EXCEPTION section の中で clause を選択
///
/// # v1 デフォルト
/// - FirstMatchDispatch: declaration order, first specific match, then `WHEN OTHERS`
///
/// Implementations must be `Send + Sync`: a `Program` shares one strategy
/// across every caller.
pub trait DispatchStrategy: Send + Sync {
    /// Never fails. No clause firing is `DispatchResult::Unhandled`.
    fn dispatch(&self, condition: &Condition, clauses: &HandlerClauses) -> DispatchResult;
}
