//! FirstMatchDispatch - 宣言順の first-match + WHEN OTHERS
//!
//! One linear scan. The first clause naming the condition's identifier wins
//! and stops the scan; otherwise the `WHEN OTHERS` clause seen along the way
//! (wherever it sits) fires; otherwise the condition is unhandled.

use tracing::debug;

use crate::domain::{ClausePosition, Condition, DispatchResult, HandlerClauses};
use crate::ports::DispatchStrategy;

#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatchDispatch;

impl FirstMatchDispatch {
    pub fn new() -> Self {
        Self
    }
}

impl DispatchStrategy for FirstMatchDispatch {
    fn dispatch(&self, condition: &Condition, clauses: &HandlerClauses) -> DispatchResult {
        let identifier = condition.identifier();
        let mut catch_all: Option<ClausePosition> = None;

        for (position, clause) in clauses.iter() {
            if clause.is_catch_all() {
                catch_all.get_or_insert(position);
                continue;
            }
            if identifier.is_some_and(|name| clause.catches(name)) {
                debug!(%condition, %position, "specific handler matched");
                return DispatchResult::Matched {
                    position,
                    catch_all: false,
                };
            }
        }

        match catch_all {
            Some(position) => {
                debug!(%condition, %position, "falling back to WHEN OTHERS");
                DispatchResult::Matched {
                    position,
                    catch_all: true,
                }
            }
            None => {
                debug!(%condition, clauses = clauses.len(), "no handler matched");
                DispatchResult::Unhandled
            }
        }
    }
}
