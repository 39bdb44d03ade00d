//! exdispatch-core
//!
//! Exception-handler dispatch for block-structured procedural SQL: given a
//! raised condition and the `WHEN` clauses of an EXCEPTION section, decide
//! which clause fires, and follow unhandled conditions out through
//! enclosing blocks.
//!
//! # モジュール構成
//! - **domain**: names, codes, conditions, handler clauses, outcomes, errors
//! - **ports**: `DispatchStrategy`
//! - **impls**: `FirstMatchDispatch`
//! - **app**: declarations, packages, nested-block propagation, scenarios
//! - **observability**: tracing setup for binaries

pub mod app;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;

use crate::domain::{Condition, DispatchResult, HandlerClauses};
use crate::impls::FirstMatchDispatch;
use crate::ports::DispatchStrategy;

/// Pick the clause that fires for `condition`: first clause naming it, else
/// `WHEN OTHERS`, else [`DispatchResult::Unhandled`].
pub fn dispatch(condition: &Condition, clauses: &HandlerClauses) -> DispatchResult {
    FirstMatchDispatch.dispatch(condition, clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClausePosition, ConditionName, HandlerClause};

    #[test]
    fn free_function_matches_strategy() {
        let clauses = HandlerClauses::new([
            HandlerClause::parse(["NO_DATA_FOUND", "TOO_MANY_ROWS"]).unwrap(),
            HandlerClause::parse(["EMP_SAL_TOO_HIGH"]).unwrap(),
            HandlerClause::others(),
        ])
        .unwrap();

        let raised = Condition::named(ConditionName::new("EMP_SAL_TOO_HIGH").unwrap());
        assert_eq!(
            dispatch(&raised, &clauses),
            DispatchResult::Matched {
                position: ClausePosition::new(1),
                catch_all: false
            }
        );
    }
}
