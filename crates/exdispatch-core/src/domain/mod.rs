//! Domain model (names, codes, conditions, handler clauses, outcomes).

pub mod catalog;
pub mod clause;
pub mod code;
pub mod condition;
pub mod errors;
pub mod ids;
pub mod name;
pub mod outcome;

pub use self::catalog::Predefined;
pub use self::clause::{HandlerClause, HandlerClauses};
pub use self::code::{APPLICATION_ERROR_RANGE, ErrorCode};
pub use self::condition::{Condition, ConditionKind};
pub use self::errors::DispatchError;
pub use self::ids::{BlockDepth, ClausePosition};
pub use self::name::ConditionName;
pub use self::outcome::{DispatchResult, Propagation, PropagationStep};
