//! Errors - 構築時エラーの分類
//!
//! Every variant here is a construction-time failure. Dispatch itself never
//! fails: "no handler fired" is `DispatchResult::Unhandled`, not an error.

use thiserror::Error;

use super::code::ErrorCode;
use super::name::ConditionName;

/// DispatchError は不正な Condition / HandlerClause / 宣言の構築を報告する
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid error code {code}: {reason}")]
    InvalidErrorCode { code: i32, reason: &'static str },

    #[error("duplicate handler for {0}: an exception may appear in at most one WHEN clause")]
    DuplicateHandler(ConditionName),

    #[error("duplicate WHEN OTHERS clause at position {0}")]
    DuplicateCatchAll(usize),

    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("exception {0} is declared more than once in the same declaration section")]
    DuplicateDeclaration(ConditionName),

    #[error("EXCEPTION_INIT names {0}, which is not declared in this section")]
    UndeclaredException(ConditionName),

    #[error("EXCEPTION_INIT conflict: {name} / {code} is already bound in this section")]
    CodeAlreadyBound { name: ConditionName, code: ErrorCode },

    #[error("unknown exception {0}")]
    UnknownException(ConditionName),

    #[error("a program needs at least one block")]
    EmptyProgram,

    #[error("scenario: {0}")]
    Scenario(String),

    #[error("scenario json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scenario io: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatchError {
    pub(crate) fn invalid_code(code: i32, reason: &'static str) -> Self {
        Self::InvalidErrorCode { code, reason }
    }
}
