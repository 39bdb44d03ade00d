//! Condition - 発生した例外
//!
//! A raised error instance. Three ways to raise one:
//!
//! - `RAISE name`: [`Condition::named`], identifier only
//! - an engine error known only by number: [`Condition::system`], code only
//! - `RAISE_APPLICATION_ERROR(code, message)`: [`Condition::application`],
//!   code and message, code checked against
//!   [`APPLICATION_ERROR_RANGE`](super::code::APPLICATION_ERROR_RANGE)
//!
//! Conditions are immutable. Resolving one against a scope (binding a code to
//! a name through `EXCEPTION_INIT`, or a name to its code) yields a new value.

use serde::Serialize;
use std::fmt;

use super::catalog;
use super::code::{ErrorCode, NO_DATA_FOUND_ORA, NO_DATA_FOUND_SQLCODE, USER_DEFINED_SQLCODE};
use super::errors::DispatchError;
use super::name::ConditionName;

/// Longest message `RAISE_APPLICATION_ERROR` keeps, in bytes.
pub const MAX_MESSAGE_LEN: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionKind {
    /// `RAISE name`
    Named,
    /// Raised by the engine, identified by code.
    System,
    /// `RAISE_APPLICATION_ERROR`
    Application,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    kind: ConditionKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<ConditionName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,

    #[serde(skip_serializing_if = "String::is_empty")]
    message: String,
}

impl Condition {
    pub fn named(name: ConditionName) -> Self {
        Self {
            kind: ConditionKind::Named,
            identifier: Some(name),
            code: None,
            message: String::new(),
        }
    }

    /// A predefined exception raised by name, carrying its catalog code.
    pub fn predefined(name: ConditionName) -> Result<Self, DispatchError> {
        let entry =
            catalog::by_name(name.as_str()).ok_or_else(|| DispatchError::UnknownException(name.clone()))?;
        Ok(Self {
            kind: ConditionKind::Named,
            identifier: Some(name),
            code: Some(entry.code),
            message: entry.message.to_string(),
        })
    }

    /// An engine error by number. `100` is the `SQLCODE` form of
    /// NO_DATA_FOUND and is stored as -1403.
    pub fn system(code: ErrorCode) -> Self {
        let code = if code.value() == NO_DATA_FOUND_SQLCODE {
            ErrorCode::new(NO_DATA_FOUND_ORA)
        } else {
            code
        };
        let message = catalog::by_code(code)
            .map(|p| p.message.to_string())
            .unwrap_or_default();
        Self {
            kind: ConditionKind::System,
            identifier: None,
            code: Some(code),
            message,
        }
    }

    pub fn application(code: i32, message: impl Into<String>) -> Result<Self, DispatchError> {
        let code = ErrorCode::application(code)?;
        Ok(Self {
            kind: ConditionKind::Application,
            identifier: None,
            code: Some(code),
            message: truncate_message(message.into()),
        })
    }

    pub fn kind(&self) -> ConditionKind {
        self.kind
    }

    pub fn identifier(&self) -> Option<&ConditionName> {
        self.identifier.as_ref()
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The same condition as seen under `name`.
    pub fn with_identifier(&self, name: ConditionName) -> Self {
        Self {
            identifier: Some(name),
            ..self.clone()
        }
    }

    /// The same condition with its name out of sight; only a catch-all matches it.
    pub fn anonymous(&self) -> Self {
        Self {
            identifier: None,
            ..self.clone()
        }
    }

    /// The same condition carrying `code` (a named raise of a bound exception).
    pub fn with_code(&self, code: ErrorCode) -> Self {
        let message = if self.message.is_empty() {
            catalog::by_code(code)
                .map(|p| p.message.to_string())
                .unwrap_or_default()
        } else {
            self.message.clone()
        };
        Self {
            code: Some(code),
            message,
            ..self.clone()
        }
    }

    pub fn sqlcode(&self) -> i32 {
        self.code.map_or(USER_DEFINED_SQLCODE, ErrorCode::sqlcode)
    }

    pub fn sqlerrm(&self) -> String {
        match self.code {
            Some(code) => format!("{}: {}", code.ora_prefix(), self.message),
            None => "User-Defined Exception".to_string(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.identifier, self.code) {
            (Some(name), Some(code)) => write!(f, "{name} ({code})"),
            (Some(name), None) => write!(f, "{name}"),
            (None, Some(code)) => write!(f, "{code}"),
            (None, None) => write!(f, "<anonymous>"),
        }
    }
}

fn truncate_message(mut message: String) -> String {
    if message.len() > MAX_MESSAGE_LEN {
        let mut cut = MAX_MESSAGE_LEN;
        while !message.is_char_boundary(cut) {
            cut -= 1;
        }
        message.truncate(cut);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn name(s: &str) -> ConditionName {
        ConditionName::new(s).unwrap()
    }

    #[test]
    fn named_carries_identifier_only() {
        let c = Condition::named(name("emp_sal_too_high"));
        assert_eq!(c.kind(), ConditionKind::Named);
        assert_eq!(c.identifier().map(|n| n.as_str()), Some("EMP_SAL_TOO_HIGH"));
        assert_eq!(c.code(), None);
        assert_eq!(c.sqlcode(), 1);
        assert_eq!(c.sqlerrm(), "User-Defined Exception");
    }

    #[test]
    fn system_carries_code_only() {
        let c = Condition::system(ErrorCode::new(-1422));
        assert_eq!(c.identifier(), None);
        assert_eq!(c.sqlcode(), -1422);
        assert_eq!(
            c.sqlerrm(),
            "ORA-01422: exact fetch returns more than requested number of rows"
        );
    }

    #[test]
    fn no_data_found_reports_100() {
        let c = Condition::predefined(name("no_data_found")).unwrap();
        assert_eq!(c.sqlcode(), 100);
        assert_eq!(c.sqlerrm(), "ORA-01403: no data found");
    }

    #[rstest]
    #[case(100)]
    #[case(-1403)]
    fn system_no_data_found_accepts_either_form(#[case] code: i32) {
        let c = Condition::system(ErrorCode::new(code));
        assert_eq!(c.code(), Some(ErrorCode::new(-1403)));
        assert_eq!(c.sqlcode(), 100);
        assert_eq!(c.sqlerrm(), "ORA-01403: no data found");
    }

    #[test]
    fn predefined_rejects_unknown_names() {
        let err = Condition::predefined(name("fk_violation")).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownException(_)));
    }

    #[rstest]
    #[case(-20500, true)]
    #[case(-20000, true)]
    #[case(-20999, true)]
    #[case(-19999, false)]
    #[case(-21000, false)]
    fn application_code_range(#[case] code: i32, #[case] ok: bool) {
        let result = Condition::application(code, "boom");
        assert_eq!(result.is_ok(), ok);
        if let Err(err) = result {
            assert!(matches!(err, DispatchError::InvalidErrorCode { .. }));
        }
    }

    #[test]
    fn application_error_formats_sqlerrm() {
        let c = Condition::application(-20001, "salary too high").unwrap();
        assert_eq!(c.kind(), ConditionKind::Application);
        assert_eq!(c.sqlcode(), -20001);
        assert_eq!(c.sqlerrm(), "ORA-20001: salary too high");
    }

    #[test]
    fn application_message_truncated_on_char_boundary() {
        let long = "é".repeat(MAX_MESSAGE_LEN);
        let c = Condition::application(-20001, long).unwrap();
        assert!(c.message().len() <= MAX_MESSAGE_LEN);
        assert_eq!(c.message().len(), MAX_MESSAGE_LEN);
        assert!(c.message().chars().all(|ch| ch == 'é'));
    }

    #[test]
    fn resolution_returns_new_values() {
        let raised = Condition::system(ErrorCode::new(-2292));
        let seen = raised.with_identifier(name("fk_violation"));
        assert_eq!(raised.identifier(), None);
        assert_eq!(seen.identifier().map(|n| n.as_str()), Some("FK_VIOLATION"));
        assert_eq!(seen.code(), raised.code());
        assert_eq!(seen.anonymous(), raised);
    }

    #[test]
    fn with_code_fills_catalog_message() {
        let c = Condition::named(name("zero_divide")).with_code(ErrorCode::new(-1476));
        assert_eq!(c.sqlerrm(), "ORA-01476: divisor is equal to zero");
    }
}
