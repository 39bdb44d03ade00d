//! ConditionName - 例外名の命名規約
//!
//! Exception names are case-insensitive identifiers. We normalise to upper
//! case once, at construction, so comparisons elsewhere are plain string
//! equality.
//!
//! # 命名規約
//! - `NAME`: starts with an ASCII letter, then letters / digits / `_` / `$` / `#`
//! - `PKG.NAME`: a package-qualified reference (exactly one dot)
//! - at most 128 bytes per part
//! - `OTHERS` is the catch-all keyword, never an exception name

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::DispatchError;

const MAX_PART_LEN: usize = 128;
const RESERVED_CATCH_ALL: &str = "OTHERS";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConditionName(String);

impl ConditionName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DispatchError> {
        let raw = raw.as_ref().trim();
        let upper = raw.to_ascii_uppercase();

        let mut parts = upper.split('.');
        let valid = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), None, None) => is_identifier(name),
            (Some(pkg), Some(name), None) => is_identifier(pkg) && is_identifier(name),
            _ => false,
        };
        if !valid || upper.rsplit('.').next() == Some(RESERVED_CATCH_ALL) {
            return Err(DispatchError::InvalidIdentifier(raw.to_string()));
        }
        Ok(Self(upper))
    }

    /// Qualify `name` with a package name: `PKG.NAME`.
    pub fn qualified(package: &ConditionName, name: &ConditionName) -> Result<Self, DispatchError> {
        Self::new(format!("{}.{}", package.0, name.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The package part of a qualified name, if any.
    pub fn package(&self) -> Option<&str> {
        self.0.split_once('.').map(|(pkg, _)| pkg)
    }
}

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    part.len() <= MAX_PART_LEN
        && first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '#'))
}

impl FromStr for ConditionName {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ConditionName {
    type Error = DispatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConditionName> for String {
    fn from(value: ConditionName) -> Self {
        value.0
    }
}

impl fmt::Display for ConditionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("no_data_found", "NO_DATA_FOUND")]
    #[case("  Emp_Sal_Too_High ", "EMP_SAL_TOO_HIGH")]
    #[case("errs.fk_violation", "ERRS.FK_VIOLATION")]
    #[case("x$y#z_1", "X$Y#Z_1")]
    fn normalises_valid_names(#[case] raw: &str, #[case] expected: &str) {
        let name = ConditionName::new(raw).unwrap();
        assert_eq!(name.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("1abc")]
    #[case("_abc")]
    #[case("has space")]
    #[case("a.b.c")]
    #[case("pkg.")]
    #[case("others")]
    #[case("pkg.Others")]
    fn rejects_invalid_names(#[case] raw: &str) {
        let err = ConditionName::new(raw).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidIdentifier(_)));
    }

    #[test]
    fn rejects_overlong_names() {
        let long = "A".repeat(MAX_PART_LEN + 1);
        assert!(ConditionName::new(&long).is_err());
        assert!(ConditionName::new("A".repeat(MAX_PART_LEN)).is_ok());
    }

    #[test]
    fn qualified_names_expose_package() {
        let pkg = ConditionName::new("errs").unwrap();
        let name = ConditionName::new("fk_violation").unwrap();
        let q = ConditionName::qualified(&pkg, &name).unwrap();
        assert_eq!(q.as_str(), "ERRS.FK_VIOLATION");
        assert_eq!(q.package(), Some("ERRS"));
        assert_eq!(name.package(), None);
    }

    #[test]
    fn deserializes_through_validation() {
        let ok: ConditionName = serde_json::from_str("\"too_many_rows\"").unwrap();
        assert_eq!(ok.as_str(), "TOO_MANY_ROWS");

        let bad: Result<ConditionName, _> = serde_json::from_str("\"9lives\"");
        assert!(bad.is_err());
    }
}
