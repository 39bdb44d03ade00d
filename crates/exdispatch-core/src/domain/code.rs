//! ErrorCode - 数値エラーコード
//!
//! Codes are signed. Engine errors are negative, `RAISE_APPLICATION_ERROR`
//! is restricted to `[-20999, -20000]`, and `100` is the ANSI code for
//! "no data found".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use super::errors::DispatchError;

/// Codes available to `RAISE_APPLICATION_ERROR`.
pub const APPLICATION_ERROR_RANGE: RangeInclusive<i32> = -20999..=-20000;

/// ANSI "no data found"; what `SQLCODE` reports for NO_DATA_FOUND.
pub const NO_DATA_FOUND_SQLCODE: i32 = 100;

/// The engine-side code behind NO_DATA_FOUND.
pub const NO_DATA_FOUND_ORA: i32 = -1403;

/// `SQLCODE` of a user-declared exception with no bound code.
pub const USER_DEFINED_SQLCODE: i32 = 1;

/// Lower bound (exclusive) for `EXCEPTION_INIT` codes.
const PRAGMA_CODE_FLOOR: i32 = -1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(i32);

impl ErrorCode {
    /// Any engine code. No range check: engine errors are whatever the engine says.
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// A code for `RAISE_APPLICATION_ERROR`.
    pub fn application(code: i32) -> Result<Self, DispatchError> {
        if !APPLICATION_ERROR_RANGE.contains(&code) {
            return Err(DispatchError::invalid_code(
                code,
                "application error codes must be in [-20999, -20000]",
            ));
        }
        Ok(Self(code))
    }

    /// A code accepted by `PRAGMA EXCEPTION_INIT`.
    ///
    /// Negative codes above -1_000_000, or exactly `100`. -1403 is refused:
    /// NO_DATA_FOUND is bound through `100`.
    pub fn pragma(code: i32) -> Result<Self, DispatchError> {
        if code == NO_DATA_FOUND_ORA {
            return Err(DispatchError::invalid_code(
                code,
                "use 100 instead of -1403 in EXCEPTION_INIT",
            ));
        }
        if code == NO_DATA_FOUND_SQLCODE {
            return Ok(Self(NO_DATA_FOUND_ORA));
        }
        if code >= 0 || code <= PRAGMA_CODE_FLOOR {
            return Err(DispatchError::invalid_code(
                code,
                "EXCEPTION_INIT codes must be negative and greater than -1000000",
            ));
        }
        Ok(Self(code))
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    pub fn is_application(self) -> bool {
        APPLICATION_ERROR_RANGE.contains(&self.0)
    }

    /// What `SQLCODE` reports for this code.
    pub const fn sqlcode(self) -> i32 {
        if self.0 == NO_DATA_FOUND_ORA {
            NO_DATA_FOUND_SQLCODE
        } else {
            self.0
        }
    }

    /// `ORA-NNNNN` prefix used by `SQLERRM`.
    pub fn ora_prefix(self) -> String {
        format!("ORA-{:05}", self.0.unsigned_abs())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
