//! Predefined exceptions.
//!
//! A working subset of the names the standard package declares, each with its
//! engine code and default message. Not the full catalog.

use serde::Serialize;

use super::code::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Predefined {
    pub name: &'static str,
    pub code: ErrorCode,
    pub message: &'static str,
}

const fn entry(name: &'static str, code: i32, message: &'static str) -> Predefined {
    Predefined {
        name,
        code: ErrorCode::new(code),
        message,
    }
}

pub const PREDEFINED: &[Predefined] = &[
    entry("DUP_VAL_ON_INDEX", -1, "unique constraint violated"),
    entry("TIMEOUT_ON_RESOURCE", -51, "timeout occurred while waiting for a resource"),
    entry("INVALID_CURSOR", -1001, "invalid cursor"),
    entry("NOT_LOGGED_ON", -1012, "not logged on"),
    entry("LOGIN_DENIED", -1017, "invalid username/password; logon denied"),
    entry("NO_DATA_FOUND", -1403, "no data found"),
    entry("SYS_INVALID_ROWID", -1410, "invalid ROWID"),
    entry("TOO_MANY_ROWS", -1422, "exact fetch returns more than requested number of rows"),
    entry("ZERO_DIVIDE", -1476, "divisor is equal to zero"),
    entry("INVALID_NUMBER", -1722, "invalid number"),
    entry("STORAGE_ERROR", -6500, "PL/SQL: storage error"),
    entry("PROGRAM_ERROR", -6501, "PL/SQL: program error"),
    entry("VALUE_ERROR", -6502, "PL/SQL: numeric or value error"),
    entry("ROWTYPE_MISMATCH", -6504, "PL/SQL: Return types of Result Set variables or query do not match"),
    entry("CURSOR_ALREADY_OPEN", -6511, "PL/SQL: cursor already open"),
    entry("ACCESS_INTO_NULL", -6530, "Reference to uninitialized composite"),
    entry("COLLECTION_IS_NULL", -6531, "Reference to uninitialized collection"),
    entry("SUBSCRIPT_OUTSIDE_LIMIT", -6532, "Subscript outside of limit"),
    entry("SUBSCRIPT_BEYOND_COUNT", -6533, "Subscript beyond count"),
    entry("CASE_NOT_FOUND", -6592, "CASE not found while executing CASE statement"),
    entry("SELF_IS_NULL", -30625, "method dispatch on NULL SELF argument is disallowed"),
];

pub fn by_name(name: &str) -> Option<&'static Predefined> {
    PREDEFINED.iter().find(|p| p.name == name)
}

pub fn by_code(code: ErrorCode) -> Option<&'static Predefined> {
    PREDEFINED.iter().find(|p| p.code == code)
}
