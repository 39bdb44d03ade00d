//! Typed positions (strongly-typed indices).
//!
//! ## Phantom Type パターン
//! `Index<T>` で共通実装を提供しつつ、`T` は実行時には使わないマーカー型として
//! コンパイル時の型安全性を提供します。A clause position cannot be passed
//! where a block depth is expected, even though both are `usize` underneath.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// IndexMarker は各 index 型のマーカー trait
///
/// Display で使うプレフィックス（"clause#", "block#"）を提供します。
pub trait IndexMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

#[repr(transparent)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index<T: IndexMarker> {
    value: usize,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IndexMarker> Index<T> {
    pub const fn new(value: usize) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn get(self) -> usize {
        self.value
    }
}

// derive だと T にも bound が付いてしまうので手書き
impl<T: IndexMarker> Clone for Index<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: IndexMarker> Copy for Index<T> {}

impl<T: IndexMarker> PartialEq for Index<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: IndexMarker> Eq for Index<T> {}

impl<T: IndexMarker> PartialOrd for Index<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: IndexMarker> Ord for Index<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: IndexMarker> std::hash::Hash for Index<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: IndexMarker> fmt::Debug for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.value)
    }
}

impl<T: IndexMarker> fmt::Display for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.value)
    }
}

impl<T: IndexMarker> From<usize> for Index<T> {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

// ========================================
// マーカー型の定義
// ========================================

pub enum Clause {}

impl IndexMarker for Clause {
    fn prefix() -> &'static str {
        "clause#"
    }
}

pub enum Block {}

impl IndexMarker for Block {
    fn prefix() -> &'static str {
        "block#"
    }
}

/// Rank of a `WHEN` clause within its handler list (0-based).
pub type ClausePosition = Index<Clause>;

/// Nesting depth of a block (0 = outermost).
pub type BlockDepth = Index<Block>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_prefix() {
        assert_eq!(ClausePosition::new(2).to_string(), "clause#2");
        assert_eq!(BlockDepth::new(0).to_string(), "block#0");
    }

    #[test]
    fn positions_order_by_value() {
        let a = ClausePosition::new(0);
        let b = ClausePosition::new(1);
        assert!(a < b);
        assert_eq!(a, ClausePosition::from(0));
        // let _: BlockDepth = a; // <- does not compile
    }

    #[test]
    fn serializes_as_plain_number() {
        let s = serde_json::to_string(&ClausePosition::new(1)).unwrap();
        assert_eq!(s, "1");
        let back: BlockDepth = serde_json::from_str("3").unwrap();
        assert_eq!(back.get(), 3);
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        assert_eq!(std::mem::size_of::<ClausePosition>(), std::mem::size_of::<usize>());
    }
}
