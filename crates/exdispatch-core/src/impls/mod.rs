//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **FirstMatchDispatch**: v1 デフォルトの DispatchStrategy

pub mod dispatch;

pub use self::dispatch::FirstMatchDispatch;
