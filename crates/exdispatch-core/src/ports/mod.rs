//! Ports - 抽象化レイヤー
//!
//! The seam between the propagation engine and the matching rule it uses.

pub mod dispatch;

pub use self::dispatch::DispatchStrategy;
