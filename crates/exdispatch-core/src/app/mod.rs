//! App - アプリケーション層
//!
//! Builds nested blocks out of domain values and runs conditions through them.
//!
//! # 主要コンポーネント
//! - **Declarations / Package**: 例外宣言と EXCEPTION_INIT
//! - **ProgramBuilder**: Program の構築と起動時検証
//! - **Program**: 内側から外側への伝播
//! - **Scenario**: JSON で書かれたシナリオ

pub mod builder;
pub mod propagation;
pub mod scenario;
pub mod scope;

pub use self::builder::ProgramBuilder;
pub use self::propagation::{Block, Program};
pub use self::scenario::{Prepared, Scenario};
pub use self::scope::{Declarations, Package};
