//! ProgramBuilder - Program の構築と起動時検証
//!
//! # Fail-fast 設計
//! - blocks は外側から内側の順に追加
//! - build() 時に全 handler の名前が見えるかチェック
//! - 問題があれば DispatchError を返す（raise 時ではなく構築時に）

use std::sync::Arc;

use super::propagation::{Block, Program};
use super::scope::Package;
use crate::domain::DispatchError;
use crate::impls::FirstMatchDispatch;
use crate::ports::DispatchStrategy;

/// ProgramBuilder は Program を構築
///
/// # 使用例
/// ```ignore
/// let program = ProgramBuilder::new()
///     .package(errs)
///     .block(outer)
///     .block(inner)
///     .build()?;
/// ```
pub struct ProgramBuilder {
    packages: Vec<Package>,
    blocks: Vec<Block>,
    strategy: Arc<dyn DispatchStrategy>,
    deferred: Option<DispatchError>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self {
            packages: Vec::new(),
            blocks: Vec::new(),
            strategy: Arc::new(FirstMatchDispatch::new()),
            deferred: None,
        }
    }

    /// Package の追加。名前が重複したら DuplicateDeclaration
    pub fn add_package(&mut self, package: Package) -> Result<(), DispatchError> {
        if self.packages.iter().any(|p| p.name() == package.name()) {
            return Err(DispatchError::DuplicateDeclaration(package.name().clone()));
        }
        self.packages.push(package);
        Ok(())
    }

    /// Like [`ProgramBuilder::add_package`], chaining. A duplicate package
    /// name surfaces from `build()`.
    pub fn package(mut self, package: Package) -> Self {
        if let Err(err) = self.add_package(package) {
            self.deferred.get_or_insert(err);
        }
        self
    }

    /// 次に内側のブロックを追加
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Swap the clause-selection rule.
    pub fn strategy(mut self, strategy: Arc<dyn DispatchStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// # 検証
    /// - ブロックが一つ以上あること
    /// - 各ブロックの handler 名が、そのブロックから見える例外であること
    pub fn build(self) -> Result<Program, DispatchError> {
        if let Some(err) = self.deferred {
            return Err(err);
        }
        if self.blocks.is_empty() {
            return Err(DispatchError::EmptyProgram);
        }
        let program = Program {
            packages: self.packages,
            blocks: self.blocks,
            strategy: self.strategy,
        };
        program.check_handler_names()?;
        Ok(program)
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::scope::Declarations;
    use crate::domain::{
        ClausePosition, Condition, ConditionName, DispatchResult, HandlerClause, HandlerClauses,
        Propagation,
    };

    fn name(s: &str) -> ConditionName {
        ConditionName::new(s).unwrap()
    }

    #[test]
    fn test_build_success() {
        let block = Block::new(
            HandlerClauses::new([HandlerClause::parse(["no_data_found"]).unwrap()]).unwrap(),
        );
        assert!(ProgramBuilder::new().block(block).build().is_ok());
    }

    #[test]
    fn test_build_without_blocks() {
        let result = ProgramBuilder::new().build();
        assert!(matches!(result, Err(DispatchError::EmptyProgram)));
    }

    #[test]
    fn test_build_unknown_handler_name() {
        let block = Block::new(
            HandlerClauses::new([HandlerClause::parse(["emp_sal_too_high"]).unwrap()]).unwrap(),
        );
        let result = ProgramBuilder::new().block(block).build();
        assert!(matches!(
            result,
            Err(DispatchError::UnknownException(n)) if n.as_str() == "EMP_SAL_TOO_HIGH"
        ));
    }

    #[test]
    fn test_build_inner_name_not_visible_outside() {
        let mut inner = Declarations::new();
        inner.declare(name("inner_only")).unwrap();

        let result = ProgramBuilder::new()
            .block(Block::new(
                HandlerClauses::new([HandlerClause::parse(["inner_only"]).unwrap()]).unwrap(),
            ))
            .block(Block::new(HandlerClauses::empty()).with_declarations(inner))
            .build();
        assert!(matches!(result, Err(DispatchError::UnknownException(_))));
    }

    #[test]
    fn test_duplicate_package() {
        let result = ProgramBuilder::new()
            .package(Package::new(name("errs")).unwrap())
            .package(Package::new(name("ERRS")).unwrap())
            .block(Block::default())
            .build();
        assert!(matches!(result, Err(DispatchError::DuplicateDeclaration(_))));
    }

    struct AlwaysFirst;

    impl DispatchStrategy for AlwaysFirst {
        fn dispatch(&self, _condition: &Condition, clauses: &HandlerClauses) -> DispatchResult {
            if clauses.is_empty() {
                DispatchResult::Unhandled
            } else {
                DispatchResult::Matched {
                    position: ClausePosition::new(0),
                    catch_all: false,
                }
            }
        }
    }

    #[test]
    fn test_custom_strategy_is_used() {
        let block = Block::new(
            HandlerClauses::new([HandlerClause::parse(["zero_divide"]).unwrap()]).unwrap(),
        );
        let program = ProgramBuilder::new()
            .strategy(Arc::new(AlwaysFirst))
            .block(block)
            .build()
            .unwrap();

        let outcome = program
            .raise(&Condition::named(name("value_error")))
            .unwrap();
        assert!(matches!(outcome, Propagation::Handled { .. }));
    }
}
