//! Propagation - 未処理の例外を外側のブロックへ
//!
//! A [`Program`] is a chain of nested [`Block`]s, outermost first, plus the
//! packages visible from all of them. A condition is raised in the innermost
//! block and walks outward until a clause catches it without re-raising, or
//! it leaves the outermost block.
//!
//! What a block can name depends on where it sits. An exception declared in
//! an inner block is out of scope once the condition leaves that block, so
//! outer blocks see it anonymously and only `WHEN OTHERS` can catch it. A
//! condition that carries a code is re-resolved in every block through the
//! `EXCEPTION_INIT` bindings visible there.

use std::sync::Arc;

use tracing::{debug, warn};

use super::scope::{Declarations, Package};
use crate::domain::{
    BlockDepth, Condition, ConditionName, DispatchError, DispatchResult, ErrorCode,
    HandlerClauses, Propagation, PropagationStep, catalog,
};
use crate::ports::DispatchStrategy;

/// One `DECLARE ... BEGIN ... EXCEPTION ... END` block.
#[derive(Debug, Clone, Default)]
pub struct Block {
    label: Option<String>,
    declarations: Declarations,
    handlers: HandlerClauses,
}

impl Block {
    pub fn new(handlers: HandlerClauses) -> Self {
        Self {
            label: None,
            declarations: Declarations::new(),
            handlers,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_declarations(mut self, declarations: Declarations) -> Self {
        self.declarations = declarations;
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    pub fn handlers(&self) -> &HandlerClauses {
        &self.handlers
    }
}

/// Which declaration a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Block(usize),
    Package(usize),
    Predefined,
}

/// Nested blocks plus shared packages. Built by [`super::ProgramBuilder`].
#[derive(Clone)]
pub struct Program {
    pub(super) packages: Vec<Package>,
    pub(super) blocks: Vec<Block>,
    pub(super) strategy: Arc<dyn DispatchStrategy>,
}

impl Program {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Raise `condition` in the innermost block and follow it outward.
    ///
    /// Fails only if the condition names an exception that is not visible
    /// where it is raised.
    pub fn raise(&self, condition: &Condition) -> Result<Propagation, DispatchError> {
        let innermost = self.blocks.len() - 1;
        let (raised, origin) = self.at_raise_site(condition, innermost)?;

        let mut steps = Vec::with_capacity(self.blocks.len());
        for depth in (0..=innermost).rev() {
            let block = &self.blocks[depth];
            let seen_as = self.seen_from(&raised, origin, depth);
            let result = self.strategy.dispatch(&seen_as, &block.handlers);

            let reraised = result
                .position()
                .and_then(|p| block.handlers.get(p))
                .is_some_and(|clause| clause.reraises());

            debug!(
                depth,
                label = block.label.as_deref().unwrap_or(""),
                condition = %seen_as,
                ?result,
                reraised,
                "propagation step"
            );

            steps.push(PropagationStep {
                depth: BlockDepth::new(depth),
                label: block.label.clone(),
                seen_as: seen_as.clone(),
                result,
                reraised,
            });

            if let DispatchResult::Matched { position, .. } = result {
                if !reraised {
                    return Ok(Propagation::Handled {
                        depth: BlockDepth::new(depth),
                        position,
                        condition: seen_as,
                        steps,
                    });
                }
            }
        }

        warn!(
            condition = %raised,
            sqlcode = raised.sqlcode(),
            "condition escaped the outermost block"
        );
        Ok(Propagation::Unhandled {
            condition: raised,
            steps,
        })
    }

    /// Resolve the condition where it is raised: check its name is in
    /// scope and attach the code the name is bound to.
    fn at_raise_site(
        &self,
        condition: &Condition,
        depth: usize,
    ) -> Result<(Condition, Option<Origin>), DispatchError> {
        let Some(name) = condition.identifier() else {
            return Ok((condition.clone(), None));
        };
        let origin = self
            .lookup(name, depth)
            .ok_or_else(|| DispatchError::UnknownException(name.clone()))?;

        let raised = match (condition.code(), self.code_of(name, origin)) {
            (None, Some(code)) => condition.with_code(code),
            _ => condition.clone(),
        };
        Ok((raised, Some(origin)))
    }

    /// The condition as the block at `depth` sees it.
    fn seen_from(&self, raised: &Condition, origin: Option<Origin>, depth: usize) -> Condition {
        if let (Some(name), Some(origin)) = (raised.identifier(), origin) {
            if self.lookup(name, depth) == Some(origin) {
                return raised.clone();
            }
        }
        match raised.code().and_then(|code| self.resolve_code(code, depth)) {
            Some(name) => raised.with_identifier(name),
            None => raised.anonymous(),
        }
    }

    /// The declaration `name` refers to from inside the block at `depth`.
    fn lookup(&self, name: &ConditionName, depth: usize) -> Option<Origin> {
        if name.package().is_some() {
            return self
                .packages
                .iter()
                .position(|p| p.declares(name))
                .map(Origin::Package);
        }
        (0..=depth)
            .rev()
            .find(|&i| self.blocks[i].declarations.is_declared(name))
            .map(Origin::Block)
            .or_else(|| catalog::by_name(name.as_str()).map(|_| Origin::Predefined))
    }

    fn code_of(&self, name: &ConditionName, origin: Origin) -> Option<ErrorCode> {
        match origin {
            Origin::Block(i) => self.blocks[i].declarations.code_for(name),
            Origin::Package(i) => self.packages[i].code_for(name),
            Origin::Predefined => catalog::by_name(name.as_str()).map(|p| p.code),
        }
    }

    /// The name bound to `code` from inside the block at `depth`: innermost
    /// `EXCEPTION_INIT` first, then packages in order, then predefined.
    ///
    /// A binding only counts if its name still refers to the same
    /// declaration from `depth`; a shadowed name does not catch the code.
    fn resolve_code(&self, code: ErrorCode, depth: usize) -> Option<ConditionName> {
        let visible =
            |name: &ConditionName, origin: Origin| self.lookup(name, depth) == Some(origin);
        (0..=depth)
            .rev()
            .find_map(|i| {
                self.blocks[i]
                    .declarations
                    .name_for(code)
                    .filter(|name| visible(*name, Origin::Block(i)))
                    .cloned()
            })
            .or_else(|| self.packages.iter().find_map(|p| p.name_for(code)))
            .or_else(|| {
                catalog::by_code(code)
                    .and_then(|p| ConditionName::new(p.name).ok())
                    .filter(|name| visible(name, Origin::Predefined))
            })
    }

    /// Every handler name must refer to something visible from its block.
    pub(super) fn check_handler_names(&self) -> Result<(), DispatchError> {
        for (depth, block) in self.blocks.iter().enumerate() {
            if let Some(unknown) = block
                .handlers
                .named()
                .find(|name| self.lookup(name, depth).is_none())
            {
                return Err(DispatchError::UnknownException(unknown.clone()));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("packages", &self.packages)
            .field("blocks", &self.blocks)
            .finish_non_exhaustive()
    }
}
