//! Scenario documents (JSON).
//!
//! A scenario describes packages, nested blocks and one raised condition.
//! Fields that are naturally empty may be omitted and default, so the
//! smallest useful document is `{"blocks":[{}],"raise":{...}}`. Names are kept
//! as plain strings here and validated by [`Scenario::build`], so a bad name
//! surfaces as `InvalidIdentifier` rather than a JSON error.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::builder::ProgramBuilder;
use super::propagation::{Block, Program};
use super::scope::{Declarations, Package};
use crate::domain::{
    Condition, ConditionName, DispatchError, ErrorCode, HandlerClause, HandlerClauses, Propagation,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub packages: Vec<PackageSpec>,

    /// Outermost first; the condition is raised in the last one.
    pub blocks: Vec<BlockSpec>,

    pub raise: RaiseSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSpec {
    pub name: String,

    #[serde(default)]
    pub exceptions: Vec<ExceptionSpec>,
}

/// `name EXCEPTION;` plus optional `PRAGMA EXCEPTION_INIT(name, code);`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExceptionSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub exceptions: Vec<ExceptionSpec>,

    #[serde(default)]
    pub handlers: Vec<HandlerSpec>,
}

/// One `WHEN` arm. An empty (or missing) `when` list is `WHEN OTHERS`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerSpec {
    #[serde(default)]
    pub when: Vec<String>,

    #[serde(default)]
    pub reraise: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum RaiseSpec {
    /// `RAISE name;`
    Named { name: String },
    /// An engine error by number.
    System { code: i32 },
    /// `RAISE_APPLICATION_ERROR(code, message);`
    Application { code: i32, message: String },
}

/// A validated scenario, ready to raise.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub program: Program,
    pub condition: Condition,
}

impl Prepared {
    pub fn run(&self) -> Result<Propagation, DispatchError> {
        self.program.raise(&self.condition)
    }
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, DispatchError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DispatchError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn build(&self) -> Result<Prepared, DispatchError> {
        let mut builder = ProgramBuilder::new();
        for spec in &self.packages {
            builder.add_package(spec.build()?)?;
        }
        for spec in &self.blocks {
            builder = builder.block(spec.build()?);
        }
        Ok(Prepared {
            program: builder.build()?,
            condition: self.raise.build()?,
        })
    }
}

impl PackageSpec {
    fn build(&self) -> Result<Package, DispatchError> {
        let mut package = Package::new(ConditionName::new(&self.name)?)?;
        declare_all(package.declarations_mut(), &self.exceptions)?;
        Ok(package)
    }
}

impl BlockSpec {
    fn build(&self) -> Result<Block, DispatchError> {
        let mut declarations = Declarations::new();
        declare_all(&mut declarations, &self.exceptions)?;

        let clauses = self
            .handlers
            .iter()
            .map(|h| {
                let clause = HandlerClause::parse(&h.when)?;
                Ok(if h.reraise { clause.reraising() } else { clause })
            })
            .collect::<Result<Vec<_>, DispatchError>>()?;

        let mut block = Block::new(HandlerClauses::new(clauses)?).with_declarations(declarations);
        if let Some(label) = &self.label {
            block = block.with_label(label);
        }
        Ok(block)
    }
}

impl RaiseSpec {
    fn build(&self) -> Result<Condition, DispatchError> {
        match self {
            Self::Named { name } => Ok(Condition::named(ConditionName::new(name)?)),
            Self::System { code } => Ok(Condition::system(ErrorCode::new(*code))),
            Self::Application { code, message } => Condition::application(*code, message.clone()),
        }
    }
}

fn declare_all(
    declarations: &mut Declarations,
    specs: &[ExceptionSpec],
) -> Result<(), DispatchError> {
    for spec in specs {
        declarations.declare_bound(ConditionName::new(&spec.name)?, spec.code)?;
    }
    Ok(())
}
