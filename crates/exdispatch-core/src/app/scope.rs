//! Scope - 例外宣言と PRAGMA EXCEPTION_INIT
//!
//! A [`Declarations`] is the exception part of one declaration section:
//! which names it declares and which of them `EXCEPTION_INIT` binds to a
//! code. A [`Package`] is a declaration section whose names are visible from
//! everywhere as `PKG.NAME`.

use std::collections::{BTreeSet, HashMap};

use crate::domain::{ConditionName, DispatchError, ErrorCode};

#[derive(Debug, Clone, Default)]
pub struct Declarations {
    declared: BTreeSet<ConditionName>,
    code_of: HashMap<ConditionName, ErrorCode>,
    name_of: HashMap<ErrorCode, ConditionName>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// `name EXCEPTION;`
    pub fn declare(&mut self, name: ConditionName) -> Result<(), DispatchError> {
        if self.declared.contains(&name) {
            return Err(DispatchError::DuplicateDeclaration(name));
        }
        self.declared.insert(name);
        Ok(())
    }

    /// `PRAGMA EXCEPTION_INIT(name, code);`
    pub fn exception_init(&mut self, name: ConditionName, code: i32) -> Result<(), DispatchError> {
        if !self.declared.contains(&name) {
            return Err(DispatchError::UndeclaredException(name));
        }
        let code = ErrorCode::pragma(code)?;
        if self.code_of.contains_key(&name) || self.name_of.contains_key(&code) {
            return Err(DispatchError::CodeAlreadyBound { name, code });
        }
        self.code_of.insert(name.clone(), code);
        self.name_of.insert(code, name);
        Ok(())
    }

    /// Declaration plus optional `EXCEPTION_INIT` in one go.
    pub fn declare_bound(
        &mut self,
        name: ConditionName,
        code: Option<i32>,
    ) -> Result<(), DispatchError> {
        self.declare(name.clone())?;
        match code {
            Some(code) => self.exception_init(name, code),
            None => Ok(()),
        }
    }

    pub fn is_declared(&self, name: &ConditionName) -> bool {
        self.declared.contains(name)
    }

    pub fn code_for(&self, name: &ConditionName) -> Option<ErrorCode> {
        self.code_of.get(name).copied()
    }

    pub fn name_for(&self, code: ErrorCode) -> Option<&ConditionName> {
        self.name_of.get(&code)
    }

    pub fn names(&self) -> impl Iterator<Item = &ConditionName> {
        self.declared.iter()
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }
}

/// A package specification that declares shared exceptions.
#[derive(Debug, Clone)]
pub struct Package {
    name: ConditionName,
    declarations: Declarations,
}

impl Package {
    pub fn new(name: ConditionName) -> Result<Self, DispatchError> {
        if name.package().is_some() {
            return Err(DispatchError::InvalidIdentifier(name.to_string()));
        }
        Ok(Self {
            name,
            declarations: Declarations::new(),
        })
    }

    pub fn name(&self) -> &ConditionName {
        &self.name
    }

    pub fn declarations_mut(&mut self) -> &mut Declarations {
        &mut self.declarations
    }

    /// Does this package declare `qualified` (`PKG.NAME`)?
    pub fn declares(&self, qualified: &ConditionName) -> bool {
        self.local(qualified)
            .is_some_and(|local| self.declarations.is_declared(&local))
    }

    pub fn code_for(&self, qualified: &ConditionName) -> Option<ErrorCode> {
        self.local(qualified)
            .and_then(|local| self.declarations.code_for(&local))
    }

    /// The qualified name bound to `code`, if this package binds it.
    pub fn name_for(&self, code: ErrorCode) -> Option<ConditionName> {
        self.declarations
            .name_for(code)
            .and_then(|local| ConditionName::qualified(&self.name, local).ok())
    }

    fn local(&self, qualified: &ConditionName) -> Option<ConditionName> {
        let (pkg, local) = qualified.as_str().split_once('.')?;
        if pkg != self.name.as_str() {
            return None;
        }
        ConditionName::new(local).ok()
    }
}
