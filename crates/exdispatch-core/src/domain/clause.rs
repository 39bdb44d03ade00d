//! Handler clauses - `WHEN a OR b THEN ...` arms of an EXCEPTION section.
//!
//! A [`HandlerClause`] is a set of names it catches; the empty set is
//! `WHEN OTHERS`. [`HandlerClauses`] is the validated, ordered list. An
//! exception may appear in at most one clause, and there is at most one
//! `WHEN OTHERS`; both are checked when the list is built, so dispatch over a
//! `HandlerClauses` never has to break ties.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use super::errors::DispatchError;
use super::ids::ClausePosition;
use super::name::ConditionName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerClause {
    matches: BTreeSet<ConditionName>,

    /// Handler body ends in a bare `RAISE;`.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    reraise: bool,
}

impl HandlerClause {
    /// `WHEN a OR b OR ...`. Repeated names collapse; passing no names gives
    /// a catch-all, same as [`HandlerClause::others`].
    pub fn when<I>(names: I) -> Self
    where
        I: IntoIterator<Item = ConditionName>,
    {
        Self {
            matches: names.into_iter().collect(),
            reraise: false,
        }
    }

    /// `WHEN OTHERS`
    pub fn others() -> Self {
        Self {
            matches: BTreeSet::new(),
            reraise: false,
        }
    }

    /// Parse names first, then build the clause.
    pub fn parse<I, S>(names: I) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(ConditionName::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::when(names))
    }

    pub fn reraising(mut self) -> Self {
        self.reraise = true;
        self
    }

    pub fn is_catch_all(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn reraises(&self) -> bool {
        self.reraise
    }

    pub fn catches(&self, name: &ConditionName) -> bool {
        self.matches.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &ConditionName> {
        self.matches.iter()
    }
}

/// An ordered, validated list of handler clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HandlerClauses {
    clauses: Vec<HandlerClause>,
}

impl HandlerClauses {
    pub fn new<I>(clauses: I) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = HandlerClause>,
    {
        let mut owners: HashMap<ConditionName, usize> = HashMap::new();
        let mut catch_all: Option<usize> = None;
        let mut list = Vec::new();

        for (position, clause) in clauses.into_iter().enumerate() {
            if clause.is_catch_all() {
                if catch_all.is_some() {
                    return Err(DispatchError::DuplicateCatchAll(position));
                }
                catch_all = Some(position);
            }
            for name in clause.names() {
                if owners.insert(name.clone(), position).is_some() {
                    return Err(DispatchError::DuplicateHandler(name.clone()));
                }
            }
            list.push(clause);
        }

        Ok(Self { clauses: list })
    }

    /// An EXCEPTION section with no handlers.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn get(&self, position: ClausePosition) -> Option<&HandlerClause> {
        self.clauses.get(position.get())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClausePosition, &HandlerClause)> {
        self.clauses
            .iter()
            .enumerate()
            .map(|(i, c)| (ClausePosition::new(i), c))
    }

    /// Every name some clause catches.
    pub fn named(&self) -> impl Iterator<Item = &ConditionName> {
        self.clauses.iter().flat_map(HandlerClause::names)
    }
}
