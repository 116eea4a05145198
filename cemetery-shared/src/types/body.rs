use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{BodyId, Gender};

/// A body that can be buried in at most one grave.
///
/// The grave a body rests in is not part of this struct: it is owned by the
/// store and changed only through the cemetery operations, never through a
/// plain body update.
///
/// Equality is identity based. Two bodies are equal when both carry the same
/// store-assigned id; a body without an id is not equal to anything, itself
/// included. Use [`Body::same_fields_as`] to compare field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Body {
    pub id: Option<BodyId>,
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub born: Option<NaiveDate>,
    pub died: Option<NaiveDate>,
    pub vampire: bool,
}

impl Body {
    /// Creates an unpersisted body with the required attributes set.
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: Some(name.into()),
            gender: Some(gender),
            ..Self::default()
        }
    }

    pub fn with_born(mut self, born: NaiveDate) -> Self {
        self.born = Some(born);
        self
    }

    pub fn with_died(mut self, died: NaiveDate) -> Self {
        self.died = Some(died);
        self
    }

    pub fn with_vampire(mut self, vampire: bool) -> Self {
        self.vampire = vampire;
        self
    }

    /// Compares every attribute, including the id.
    pub fn same_fields_as(&self, other: &Body) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.gender == other.gender
            && self.born == other.born
            && self.died == other.died
            && self.vampire == other.vampire
    }
}

impl PartialEq for Body {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Body{{id={}}}", id),
            None => write!(f, "Body{{id=null}}"),
        }
    }
}
