//! Team domain model with its lazily resolved person list.
//!
//! # Responsibility
//! - Define the team record and the inverse side of the person association.
//!
//! # Invariants
//! - `people` is never absent: loaded-and-empty at construction, `NotLoaded`
//!   after materialization until a repository resolves it.
//! - The team side never persists membership; the foreign key lives on the
//!   person record.

use crate::model::lazy::LazyList;
use crate::model::person::Person;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Surrogate key assigned by the storage layer on first save.
pub type TeamId = i64;

/// Named group of person records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// `None` until first persistence; immutable once assigned.
    pub id: Option<TeamId>,
    pub name: String,
    /// Inverse side of the association. Resolved on demand by the team
    /// repository; local edits here are never written back.
    pub people: LazyList<Person>,
}

impl Team {
    /// Creates an unsaved team with an empty, already-resolved person list.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            people: LazyList::empty(),
        }
    }
}

/// Diagnostic representation of whatever is present at call time.
///
/// An unresolved person list prints as a marker instead of triggering a
/// fetch; resolution stays an explicit repository operation.
impl Display for Team {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team(id=")?;
        match self.id {
            Some(id) => write!(f, "{id}")?,
            None => write!(f, "unsaved")?,
        }
        write!(f, ", name={}, people=", self.name)?;
        match self.people.as_slice() {
            None => write!(f, "<not loaded>")?,
            Some(people) => {
                write!(f, "[")?;
                for (index, person) in people.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    match person.id {
                        Some(id) => write!(f, "{id}")?,
                        None => write!(f, "unsaved")?,
                    }
                }
                write!(f, "]")?;
            }
        }
        write!(f, ")")
    }
}
