//! Person record, the owning side of the team association.
//!
//! # Responsibility
//! - Carry the inverse foreign key (`team_id`) that team resolution queries
//!   are keyed on.
//!
//! # Invariants
//! - Person is opaque to this crate beyond its identity and team reference;
//!   membership changes are person-side operations only.

use crate::model::team::TeamId;
use serde::{Deserialize, Serialize};

/// Surrogate key assigned by the storage layer on first save.
pub type PersonId = i64;

/// External entity associated with at most one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// `None` until first persistence; immutable once assigned.
    pub id: Option<PersonId>,
    /// Inverse reference back to the owning team, `None` when detached.
    pub team_id: Option<TeamId>,
}

impl Person {
    /// Creates an unsaved, detached person.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unsaved person already referencing `team_id`.
    pub const fn in_team(team_id: TeamId) -> Self {
        Self {
            id: None,
            team_id: Some(team_id),
        }
    }
}
