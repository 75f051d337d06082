//! Persistent roster data model: humans, teams and their person associations.
//! This crate is the single source of truth for the entity records and the
//! storage layer that persists them.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::human::{Address, Human, HumanId};
pub use model::lazy::LazyList;
pub use model::person::{Person, PersonId};
pub use model::team::{Team, TeamId};
pub use repo::human_repo::{HumanRepository, SqliteHumanRepository};
pub use repo::person_repo::{PersonRepository, SqlitePersonRepository};
pub use repo::team_repo::{SqliteTeamRepository, TeamRepository};
pub use repo::{RepoError, RepoResult};
