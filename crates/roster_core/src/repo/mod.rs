//! Repository layer: storage contracts and SQLite implementations.
//!
//! # Responsibility
//! - Own identifier assignment, row mapping and association resolution for
//!   the roster entities.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Identifiers are assigned exactly once, on first save.
//! - Repositories return semantic errors (`*NotFound`, `AlreadyPersisted`)
//!   in addition to DB transport errors.
//! - Repositories refuse to run against unmigrated connections.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::human::HumanId;
use crate::model::person::PersonId;
use crate::model::team::TeamId;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod human_repo;
pub mod person_repo;
pub mod team_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors raised by the storage layer.
///
/// The entities themselves have no validation; apart from the semantic
/// variants below, whatever SQLite raises is surfaced unmodified as `Db`.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target human row does not exist.
    HumanNotFound(HumanId),
    /// Target team row does not exist.
    TeamNotFound(TeamId),
    /// Target person row does not exist.
    PersonNotFound(PersonId),
    /// First save was attempted on an instance that already has an identifier.
    AlreadyPersisted { entity: &'static str, id: i64 },
    /// Operation requires a persisted instance but the identifier is unset.
    NotPersisted(&'static str),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid in-memory record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::HumanNotFound(id) => write!(f, "human not found: {id}"),
            Self::TeamNotFound(id) => write!(f, "team not found: {id}"),
            Self::PersonNotFound(id) => write!(f, "person not found: {id}"),
            Self::AlreadyPersisted { entity, id } => {
                write!(f, "{entity} already persisted with id {id}")
            }
            Self::NotPersisted(entity) => {
                write!(f, "{entity} has no identifier; it was never persisted")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Verifies the connection is migrated and carries the expected shape.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
