//! Team repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `teams` storage.
//! - Resolve the lazy person list on demand, keyed on the inverse foreign
//!   key held by person records.
//!
//! # Invariants
//! - Materialized teams carry a `NotLoaded` person list until `load_people`
//!   resolves it.
//! - The team side never writes membership: `update_team` touches the name
//!   only, and deleting a team detaches its people via the schema.
//! - Resolution order is deterministic: `id ASC`.

use crate::model::lazy::LazyList;
use crate::model::team::{Team, TeamId};
use crate::repo::person_repo::{select_people_of_team, PERSON_COLUMNS};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const TEAM_SELECT_SQL: &str = "SELECT
    id,
    name
FROM teams";

const TEAM_COLUMNS: &[&str] = &["id", "name"];

/// Repository interface for team records.
pub trait TeamRepository {
    /// Inserts one team and assigns its storage identifier. The in-memory
    /// person list is left untouched; it is never persisted from this side.
    fn create_team(&self, team: &mut Team) -> RepoResult<TeamId>;
    /// Renames a persisted team. Membership is not writable from here.
    fn update_team(&self, team: &Team) -> RepoResult<()>;
    /// Loads one team by id, with its person list unresolved.
    fn get_team(&self, id: TeamId) -> RepoResult<Option<Team>>;
    /// Lists all teams in identifier order, person lists unresolved.
    fn list_teams(&self) -> RepoResult<Vec<Team>>;
    /// Resolves the person list on demand.
    ///
    /// No fetch happens for an unsaved team (its local list stands) or for
    /// a list that is already resolved.
    fn load_people(&self, team: &mut Team) -> RepoResult<()>;
    /// Deletes one team. Associated people are detached, not deleted.
    fn delete_team(&self, id: TeamId) -> RepoResult<()>;
}

/// SQLite-backed team repository.
pub struct SqliteTeamRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTeamRepository<'conn> {
    /// Creates a repository from a migrated connection.
    ///
    /// Checks the `persons` table as well: resolution queries run against it.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "teams", TEAM_COLUMNS)?;
        ensure_connection_ready(conn, "persons", PERSON_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TeamRepository for SqliteTeamRepository<'_> {
    fn create_team(&self, team: &mut Team) -> RepoResult<TeamId> {
        if let Some(id) = team.id {
            return Err(RepoError::AlreadyPersisted { entity: "team", id });
        }

        self.conn.execute(
            "INSERT INTO teams (name) VALUES (?1);",
            params![team.name.as_str()],
        )?;

        let id = self.conn.last_insert_rowid();
        team.id = Some(id);
        Ok(id)
    }

    fn update_team(&self, team: &Team) -> RepoResult<()> {
        let id = team.id.ok_or(RepoError::NotPersisted("team"))?;

        let changed = self.conn.execute(
            "UPDATE teams SET name = ?2 WHERE id = ?1;",
            params![id, team.name.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::TeamNotFound(id));
        }

        Ok(())
    }

    fn get_team(&self, id: TeamId) -> RepoResult<Option<Team>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEAM_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_team_row(row)?));
        }

        Ok(None)
    }

    fn list_teams(&self) -> RepoResult<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEAM_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut teams = Vec::new();
        while let Some(row) = rows.next()? {
            teams.push(parse_team_row(row)?);
        }

        Ok(teams)
    }

    fn load_people(&self, team: &mut Team) -> RepoResult<()> {
        // An unsaved team has nothing at rest; its local list stands as-is.
        let Some(team_id) = team.id else {
            return Ok(());
        };

        if team.people.is_loaded() {
            return Ok(());
        }

        let people = select_people_of_team(self.conn, team_id)?;
        team.people.set_loaded(people);
        Ok(())
    }

    fn delete_team(&self, id: TeamId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM teams WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::TeamNotFound(id));
        }

        Ok(())
    }
}

fn parse_team_row(row: &Row<'_>) -> RepoResult<Team> {
    Ok(Team {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        people: LazyList::not_loaded(),
    })
}
