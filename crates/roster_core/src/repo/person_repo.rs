//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the owning side of the team association: all membership
//!   changes go through person-side operations.
//! - Provide the resolution query that team repositories are keyed on.
//!
//! # Invariants
//! - `persons.team_id` is the single source of truth for membership.
//! - A dangling team reference is rejected by the storage layer's foreign
//!   key, not by this crate.
//! - Team-scoped listings are deterministic: `id ASC`.

use crate::model::person::{Person, PersonId};
use crate::model::team::TeamId;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const PERSON_SELECT_SQL: &str = "SELECT
    id,
    team_id
FROM persons";

pub(crate) const PERSON_COLUMNS: &[&str] = &["id", "team_id"];

/// Repository interface for person records.
pub trait PersonRepository {
    /// Inserts one person and assigns its storage identifier.
    fn create_person(&self, person: &mut Person) -> RepoResult<PersonId>;
    /// Loads one person by id.
    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>>;
    /// Moves one person into a team, or detaches it with `None`.
    fn assign_team(&self, person_id: PersonId, team_id: Option<TeamId>) -> RepoResult<()>;
    /// Lists the people of one team in identifier order.
    fn list_by_team(&self, team_id: TeamId) -> RepoResult<Vec<Person>>;
    /// Deletes one person.
    fn delete_person(&self, id: PersonId) -> RepoResult<()>;
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "persons", PERSON_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn create_person(&self, person: &mut Person) -> RepoResult<PersonId> {
        if let Some(id) = person.id {
            return Err(RepoError::AlreadyPersisted {
                entity: "person",
                id,
            });
        }

        self.conn.execute(
            "INSERT INTO persons (team_id) VALUES (?1);",
            params![person.team_id],
        )?;

        let id = self.conn.last_insert_rowid();
        person.id = Some(id);
        Ok(id)
    }

    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PERSON_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_person_row(row)?));
        }

        Ok(None)
    }

    fn assign_team(&self, person_id: PersonId, team_id: Option<TeamId>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE persons SET team_id = ?2 WHERE id = ?1;",
            params![person_id, team_id],
        )?;

        if changed == 0 {
            return Err(RepoError::PersonNotFound(person_id));
        }

        Ok(())
    }

    fn list_by_team(&self, team_id: TeamId) -> RepoResult<Vec<Person>> {
        select_people_of_team(self.conn, team_id)
    }

    fn delete_person(&self, id: PersonId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM persons WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::PersonNotFound(id));
        }

        Ok(())
    }
}

/// Resolution query for a team's person list, keyed on the inverse foreign
/// key. Shared with the team repository's on-demand loading.
pub(crate) fn select_people_of_team(
    conn: &Connection,
    team_id: TeamId,
) -> RepoResult<Vec<Person>> {
    let mut stmt = conn.prepare(&format!(
        "{PERSON_SELECT_SQL}
         WHERE team_id = ?1
         ORDER BY id ASC;"
    ))?;

    let mut rows = stmt.query([team_id])?;
    let mut people = Vec::new();
    while let Some(row) = rows.next()? {
        people.push(parse_person_row(row)?);
    }

    Ok(people)
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    Ok(Person {
        id: Some(row.get("id")?),
        team_id: row.get("team_id")?,
    })
}
