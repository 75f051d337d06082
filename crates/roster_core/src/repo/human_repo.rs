//! Human repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `humans` storage.
//! - Flatten the embedded address into the owning row and reassemble it on
//!   load.
//!
//! # Invariants
//! - `create_human` assigns the identifier exactly once, from the storage
//!   layer, and never accepts an already-persisted instance.
//! - The address column group is written and read as a unit; a partially
//!   null group is rejected as invalid data.

use crate::model::human::{Address, Human, HumanId};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const HUMAN_SELECT_SQL: &str = "SELECT
    id,
    name,
    age,
    city,
    street,
    zipcode
FROM humans";

const HUMAN_COLUMNS: &[&str] = &["id", "name", "age", "city", "street", "zipcode"];

/// Repository interface for human records.
pub trait HumanRepository {
    /// Inserts one human and assigns its storage identifier.
    fn create_human(&self, human: &mut Human) -> RepoResult<HumanId>;
    /// Replaces all mutable fields of a persisted human.
    fn update_human(&self, human: &Human) -> RepoResult<()>;
    /// Loads one human by id.
    fn get_human(&self, id: HumanId) -> RepoResult<Option<Human>>;
    /// Lists all humans in identifier order.
    fn list_humans(&self) -> RepoResult<Vec<Human>>;
    /// Deletes one human. No cascades.
    fn delete_human(&self, id: HumanId) -> RepoResult<()>;
}

/// SQLite-backed human repository.
pub struct SqliteHumanRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHumanRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "humans", HUMAN_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl HumanRepository for SqliteHumanRepository<'_> {
    fn create_human(&self, human: &mut Human) -> RepoResult<HumanId> {
        if let Some(id) = human.id {
            return Err(RepoError::AlreadyPersisted {
                entity: "human",
                id,
            });
        }

        self.conn.execute(
            "INSERT INTO humans (name, age, city, street, zipcode)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                human.name.as_str(),
                human.age,
                human.address.as_ref().map(|address| address.city.as_str()),
                human.address.as_ref().map(|address| address.street.as_str()),
                human
                    .address
                    .as_ref()
                    .map(|address| address.zipcode.as_str()),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        human.id = Some(id);
        Ok(id)
    }

    fn update_human(&self, human: &Human) -> RepoResult<()> {
        let id = human.id.ok_or(RepoError::NotPersisted("human"))?;

        let changed = self.conn.execute(
            "UPDATE humans
             SET
                name = ?2,
                age = ?3,
                city = ?4,
                street = ?5,
                zipcode = ?6
             WHERE id = ?1;",
            params![
                id,
                human.name.as_str(),
                human.age,
                human.address.as_ref().map(|address| address.city.as_str()),
                human.address.as_ref().map(|address| address.street.as_str()),
                human
                    .address
                    .as_ref()
                    .map(|address| address.zipcode.as_str()),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::HumanNotFound(id));
        }

        Ok(())
    }

    fn get_human(&self, id: HumanId) -> RepoResult<Option<Human>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HUMAN_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_human_row(row)?));
        }

        Ok(None)
    }

    fn list_humans(&self) -> RepoResult<Vec<Human>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HUMAN_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut humans = Vec::new();
        while let Some(row) = rows.next()? {
            humans.push(parse_human_row(row)?);
        }

        Ok(humans)
    }

    fn delete_human(&self, id: HumanId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM humans WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::HumanNotFound(id));
        }

        Ok(())
    }
}

fn parse_human_row(row: &Row<'_>) -> RepoResult<Human> {
    let city: Option<String> = row.get("city")?;
    let street: Option<String> = row.get("street")?;
    let zipcode: Option<String> = row.get("zipcode")?;

    let address = match (city, street, zipcode) {
        (Some(city), Some(street), Some(zipcode)) => Some(Address {
            city,
            street,
            zipcode,
        }),
        (None, None, None) => None,
        _ => {
            return Err(RepoError::InvalidData(
                "partially stored address column group in humans row".to_string(),
            ));
        }
    };

    Ok(Human {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        age: row.get("age")?,
        address,
    })
}
