//! Dining Table Repository

use super::{BaseRepository, Patch, RepoError, RepoResult, record_key};
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate, OccupancyStatus};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table ORDER BY number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let table: Option<DiningTable> =
            self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(table)
    }

    pub async fn find_by_number(&self, number: &str) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE number = $number LIMIT 1")
            .bind(("number", number.to_string()))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        if self.find_by_number(&data.number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                data.number
            )));
        }

        let now = Utc::now();
        let table = DiningTable {
            id: None,
            number: data.number,
            capacity: data.capacity.unwrap_or(0),
            status: OccupancyStatus::Available,
            created_at: now,
            updated_at: now,
        };

        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create table".into()))
    }

    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let updated: Option<DiningTable> = self
            .base
            .db()
            .update((TABLE, record_key(TABLE, id)))
            .merge(Patch::new(data))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<DiningTable> = self
            .base
            .db()
            .delete((TABLE, record_key(TABLE, id)))
            .await?;
        Ok(deleted.is_some())
    }
}
