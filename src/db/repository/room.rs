//! Room Repository

use super::{BaseRepository, Patch, RepoError, RepoResult, record_key};
use crate::db::models::{OccupancyStatus, Room, RoomCreate, RoomUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "room";

#[derive(Clone)]
pub struct RoomRepository {
    base: BaseRepository,
}

impl RoomRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Room>> {
        let rooms: Vec<Room> = self
            .base
            .db()
            .query("SELECT * FROM room ORDER BY number")
            .await?
            .take(0)?;
        Ok(rooms)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Room>> {
        let room: Option<Room> = self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(room)
    }

    pub async fn find_by_number(&self, number: &str) -> RepoResult<Option<Room>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM room WHERE number = $number LIMIT 1")
            .bind(("number", number.to_string()))
            .await?;
        let rooms: Vec<Room> = result.take(0)?;
        Ok(rooms.into_iter().next())
    }

    pub async fn create(&self, data: RoomCreate) -> RepoResult<Room> {
        if self.find_by_number(&data.number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Room '{}' already exists",
                data.number
            )));
        }

        let now = Utc::now();
        let room = Room {
            id: None,
            number: data.number,
            room_type: data.room_type,
            status: OccupancyStatus::Available,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Room> = self.base.db().create(TABLE).content(room).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create room".into()))
    }

    pub async fn update(&self, id: &str, data: RoomUpdate) -> RepoResult<Room> {
        let updated: Option<Room> = self
            .base
            .db()
            .update((TABLE, record_key(TABLE, id)))
            .merge(Patch::new(data))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Room> = self
            .base
            .db()
            .delete((TABLE, record_key(TABLE, id)))
            .await?;
        Ok(deleted.is_some())
    }
}
