//! Food Item Repository

use super::{BaseRepository, Patch, RepoError, RepoResult, record_key};
use crate::db::models::{FoodItem, FoodItemCreate, FoodItemUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "food_item";

#[derive(Clone)]
pub struct FoodItemRepository {
    base: BaseRepository,
}

impl FoodItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all food items, optionally restricted to one category
    pub async fn find_all(&self, category: Option<String>) -> RepoResult<Vec<FoodItem>> {
        let items: Vec<FoodItem> = match category {
            Some(cat) => {
                self.base
                    .db()
                    .query("SELECT * FROM food_item WHERE category = $category ORDER BY name")
                    .bind(("category", cat))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM food_item ORDER BY name")
                    .await?
                    .take(0)?
            }
        };
        Ok(items)
    }

    /// Find food item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<FoodItem>> {
        let item: Option<FoodItem> = self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(item)
    }

    /// Create a new food item
    pub async fn create(&self, data: FoodItemCreate) -> RepoResult<FoodItem> {
        let now = Utc::now();
        let item = FoodItem {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            image_url: data.image_url,
            is_available: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<FoodItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create food item".into()))
    }

    /// Update a food item (partial merge)
    pub async fn update(&self, id: &str, data: FoodItemUpdate) -> RepoResult<FoodItem> {
        let updated: Option<FoodItem> = self
            .base
            .db()
            .update((TABLE, record_key(TABLE, id)))
            .merge(Patch::new(data))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Food item {} not found", id)))
    }

    /// Delete a food item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<FoodItem> = self
            .base
            .db()
            .delete((TABLE, record_key(TABLE, id)))
            .await?;
        Ok(deleted.is_some())
    }
}
