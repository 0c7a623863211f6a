//! Customer Repository

use super::{BaseRepository, Patch, RepoError, RepoResult, record_key};
use crate::db::models::{CartItem, Customer, CustomerCreate, CustomerUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "customer";

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Customer>> {
        let customers: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customer ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(customers)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        let customer: Option<Customer> =
            self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(customer)
    }

    /// Find customer by phone number (the natural lookup key)
    pub async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<Customer>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE phone = $phone LIMIT 1")
            .bind(("phone", phone.to_string()))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        Ok(customers.into_iter().next())
    }

    /// Create a customer with an empty order history and cart
    pub async fn create(&self, data: CustomerCreate) -> RepoResult<Customer> {
        let now = Utc::now();
        let customer = Customer {
            id: None,
            name: data.name,
            phone: data.phone,
            email: data.email,
            ordered_items: vec![],
            assigned_room: None,
            assigned_table: None,
            cart: vec![],
            created_at: now,
            updated_at: now,
        };

        let created: Option<Customer> = self.base.db().create(TABLE).content(customer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".into()))
    }

    /// Update customer profile fields (partial merge)
    pub async fn update(&self, id: &str, data: CustomerUpdate) -> RepoResult<Customer> {
        let updated: Option<Customer> = self
            .base
            .db()
            .update((TABLE, record_key(TABLE, id)))
            .merge(Patch::new(data))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }

    /// Replace the embedded cart snapshot
    pub async fn update_cart(&self, id: &str, items: Vec<CartItem>) -> RepoResult<Customer> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing('customer', $key) SET cart = $cart, updatedAt = $now RETURN AFTER",
            )
            .bind(("key", record_key(TABLE, id).to_string()))
            .bind(("cart", items))
            .bind(("now", Utc::now()))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        customers
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }
}
