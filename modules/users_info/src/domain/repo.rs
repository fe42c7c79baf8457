use crate::contract::model::{NewUser, User, UserUpdate};
use async_trait::async_trait;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// All users in storage order.
    async fn list(&self) -> anyhow::Result<Vec<User>>;
    /// Load a user by id.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    /// Insert a user and return the id assigned by storage.
    async fn insert(&self, new_user: &NewUser) -> anyhow::Result<i64>;
    /// Replace all five fields of `update.user_id`. Returns rows affected.
    async fn update(&self, update: &UserUpdate) -> anyhow::Result<u64>;
    /// Delete by id. Returns rows affected.
    async fn delete(&self, id: i64) -> anyhow::Result<u64>;
}
