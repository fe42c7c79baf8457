//! sqlx-backed repository implementation for the domain port.
//!
//! Every call acquires its own connection from [`Database`], runs exactly one
//! statement and releases the connection before returning, on success and on
//! failure alike. Mutations run inside a transaction that is committed on
//! success and rolled back on failure.

use anyhow::Context;
use db::{Database, DbConn};
use sqlx::{Sqlite, Transaction};

use crate::contract::model::{NewUser, User, UserUpdate};
use crate::domain::repo::UsersRepository;
use crate::infra::storage::entity::UserRow;

const SELECT_ALL: &str =
    "SELECT user_id, name, email, phone, address, country FROM users ORDER BY user_id";
const SELECT_BY_ID: &str =
    "SELECT user_id, name, email, phone, address, country FROM users WHERE user_id = ?";
const INSERT: &str =
    "INSERT INTO users (name, email, phone, address, country) VALUES (?, ?, ?, ?, ?)";
const UPDATE: &str = "UPDATE users SET name = ?, email = ?, phone = ?, address = ?, country = ? \
                      WHERE user_id = ?";
const DELETE: &str = "DELETE FROM users WHERE user_id = ?";

pub struct SqliteUsersRepository {
    db: Database,
}

impl SqliteUsersRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn acquire(&self) -> anyhow::Result<DbConn> {
        self.db.acquire().await.context("failed to open connection")
    }
}

/// Release `conn`, then hand back `result`.
async fn finish<T>(conn: DbConn, result: anyhow::Result<T>) -> anyhow::Result<T> {
    after_release(conn.release().await, result)
}

/// A close failure is only logged: by then a mutation is already committed
/// and its outcome must still be reported.
fn after_release<T>(released: db::Result<()>, result: anyhow::Result<T>) -> anyhow::Result<T> {
    if let Err(e) = released {
        tracing::warn!("failed to release connection: {}", e);
    }
    result
}

/// Commit on success, roll back on failure.
async fn settle<T>(
    tx: Transaction<'_, Sqlite>,
    result: Result<T, sqlx::Error>,
    what: &'static str,
) -> anyhow::Result<T> {
    match result {
        Ok(value) => {
            tx.commit().await.context("commit failed")?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rb) = tx.rollback().await {
                tracing::warn!("rollback after failed {} also failed: {}", what, rb);
            }
            Err(anyhow::Error::new(e).context(format!("{what} failed")))
        }
    }
}

async fn insert_in(conn: &mut DbConn, u: &NewUser) -> anyhow::Result<i64> {
    let mut tx = conn.begin().await.context("begin failed")?;
    let result = sqlx::query(INSERT)
        .bind(u.name.as_deref())
        .bind(u.email.as_deref())
        .bind(u.phone.as_deref())
        .bind(u.address.as_deref())
        .bind(u.country.as_deref())
        .execute(&mut *tx)
        .await
        .map(|done| done.last_insert_rowid());
    settle(tx, result, "insert").await
}

async fn update_in(conn: &mut DbConn, u: &UserUpdate) -> anyhow::Result<u64> {
    let mut tx = conn.begin().await.context("begin failed")?;
    let f = &u.fields;
    let result = sqlx::query(UPDATE)
        .bind(f.name.as_deref())
        .bind(f.email.as_deref())
        .bind(f.phone.as_deref())
        .bind(f.address.as_deref())
        .bind(f.country.as_deref())
        .bind(u.user_id)
        .execute(&mut *tx)
        .await
        .map(|done| done.rows_affected());
    settle(tx, result, "update").await
}

async fn delete_in(conn: &mut DbConn, id: i64) -> anyhow::Result<u64> {
    let mut tx = conn.begin().await.context("begin failed")?;
    let result = sqlx::query(DELETE)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map(|done| done.rows_affected());
    settle(tx, result, "delete").await
}

#[async_trait::async_trait]
impl UsersRepository for SqliteUsersRepository {
    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query_as::<_, UserRow>(SELECT_ALL)
            .fetch_all(&mut *conn)
            .await
            .context("list failed");
        let rows = finish(conn, result).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query_as::<_, UserRow>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .context("find_by_id failed");
        Ok(finish(conn, result).await?.map(Into::into))
    }

    async fn insert(&self, new_user: &NewUser) -> anyhow::Result<i64> {
        let mut conn = self.acquire().await?;
        let result = insert_in(&mut conn, new_user).await;
        finish(conn, result).await
    }

    async fn update(&self, update: &UserUpdate) -> anyhow::Result<u64> {
        let mut conn = self.acquire().await?;
        let result = update_in(&mut conn, update).await;
        finish(conn, result).await
    }

    async fn delete(&self, id: i64) -> anyhow::Result<u64> {
        let mut conn = self.acquire().await?;
        let result = delete_in(&mut conn, id).await;
        finish(conn, result).await
    }
}
