//! DDL for the `users` table.

use db::Database;

/// `AUTOINCREMENT` keeps ids from being reused after deletes.
pub const CREATE_USERS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    address TEXT NOT NULL,
    country TEXT NOT NULL
)";

/// Create the table if it does not exist. Existing tables are left untouched.
pub async fn ensure_users_table(db: &Database) -> db::Result<()> {
    tracing::debug!(path = %db.path().display(), "Ensuring users table");
    db.bootstrap(&[CREATE_USERS_TABLE]).await
}
