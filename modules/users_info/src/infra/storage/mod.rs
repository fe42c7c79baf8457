pub mod entity;
pub mod schema;
pub mod sqlite_repo;

pub use schema::ensure_users_table;
pub use sqlite_repo::SqliteUsersRepository;
