//! SQLite-specific helpers: DSN parsing, the PRAGMA whitelist and path handling.

mod dsn;
mod path;
mod pragmas;

pub(crate) use dsn::{is_memory_dsn, parse_sqlite_dsn};
pub use path::absolutize_dsn;
pub(crate) use path::ensure_parent_dir;
pub(crate) use pragmas::Pragmas;
