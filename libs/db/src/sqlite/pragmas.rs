//! Whitelisted SQLite PRAGMAs taken from DSN query parameters.

use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum JournalMode {
    Delete,
    Wal,
    Memory,
    Truncate,
    Persist,
    Off,
}

impl JournalMode {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "DELETE" => Some(Self::Delete),
            "WAL" => Some(Self::Wal),
            "MEMORY" => Some(Self::Memory),
            "TRUNCATE" => Some(Self::Truncate),
            "PERSIST" => Some(Self::Persist),
            "OFF" => Some(Self::Off),
            _ => None,
        }
    }

    fn to_sqlx(self) -> SqliteJournalMode {
        match self {
            Self::Delete => SqliteJournalMode::Delete,
            Self::Wal => SqliteJournalMode::Wal,
            Self::Memory => SqliteJournalMode::Memory,
            Self::Truncate => SqliteJournalMode::Truncate,
            Self::Persist => SqliteJournalMode::Persist,
            Self::Off => SqliteJournalMode::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SyncMode {
    Off,
    Normal,
    Full,
    Extra,
}

impl SyncMode {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "OFF" => Some(Self::Off),
            "NORMAL" => Some(Self::Normal),
            "FULL" => Some(Self::Full),
            "EXTRA" => Some(Self::Extra),
            _ => None,
        }
    }

    fn to_sqlx(self) -> SqliteSynchronous {
        match self {
            Self::Off => SqliteSynchronous::Off,
            Self::Normal => SqliteSynchronous::Normal,
            Self::Full => SqliteSynchronous::Full,
            Self::Extra => SqliteSynchronous::Extra,
        }
    }
}

/// PRAGMA settings applied to every new connection.
///
/// Anything left `None` keeps the SQLite default (rollback journal, FULL sync).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Pragmas {
    pub journal_mode: Option<JournalMode>,
    pub synchronous: Option<SyncMode>,
    pub busy_timeout: Option<Duration>,
    /// Legacy `wal=true|false|1|0`; an explicit `journal_mode` wins.
    pub wal_toggle: Option<bool>,
}

impl Pragmas {
    /// Build from `(key, value)` pairs; invalid values are logged and skipped.
    pub(crate) fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut pragmas = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "journal_mode" => match JournalMode::parse(value) {
                    Some(mode) => pragmas.journal_mode = Some(mode),
                    None => tracing::warn!("Invalid 'journal_mode' PRAGMA value '{}', ignoring", value),
                },
                "synchronous" => match SyncMode::parse(value) {
                    Some(mode) => pragmas.synchronous = Some(mode),
                    None => tracing::warn!("Invalid 'synchronous' PRAGMA value '{}', ignoring", value),
                },
                "busy_timeout" => match value.parse::<u64>() {
                    Ok(ms) => pragmas.busy_timeout = Some(Duration::from_millis(ms)),
                    Err(_) => {
                        tracing::warn!("Invalid 'busy_timeout' PRAGMA value '{}', ignoring", value)
                    }
                },
                "wal" => match value.to_ascii_lowercase().as_str() {
                    "true" | "1" => pragmas.wal_toggle = Some(true),
                    "false" | "0" => pragmas.wal_toggle = Some(false),
                    _ => tracing::warn!("Invalid 'wal' PRAGMA value '{}', ignoring", value),
                },
                other => tracing::debug!("Unknown SQLite PRAGMA parameter: {}", other),
            }
        }

        pragmas
    }

    /// Journal mode after resolving the legacy `wal` toggle.
    pub(crate) fn effective_journal_mode(&self) -> Option<JournalMode> {
        self.journal_mode.or(match self.wal_toggle {
            Some(true) => Some(JournalMode::Wal),
            Some(false) => Some(JournalMode::Delete),
            None => None,
        })
    }

    pub(crate) fn apply(&self, mut options: SqliteConnectOptions) -> SqliteConnectOptions {
        if let Some(mode) = self.effective_journal_mode() {
            options = options.journal_mode(mode.to_sqlx());
        }
        if let Some(mode) = self.synchronous {
            options = options.synchronous(mode.to_sqlx());
        }
        if let Some(timeout) = self.busy_timeout {
            options = options.busy_timeout(timeout);
        }
        options
    }
}
