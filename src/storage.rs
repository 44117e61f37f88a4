/**
 * Key-value storage for state that should survive between games.
 *
 * Version: November 2025
 */
use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::common::{QuizError, Result};


/// A string-to-string store. Either operation may fail, e.g. because the disk is full
/// or the database is locked; callers decide how much a failure matters.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}


/// Storage that only lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}


impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage { values: HashMap::new() }
    }
}


impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}


/// Storage backed by a single table in a SQLite database.
pub struct SqliteStorage {
    connection: Connection,
}


impl SqliteStorage {
    pub fn open(path: &Path) -> Result<Self> {
        let connection = Connection::open(path).map_err(QuizError::Sql)?;
        SqliteStorage::init(connection)
    }

    pub fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(QuizError::Sql)?;
        SqliteStorage::init(connection)
    }

    fn init(connection: Connection) -> Result<Self> {
        connection
            .execute(
                "
            CREATE TABLE IF NOT EXISTS storage(
              key TEXT NOT NULL PRIMARY KEY CHECK(key != ''),
              value TEXT NOT NULL,
              updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
                [],
            )
            .map_err(QuizError::Sql)?;
        Ok(SqliteStorage { connection })
    }
}


impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(QuizError::Sql)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.connection
            .execute(
                "
            INSERT OR REPLACE INTO
              storage(key, value)
            VALUES
              (?1, ?2)
            ",
                params![key, value],
            )
            .map_err(QuizError::Sql)?;
        Ok(())
    }
}
