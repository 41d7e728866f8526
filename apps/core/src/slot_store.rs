use rusqlite::{params, Connection, OptionalExtension};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to create storage dir: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode slot value: {0}")]
    Encode(#[from] serde_json::Error),
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS slot (key TEXT PRIMARY KEY, value TEXT NOT NULL)";

pub fn open_memory() -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open_in_memory()?;
    conn.execute(SCHEMA, [])?;
    Ok(conn)
}

pub fn open_from_config(cfg: &Config) -> Result<Connection, StoreError> {
    if let Some(parent) = cfg.storage_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(&cfg.storage_path)?;
    conn.execute(SCHEMA, [])?;
    Ok(conn)
}

pub fn read_slot(db: &Connection, key: &str) -> Result<Option<String>, rusqlite::Error> {
    db.query_row("SELECT value FROM slot WHERE key = ?1", params![key], |row| {
        row.get(0)
    })
    .optional()
}

pub fn write_slot(db: &Connection, key: &str, value: &str) -> Result<(), rusqlite::Error> {
    db.execute(
        "INSERT INTO slot (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}
