//! SQLite access for the users listing.
//!
//! The service never writes rows; it only makes sure the table exists so a
//! fresh database answers with an empty list.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

use crate::dto::User;

/// Opens the database at `path`, creating the `users` table if needed.
pub fn init_db(path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).context("failed to create db directory")?;
    }
    let conn = Connection::open(path).context("failed to open database")?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            email TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );"
    ).context("failed to create users table")?;
    info!("Database initialized at {}", path);
    Ok(conn)
}

/// Lists every user, ordered by id.
pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn
        .prepare("SELECT id, name, email, created_at, updated_at FROM users ORDER BY id")
        .context("failed to prepare users query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            })
        })
        .context("failed to query users")?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to read user row")
}
