mod schema;
mod store;

pub use store::*;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::models::*;

/// SQLite-backed [`RetrospectiveStore`].
///
/// Cloning is cheap: clones share one connection.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "retro-board")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("retro-board.db"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn query_page(
        &self,
        date: Option<NaiveDate>,
        request: PageRequest,
    ) -> Result<Page<Retrospective>, StoreError> {
        let conn = self.lock()?;
        let date = date.map(|d| d.to_string());

        let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM retrospectives WHERE (?1 IS NULL OR date = ?1)",
            [&date],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(
            "SELECT id, name, summary, date, participants
             FROM retrospectives WHERE (?1 IS NULL OR date = ?1)
             ORDER BY rowid LIMIT ?2 OFFSET ?3",
        )?;
        let rows = stmt
            .query_map(
                (
                    &date,
                    i64::from(request.page_size),
                    to_sql_int(request.offset())?,
                ),
                RetrospectiveRow::from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        let content = rows
            .into_iter()
            .map(|row| row.into_model(&conn))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, request, total.max(0) as u64))
    }
}

impl RetrospectiveStore for Database {
    fn find_by_name(&self, name: &str) -> Result<Option<Retrospective>, StoreError> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, name, summary, date, participants
                 FROM retrospectives WHERE name = ?",
                [name],
                RetrospectiveRow::from_row,
            )
            .optional()?;

        row.map(|row| row.into_model(&conn)).transpose()
    }

    fn find_all(&self, request: PageRequest) -> Result<Page<Retrospective>, StoreError> {
        self.query_page(None, request)
    }

    fn find_by_date(
        &self,
        date: NaiveDate,
        request: PageRequest,
    ) -> Result<Page<Retrospective>, StoreError> {
        self.query_page(Some(date), request)
    }

    fn save(&self, mut retrospective: Retrospective) -> Result<Retrospective, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let id = *retrospective.id.get_or_insert_with(Uuid::new_v4);
        let now = Utc::now().to_rfc3339();

        tx.execute(
            "INSERT INTO retrospectives (id, name, summary, date, participants, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                summary = excluded.summary,
                date = excluded.date,
                participants = excluded.participants,
                updated_at = excluded.updated_at",
            (
                id.to_string(),
                &retrospective.name,
                &retrospective.summary,
                retrospective.date.to_string(),
                serde_json::to_string(&retrospective.participants)?,
                &now,
            ),
        )
        .map_err(|e| unique_violation(e, &retrospective.name))?;

        // The feedback collection is owned: rewrite it wholesale in order.
        tx.execute(
            "DELETE FROM feedback_items WHERE retrospective_id = ?",
            [id.to_string()],
        )?;

        {
            let mut insert = tx.prepare(
                "INSERT INTO feedback_items (id, retrospective_id, position, name, body, feedback_type)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )?;
            for (position, item) in retrospective.feedback_items.iter_mut().enumerate() {
                let item_id = *item.id.get_or_insert_with(Uuid::new_v4);
                insert.execute((
                    item_id.to_string(),
                    id.to_string(),
                    to_sql_int(position as u64)?,
                    &item.name,
                    &item.body,
                    item.feedback_type.as_str(),
                ))?;
            }
        }

        tx.commit()?;

        tracing::debug!(
            retrospective = %retrospective.name,
            feedback_items = retrospective.feedback_items.len(),
            "Saved retrospective"
        );

        Ok(retrospective)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

/// Raw `retrospectives` row, read before the owned feedback items are loaded.
struct RetrospectiveRow {
    id: String,
    name: String,
    summary: Option<String>,
    date: String,
    participants: String,
}

impl RetrospectiveRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            summary: row.get(2)?,
            date: row.get(3)?,
            participants: row.get(4)?,
        })
    }

    fn into_model(self, conn: &Connection) -> Result<Retrospective, StoreError> {
        let id = parse_uuid(&self.id)?;
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| StoreError::Corrupt(format!("date '{}': {}", self.date, e)))?;

        Ok(Retrospective {
            id: Some(id),
            name: self.name,
            summary: self.summary,
            date,
            participants: serde_json::from_str(&self.participants)?,
            feedback_items: load_feedback_items(conn, id)?,
        })
    }
}

fn load_feedback_items(
    conn: &Connection,
    retrospective_id: Uuid,
) -> Result<Vec<FeedbackItem>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, body, feedback_type
         FROM feedback_items WHERE retrospective_id = ? ORDER BY position",
    )?;

    let rows = stmt
        .query_map([retrospective_id.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, name, body, feedback_type)| {
            let feedback_type = FeedbackType::from_str(&feedback_type).ok_or_else(|| {
                StoreError::Corrupt(format!("feedback type '{}'", feedback_type))
            })?;
            Ok(FeedbackItem {
                id: Some(parse_uuid(&id)?),
                name,
                body,
                feedback_type,
            })
        })
        .collect()
}

fn parse_uuid(s: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(s).map_err(|e| StoreError::Corrupt(format!("id '{}': {}", s, e)))
}

fn to_sql_int(value: u64) -> Result<i64, StoreError> {
    i64::try_from(value)
        .map_err(|_| StoreError::Corrupt(format!("{} exceeds SQLite integer range", value)))
}

fn unique_violation(err: rusqlite::Error, name: &str) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            StoreError::DuplicateName(name.to_string())
        }
        _ => StoreError::Sqlite(err),
    }
}
