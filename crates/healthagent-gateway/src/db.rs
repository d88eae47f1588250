//! Session and answer storage.
//!
//! SQLite file by default. When the file cannot be opened the gateway keeps
//! serving from an in-memory database instead of refusing to start; those
//! records are lost on restart.

use chrono::{SecondsFormat, Utc};
use healthagent_core::config::DatabaseConfig;
use healthagent_core::error::{HealthAgentError, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Where records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DbMode {
    Sqlite,
    Memory,
}

impl DbMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbMode::Sqlite => "sqlite",
            DbMode::Memory => "memory",
        }
    }
}

/// Gateway database.
pub struct GatewayDb {
    conn: Mutex<Connection>,
    mode: DbMode,
}

/// Quiz session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    pub id: String,
    pub locale: String,
    pub consent: bool,
    pub started_at: String,
    pub last_activity: String,
    pub finished_at: Option<String>,
}

/// One recorded answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerRecord {
    pub session_id: String,
    pub question_id: i64,
    pub raw_transcript: String,
    pub mapped_option: String,
    pub confidence: f64,
    pub created_at: String,
}

/// Answer to insert.
#[derive(Debug, Clone, Copy)]
pub struct NewAnswer<'a> {
    pub session_id: &'a str,
    pub question_id: i64,
    pub raw_transcript: &'a str,
    pub mapped_option: &'a str,
    pub confidence: f64,
}

fn now() -> String {
    // Fixed-width UTC so string order is time order.
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn db_err(context: &str) -> impl Fn(rusqlite::Error) -> HealthAgentError + '_ {
    move |e| HealthAgentError::Database(format!("{context}: {e}"))
}

impl GatewayDb {
    /// Open or create the database file.
    pub fn open(path: &Path) -> Result<Self> {
        if path == Path::new(":memory:") {
            return Self::in_memory();
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(db_err("Gateway DB open error"))?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL;").ok();

        Self::init(conn, DbMode::Sqlite)
    }

    /// Volatile database, used as the fallback.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_err("In-memory DB open error"))?;
        Self::init(conn, DbMode::Memory)
    }

    /// Open the configured database, falling back to memory when allowed.
    pub fn open_with_fallback(config: &DatabaseConfig) -> Result<Self> {
        let path = config.resolved_path();
        match Self::open(&path) {
            Ok(db) => {
                tracing::info!("Session DB ready: {} ({})", path.display(), db.mode.as_str());
                Ok(db)
            }
            Err(e) if config.memory_fallback => {
                tracing::warn!("Session DB unavailable ({e}), falling back to in-memory store");
                Self::in_memory()
            }
            Err(e) => Err(e),
        }
    }

    fn init(conn: Connection, mode: DbMode) -> Result<Self> {
        let db = Self {
            conn: Mutex::new(conn),
            mode,
        };
        db.migrate()?;
        Ok(db)
    }

    /// Run schema migrations.
    fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                locale TEXT NOT NULL DEFAULT 'en-US',
                consent INTEGER NOT NULL DEFAULT 1,
                started_at TEXT NOT NULL,
                last_activity TEXT NOT NULL,
                finished_at TEXT
            );

            CREATE TABLE IF NOT EXISTS answers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                question_id INTEGER NOT NULL,
                raw_transcript TEXT NOT NULL DEFAULT '',
                mapped_option TEXT NOT NULL DEFAULT '',
                confidence REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_answers_session ON answers(session_id, created_at);
        ",
        )
        .map_err(db_err("Migration error"))?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| HealthAgentError::Database(format!("Lock: {e}")))
    }

    pub fn mode(&self) -> DbMode {
        self.mode
    }

    /// Cheap liveness probe.
    pub fn ping(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |r| r.get::<_, i64>(0))
            .map_err(db_err("Ping"))?;
        Ok(())
    }

    // ── Sessions ──────────────────────────────

    /// Create a session and return its id.
    pub fn create_session(&self, locale: &str, consent: bool) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let ts = now();
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO sessions (id, locale, consent, started_at, last_activity) VALUES (?1, ?2, ?3, ?4, ?4)",
            params![id, locale, consent, ts],
        )
        .map_err(db_err("Create session"))?;
        Ok(id)
    }

    /// Get a single session.
    pub fn get_session(&self, id: &str) -> Result<Option<SessionRecord>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, locale, consent, started_at, last_activity, finished_at FROM sessions WHERE id=?1",
            params![id],
            |row| {
                Ok(SessionRecord {
                    id: row.get(0)?,
                    locale: row.get(1)?,
                    consent: row.get::<_, i32>(2)? != 0,
                    started_at: row.get(3)?,
                    last_activity: row.get(4)?,
                    finished_at: row.get(5)?,
                })
            },
        )
        .optional()
        .map_err(db_err("Get session"))
    }

    /// Bump `last_activity`. Returns false when the session is unknown.
    pub fn touch_session(&self, id: &str) -> Result<bool> {
        let conn = self.lock()?;
        let n = conn
            .execute(
                "UPDATE sessions SET last_activity=?1 WHERE id=?2",
                params![now(), id],
            )
            .map_err(db_err("Touch session"))?;
        Ok(n > 0)
    }

    /// Stamp `finished_at`. Returns false when the session is unknown.
    pub fn finish_session(&self, id: &str) -> Result<bool> {
        let conn = self.lock()?;
        let n = conn
            .execute(
                "UPDATE sessions SET finished_at=?1 WHERE id=?2",
                params![now(), id],
            )
            .map_err(db_err("Finish session"))?;
        Ok(n > 0)
    }

    // ── Answers ──────────────────────────────

    /// Store an answer. The session does not have to exist.
    pub fn record_answer(&self, answer: NewAnswer<'_>) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO answers (session_id, question_id, raw_transcript, mapped_option, confidence, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                answer.session_id,
                answer.question_id,
                answer.raw_transcript,
                answer.mapped_option,
                answer.confidence,
                now(),
            ],
        )
        .map_err(db_err("Record answer"))?;
        Ok(())
    }

    /// Answers for a session, oldest first.
    pub fn list_answers(&self, session_id: &str) -> Result<Vec<AnswerRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT session_id, question_id, raw_transcript, mapped_option, confidence, created_at
                 FROM answers WHERE session_id=?1 ORDER BY created_at, id",
            )
            .map_err(db_err("Prepare"))?;

        let answers = stmt
            .query_map(params![session_id], |row| {
                Ok(AnswerRecord {
                    session_id: row.get(0)?,
                    question_id: row.get(1)?,
                    raw_transcript: row.get(2)?,
                    mapped_option: row.get(3)?,
                    confidence: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })
            .map_err(db_err("Query"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(db_err("Read answer"))?;
        Ok(answers)
    }
}
