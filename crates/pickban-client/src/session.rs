// Local session persistence: remembers which lobby this client is in, under
// which role and name, so a restart re-enters the same lobby.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use tracing::{info, warn};

use crate::config::Config;
use crate::lobby::Role;

const LOBBY_CODE_KEY: &str = "lobbyCode";
const ROLE_KEY: &str = "role";
const PLAYER_NAME_KEY: &str = "playerName";

/// The persisted triple. All three are present or none are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub lobby_code: String,
    pub role: Role,
    pub player_name: String,
}

/// SQLite-backed key/value store for the local session.
pub struct SessionStore {
    conn: Mutex<Connection>,
}

impl SessionStore {
    /// Open (or create) the store at `path`. `":memory:"` gives an ephemeral
    /// store for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open session store at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set session store pragmas")?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS session_state (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
        .context("failed to create session store schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Store location from config: the explicit `[session] path`, else
    /// `session.db` in the platform data directory.
    pub fn default_path(config: &Config) -> Result<PathBuf> {
        if let Some(path) = &config.session.path {
            return Ok(PathBuf::from(path));
        }
        let dirs = directories::ProjectDirs::from("", "", "pickban")
            .context("could not determine a data directory for the session store")?;
        let dir = dirs.data_dir();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        Ok(dir.join("session.db"))
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        Self::open(&path.to_string_lossy())
    }

    /// Panics if the mutex is poisoned, which only happens if another thread
    /// panicked mid-query.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("session store mutex poisoned")
    }

    fn save_value(&self, conn: &Connection, key: &str, value: &serde_json::Value) -> Result<()> {
        let json_str = serde_json::to_string(value).context("failed to serialize session value")?;
        conn.execute(
            "INSERT OR REPLACE INTO session_state (key, value) VALUES (?1, ?2)",
            params![key, json_str],
        )
        .with_context(|| format!("failed to save session key {key}"))?;
        Ok(())
    }

    fn load_string(&self, conn: &Connection, key: &str) -> Result<Option<String>> {
        let mut stmt = conn
            .prepare("SELECT value FROM session_state WHERE key = ?1")
            .context("failed to prepare session query")?;
        let mut rows = stmt
            .query_map(params![key], |row| row.get::<_, String>(0))
            .context("failed to query session state")?;

        match rows.next() {
            Some(row) => {
                let json_str = row.context("failed to read session row")?;
                let value: serde_json::Value = serde_json::from_str(&json_str)
                    .context("failed to deserialize session value")?;
                Ok(value.as_str().map(str::to_string).filter(|s| !s.is_empty()))
            }
            None => Ok(None),
        }
    }

    /// Remember the current lobby. Overwrites any previous session.
    pub fn save_session(&self, session: &StoredSession) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin transaction")?;
        self.save_value(&tx, LOBBY_CODE_KEY, &session.lobby_code.clone().into())?;
        self.save_value(&tx, ROLE_KEY, &session.role.as_str().into())?;
        self.save_value(&tx, PLAYER_NAME_KEY, &session.player_name.clone().into())?;
        tx.commit().context("failed to commit session")?;
        Ok(())
    }

    /// Update only the role, e.g. after an organizer claims a seat.
    pub fn save_role(&self, role: Role) -> Result<()> {
        let conn = self.conn();
        self.save_value(&conn, ROLE_KEY, &role.as_str().into())
    }

    /// Load the remembered session. A lobby code without a valid role and
    /// name is inconsistent: it is cleared and `None` returned.
    pub fn load_session(&self) -> Result<Option<StoredSession>> {
        let (code, role, name) = {
            let conn = self.conn();
            (
                self.load_string(&conn, LOBBY_CODE_KEY)?,
                self.load_string(&conn, ROLE_KEY)?,
                self.load_string(&conn, PLAYER_NAME_KEY)?,
            )
        };

        let Some(lobby_code) = code else {
            return Ok(None);
        };

        match (role.as_deref().and_then(Role::parse), name) {
            (Some(role), Some(player_name)) => {
                info!("restoring session: lobby {lobby_code} as {role}");
                Ok(Some(StoredSession {
                    lobby_code,
                    role,
                    player_name,
                }))
            }
            _ => {
                warn!("saved lobby {lobby_code} has no valid role/name; clearing");
                self.clear_session()?;
                Ok(None)
            }
        }
    }

    pub fn clear_session(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM session_state", [])
            .context("failed to clear session state")?;
        Ok(())
    }
}
