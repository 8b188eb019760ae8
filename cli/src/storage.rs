//! JSON-file session storage for the terminal front-end.
//!
//! DESIGN
//! ======
//! The file holds one JSON object mapping storage keys to strings, the same
//! shape `localStorage` has in the browser. Every operation re-reads the
//! file, so two shells sharing a session file see each other's logins.
//!
//! ERROR HANDLING
//! ==============
//! An unreadable or corrupt file reads as empty; a failed write is logged and
//! dropped. Neither stops the command.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ledger_client::state::storage::SessionStorage;

const SESSION_DIR: &str = ".certledger";
const SESSION_FILE: &str = "session.json";
#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

/// `$HOME/.certledger/session.json`, or relative to the working directory
/// when `HOME` is unset.
pub fn default_session_path() -> PathBuf {
    session_path_under(std::env::var_os("HOME"))
}

fn session_path_under(home: Option<OsString>) -> PathBuf {
    home.map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(SESSION_DIR)
        .join(SESSION_FILE)
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session file unreadable");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "session file corrupt; ignoring");
            BTreeMap::new()
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) {
        if let Err(e) = self.try_save(entries) {
            tracing::warn!(path = %self.path.display(), error = %e, "session file write failed");
        }
    }

    fn try_save(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let rendered = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;
        let mut file = open_owner_only(&self.path)?;
        file.write_all(rendered.as_bytes())
    }
}

/// Open `path` for rewriting. A new file is created `0600`, and an existing
/// one is narrowed to `0600` before any bytes are written.
#[cfg(unix)]
fn open_owner_only(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(SESSION_FILE_MODE)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(SESSION_FILE_MODE))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_owner_only(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create(true).truncate(true).open(path)
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.load();
        entries.insert(key.to_owned(), value.to_owned());
        self.save(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.load();
        if entries.remove(key).is_some() {
            self.save(&entries);
        }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
