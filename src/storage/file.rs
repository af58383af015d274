use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::consts::{APP_DIR, STORAGE_KEY};
use crate::core::Session;
use crate::error::StorageError;

use super::{SessionStorage, decode_sessions};

/// JSON file slot: `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub(crate) struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub(crate) fn in_dir(dir: &Path) -> Self {
        FileStorage {
            path: dir.join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// `~/.local/share/studytrack` on Linux, the platform data dir elsewhere
    pub(crate) fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join(APP_DIR))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

fn write_json(path: &Path, sessions: &[Session]) -> Result<(), StorageError> {
    let write_err = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, sessions)?;
    writer.flush().map_err(write_err)
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Option<Vec<Session>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stored sessions");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to open stored sessions");
                return None;
            }
        };

        let document: Value = match serde_json::from_reader(std::io::BufReader::new(file)) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "stored sessions unreadable");
                return None;
            }
        };
        let sessions = decode_sessions(document)?;
        tracing::debug!(count = sessions.len(), path = %self.path.display(), "loaded sessions");
        Some(sessions)
    }

    fn save(&self, sessions: &[Session]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Sibling temp file, then rename over the slot
        let tmp = self.temp_path();
        let result = write_json(&tmp, sessions).and_then(|()| {
            fs::rename(&tmp, &self.path).map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })
        });
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
            return result;
        }
        tracing::debug!(count = sessions.len(), path = %self.path.display(), "saved sessions");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
