use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::defaults::default_document;
use crate::error::{Result, StoreError};
use crate::merge::document_from_value;
use crate::types::ConfigDocument;

/// Where the board document lives.
///
/// The status engine only needs a fresh read and a whole-document write;
/// [`ConfigStore`] is the file-backed implementation.
pub trait DocumentStore: Send + Sync {
    /// Read the current document, merged over the default template.
    fn load(&self) -> Result<ConfigDocument>;

    /// Replace the persisted document. On error the previous one is kept.
    fn save(&self, doc: &ConfigDocument) -> Result<()>;
}

/// File-backed board document.
///
/// Every [`load`](Self::load) reads the file fresh; there is no in-process
/// cache. Writes replace the whole file through a temp file + rename so a
/// crash mid-write never leaves a truncated document behind.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document, merged over the default template.
    ///
    /// An absent or blank file yields the defaults, which are written back
    /// immediately (a failed write is logged, the defaults still returned).
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<ConfigDocument> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        if text.trim().is_empty() {
            let doc = default_document();
            match self.save(&doc) {
                Ok(()) => info!("board document created from defaults"),
                Err(e) => warn!(error = %e, "could not write default board document"),
            }
            return Ok(doc);
        }

        let raw: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| self.malformed(e))?;
        let doc = document_from_value(raw).map_err(|e| self.malformed(e))?;
        debug!(
            slots = doc.schedule.len(),
            roster = doc.duty_roster.len(),
            classes = doc.class_schedules.len(),
            "board document loaded"
        );
        Ok(doc)
    }

    /// Replace the persisted document with `doc`.
    ///
    /// On error the previous file is left as it was.
    #[instrument(skip(self, doc), fields(path = %self.path.display()))]
    pub fn save(&self, doc: &ConfigDocument) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.persist_failed(e))?;

        let json = serde_json::to_string_pretty(doc)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.persist_failed(e))?;
        write_synced(&mut tmp, json.as_bytes()).map_err(|e| self.persist_failed(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.persist_failed(e.error))?;

        debug!(bytes = json.len(), "board document saved");
        Ok(())
    }

    fn malformed(&self, e: serde_json::Error) -> StoreError {
        StoreError::Malformed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        }
    }

    fn persist_failed(&self, source: std::io::Error) -> StoreError {
        StoreError::Persist {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl DocumentStore for ConfigStore {
    fn load(&self) -> Result<ConfigDocument> {
        ConfigStore::load(self)
    }

    fn save(&self, doc: &ConfigDocument) -> Result<()> {
        ConfigStore::save(self, doc)
    }
}

fn write_synced(tmp: &mut tempfile::NamedTempFile, bytes: &[u8]) -> std::io::Result<()> {
    tmp.write_all(bytes)?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()
}
