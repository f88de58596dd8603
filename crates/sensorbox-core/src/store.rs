// ── Local configuration store ──
//
// A directory of JSON documents, one file per `DocumentKind`. The store is
// an explicit handle passed to whatever needs it; there is no process-wide
// host object.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::trace;

use crate::document::{Document, DocumentKind};

/// Failure reading or writing a local document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed document {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Handle on the directory holding the device's local documents.
#[derive(Debug, Clone)]
pub struct ConfStore {
    root: PathBuf,
}

impl ConfStore {
    /// Open a store rooted at `root`. The directory is created on first save.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute file path for a document kind.
    pub fn path_of(&self, kind: DocumentKind) -> PathBuf {
        self.root.join(kind.file_name())
    }

    /// Load a document, or `None` if it has never been saved.
    pub fn load<D: Document>(&self) -> Result<Option<D>, StoreError> {
        let path = self.path_of(D::KIND);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(kind = %D::KIND, "document absent");
                return Ok(None);
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        trace!(kind = %D::KIND, path = %path.display(), "loaded document");
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Parse { path, source })
    }

    /// Save a document, replacing any previous version atomically.
    pub fn save<D: Document>(&self, doc: &D) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let path = self.path_of(D::KIND);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_string(doc).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;

        fs::write(&tmp, body).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        trace!(kind = %D::KIND, path = %path.display(), "saved document");
        Ok(())
    }

    /// Delete a document. Returns `false` if there was nothing to delete.
    pub fn delete(&self, kind: DocumentKind) -> Result<bool, StoreError> {
        let path = self.path_of(kind);
        match fs::remove_file(&path) {
            Ok(()) => {
                trace!(%kind, path = %path.display(), "deleted document");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::document::{OpcConf, Project};

    #[test]
    fn missing_document_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfStore::open(dir.path());
        assert!(store.load::<Project>().unwrap().is_none());
    }

    #[test]
    fn save_then_load_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfStore::open(dir.path().join("conf"));
        let conf = OpcConf {
            model: "N2".into(),
            sample_period: 10,
            power_saving: false,
        };

        store.save(&conf).unwrap();
        assert!(store.path_of(DocumentKind::OpcConf).exists());
        assert_eq!(store.load::<OpcConf>().unwrap(), Some(conf));

        assert!(store.delete(DocumentKind::OpcConf).unwrap());
        assert!(!store.delete(DocumentKind::OpcConf).unwrap());
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfStore::open(dir.path());
        std::fs::write(store.path_of(DocumentKind::Project), "{not json").unwrap();
        assert!(matches!(
            store.load::<Project>(),
            Err(StoreError::Parse { .. })
        ));
    }
}
