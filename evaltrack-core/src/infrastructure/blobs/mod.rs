use crate::foundation::{now_millis, TrackerError, ALLOWED_UPLOAD_EXTENSIONS, MAX_UPLOAD_BYTES};
use crate::storage_err;
use log::debug;
use std::fs;
use std::path::PathBuf;

/// Where an uploaded file ended up: the client-facing URL path and the name
/// under which the bytes were stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredBlob {
    pub url_path: String,
    pub stored_name: String,
}

/// Opaque attachment store: bytes in, path out.
pub trait BlobStore: Send + Sync {
    fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredBlob, TrackerError>;
    fn retrieve(&self, stored_name: &str) -> Result<Vec<u8>, TrackerError>;
}

/// Filesystem-backed blob store serving the `/uploads` URL namespace.
///
/// Stored names are `<millis>_<original>` so repeated uploads of the same
/// file never collide.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, TrackerError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| storage_err!("create upload dir", err))?;
        Ok(Self { root })
    }

    fn validate_name(name: &str) -> Result<(), TrackerError> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(TrackerError::validation(format!("unacceptable file name: {name:?}")));
        }
        Ok(())
    }

    fn validate_extension(name: &str) -> Result<(), TrackerError> {
        let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
        match extension {
            Some(ext) if ALLOWED_UPLOAD_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            _ => Err(TrackerError::validation(format!("file type not supported: {name}"))),
        }
    }
}

impl BlobStore for FsBlobStore {
    fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredBlob, TrackerError> {
        Self::validate_name(original_name)?;
        Self::validate_extension(original_name)?;
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(TrackerError::validation(format!(
                "file too large: {} bytes exceeds max {}",
                bytes.len(),
                MAX_UPLOAD_BYTES
            )));
        }

        let stored_name = format!("{}_{}", now_millis(), original_name);
        let target = self.root.join(&stored_name);
        fs::write(&target, bytes).map_err(|err| storage_err!("write blob", err))?;
        debug!("stored blob name={} bytes={}", stored_name, bytes.len());
        Ok(StoredBlob { url_path: format!("/uploads/{stored_name}"), stored_name })
    }

    fn retrieve(&self, stored_name: &str) -> Result<Vec<u8>, TrackerError> {
        Self::validate_name(stored_name)?;
        let target = self.root.join(stored_name);
        if !target.is_file() {
            return Err(TrackerError::not_found(format!("file {stored_name}")));
        }
        fs::read(&target).map_err(|err| storage_err!("read blob", err))
    }
}
