//! JsonFileStore - one pretty-printed JSON array per collection on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{decode_collection, encode_collection, Model, ModelStore, StorageError};

/// File-backed model store.
///
/// Collection `C` lives in `<dir>/C.json`. Writes rewrite the whole file in
/// place; there is no temporary file or backup.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `M`'s collection.
    pub fn path_for<M: Model>(&self) -> PathBuf {
        self.dir.join(format!("{}.json", M::COLLECTION))
    }
}

fn io_error(path: &Path, err: io::Error) -> StorageError {
    if err.kind() == io::ErrorKind::NotFound {
        StorageError::Missing {
            path: path.display().to_string(),
        }
    } else {
        StorageError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl ModelStore for JsonFileStore {
    fn load_models<M: Model>(&self) -> Result<Vec<M>, StorageError> {
        let path = self.path_for::<M>();
        let bytes = fs::read(&path).map_err(|e| io_error(&path, e))?;
        decode_collection(&bytes)
    }

    fn store_models<M: Model>(&self, models: &[M]) -> Result<(), StorageError> {
        let path = self.path_for::<M>();
        // Saving never creates the file; a vanished file is reported instead.
        if !path.is_file() {
            return Err(StorageError::Missing {
                path: path.display().to_string(),
            });
        }

        let bytes = encode_collection(models)?;
        fs::write(&path, bytes).map_err(|e| io_error(&path, e))
    }

    fn ensure_collection<M: Model>(&self) -> Result<bool, StorageError> {
        let path = self.path_for::<M>();
        if path.exists() {
            return Ok(false);
        }

        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        fs::write(&path, b"[]").map_err(|e| io_error(&path, e))?;
        Ok(true)
    }
}
