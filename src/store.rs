//! Descriptor file persistence.
//!
//! Workflows load the router descriptor from a JSON file and write the
//! updated descriptor back once a workflow has converged, so observed
//! state (ASN, deployment status, tracking identifier) survives between
//! invocations. File access goes through capability-scoped directory
//! handles rather than ambient paths.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use thiserror::Error;

use crate::descriptor::RouterDescriptor;

/// Errors raised while reading or writing a descriptor file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Raised when the descriptor path has no filename component.
    #[error("descriptor path {path} is missing a filename")]
    InvalidPath {
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// Raised when file system operations fail.
    #[error("failed to access {path}: {message}")]
    Io {
        /// Path that could not be accessed.
        path: Utf8PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// Raised when the file content is not a valid descriptor.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Path that could not be parsed.
        path: Utf8PathBuf,
        /// Parser error message.
        message: String,
    },
}

/// Reads and writes one router descriptor file.
#[derive(Clone, Debug)]
pub struct DescriptorStore {
    path: Utf8PathBuf,
}

impl DescriptorStore {
    /// Creates a store for the given descriptor file path.
    #[must_use]
    pub const fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }

    /// Returns the descriptor file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn split(&self) -> Result<(&Utf8Path, &str), StoreError> {
        let parent = self.path.parent().unwrap_or_else(|| Utf8Path::new("."));
        let file_name = self.path.file_name().ok_or_else(|| StoreError::InvalidPath {
            path: self.path.clone(),
        })?;
        Ok((parent, file_name))
    }

    fn open_parent(&self, parent: &Utf8Path) -> Result<Dir, StoreError> {
        Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| StoreError::Io {
            path: parent.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Loads the descriptor from disk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the file cannot be read and
    /// [`StoreError::Parse`] when its content is not a valid descriptor.
    pub fn load(&self) -> Result<RouterDescriptor, StoreError> {
        let (parent, file_name) = self.split()?;
        let dir = self.open_parent(parent)?;
        let contents = dir
            .read_to_string(file_name)
            .map_err(|err| StoreError::Io {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        serde_json::from_str(&contents).map_err(|err| StoreError::Parse {
            path: self.path.clone(),
            message: err.to_string(),
        })
    }

    /// Writes the descriptor back to disk, creating parent directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the file cannot be written.
    pub fn save(&self, descriptor: &RouterDescriptor) -> Result<(), StoreError> {
        let (parent, file_name) = self.split()?;
        Dir::create_ambient_dir_all(parent, ambient_authority()).map_err(|err| StoreError::Io {
            path: parent.to_path_buf(),
            message: err.to_string(),
        })?;
        let dir = self.open_parent(parent)?;

        let rendered =
            serde_json::to_string_pretty(descriptor).map_err(|err| StoreError::Parse {
                path: self.path.clone(),
                message: err.to_string(),
            })?;

        dir.write(file_name, rendered).map_err(|err| StoreError::Io {
            path: self.path.clone(),
            message: err.to_string(),
        })
    }

    /// Reports whether the descriptor file exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the parent directory cannot be
    /// inspected.
    pub fn exists(&self) -> Result<bool, StoreError> {
        let (parent, file_name) = self.split()?;
        match Dir::open_ambient_dir(parent, ambient_authority()) {
            Ok(dir) => dir.try_exists(file_name).map_err(|err| StoreError::Io {
                path: self.path.clone(),
                message: err.to_string(),
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StoreError::Io {
                path: parent.to_path_buf(),
                message: err.to_string(),
            }),
        }
    }
}
