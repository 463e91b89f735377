//! Error types for asset aggregation.
//!
//! Missing files and compiler failures abort the build: nothing in the
//! core catches them. Unknown plugin lookups are not errors at all, they
//! come back as `None` from the registry.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while combining, compiling or copying plugin assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// A referenced asset could not be stat'ed or read.
    #[error("missing asset file `{}`", path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("IO error on `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AssetError {
    pub fn missing(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::MissingFile {
            path: path.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A stylesheet compiler rejected its input.
#[derive(Debug, Clone, Error)]
pub struct CompileError {
    pub message: String,
    /// Source file, when compiling from a path.
    pub file: Option<PathBuf>,
    /// 1-based line and column, when the compiler reports one.
    pub location: Option<(u32, u32)>,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file: None,
            location: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_location(mut self, line: u32, column: u32) -> Self {
        self.location = Some((line, column));
        self
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("stylesheet compilation failed")?;
        if let Some(file) = &self.file {
            write!(f, " in `{}`", file.display())?;
        }
        if let Some((line, column)) = self.location {
            write!(f, " at {line}:{column}")?;
        }
        write!(f, ": {}", self.message)
    }
}

pub type Result<T, E = AssetError> = std::result::Result<T, E>;
