use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

/// Result of a write operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    /// Path that was written
    pub path: PathBuf,
    /// Number of bytes written
    pub bytes: usize,
}

/// A file to be written to disk
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the file, creating parent directories as needed
    pub fn write(&self) -> Result<WriteResult> {
        write_file(&self.path, &self.content)
            .wrap_err_with(|| format!("failed to write '{}'", self.path.display()))?;
        Ok(WriteResult {
            path: self.path.clone(),
            bytes: self.content.len(),
        })
    }
}

/// Write every file in order, stopping at the first failure.
pub fn write_all(files: &[File]) -> Result<Vec<WriteResult>> {
    files.iter().map(File::write).collect()
}

fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}
