//! The on-disk exclusion store.
//!
//! The file is read in full once at scan start and opened again in append
//! mode at scan end. It only ever grows. There is no locking, so only one
//! run may use a given file at a time.

use crate::error::{Result, StoreError};
use crate::parser::{parse_exclusions, render_lines};
use crate::types::{ExclusionSet, NationName};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default file name, relative to the working directory
pub const DEFAULT_STORE_FILE: &str = "exclusions.txt";

/// Handle to an append-only exclusion file.
#[derive(Debug, Clone)]
pub struct ExclusionStore {
    path: PathBuf,
}

impl ExclusionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every excluded nation.
    ///
    /// A missing file is not an error: it is created empty and an empty
    /// set is returned.
    pub fn load(&self) -> Result<ExclusionSet> {
        debug!("Checking exclusion store {}", self.path.display());
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} not found, creating", self.path.display());
                self.create_if_missing()?;
                return Ok(ExclusionSet::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let set: ExclusionSet = parse_exclusions(&content).into_iter().collect();
        debug!(
            "Loaded {} excluded nations ({} entries)",
            set.len(),
            set.entries()
        );
        Ok(set)
    }

    /// Append `names` in order, one per line, and flush.
    ///
    /// Nothing is deduplicated. Returns the number of lines written. The
    /// file is created even when `names` is empty.
    pub fn append(&self, names: &[NationName]) -> Result<usize> {
        self.create_parent_dir()?;
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|source| self.write_error(source))?;

        if names.is_empty() {
            return Ok(0);
        }

        let mut payload = String::new();
        if !ends_with_newline(&mut file).map_err(|source| self.write_error(source))? {
            payload.push('\n');
        }
        payload.push_str(&render_lines(names));

        file.write_all(payload.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| self.write_error(source))?;

        debug!(
            "Appended {} nations to {}",
            names.len(),
            self.path.display()
        );
        Ok(names.len())
    }

    fn create_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|source| self.write_error(source))
            }
            _ => Ok(()),
        }
    }

    fn create_if_missing(&self) -> Result<()> {
        self.create_parent_dir()?;
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map(|_| ())
            .map_err(|source| self.write_error(source))
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for ExclusionStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_FILE)
    }
}

/// True for an empty file or one whose last byte is `\n`.
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
