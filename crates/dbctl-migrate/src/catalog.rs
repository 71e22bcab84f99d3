//! Script catalog: lists, filters, orders, and reads migration scripts.

use crate::error::{MigrateError, MigrateResult};
use crate::fs::{LocalFileSystem, ScriptFileSystem};
use dbctl_core::{
    ChangeLogEntry, Clock, MigrationDirection, ScriptFilename, SemanticVersion, SystemClock,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Migration scripts of one direction inside a scripts directory
pub struct ScriptCatalog {
    fs: Arc<dyn ScriptFileSystem>,
    scripts_path: PathBuf,
    direction: MigrationDirection,
    clock: Arc<dyn Clock>,
    applied_by: String,
}

impl ScriptCatalog {
    /// Catalog over the local filesystem, stamping entries with the wall clock
    pub fn new(
        scripts_path: impl Into<PathBuf>,
        direction: MigrationDirection,
        applied_by: impl Into<String>,
    ) -> Self {
        Self {
            fs: Arc::new(LocalFileSystem),
            scripts_path: scripts_path.into(),
            direction,
            clock: Arc::new(SystemClock),
            applied_by: applied_by.into(),
        }
    }

    /// Replace the clock used for `change_date_time`
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the filesystem
    pub fn with_file_system(mut self, fs: Arc<dyn ScriptFileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn direction(&self) -> MigrationDirection {
        self.direction
    }

    pub fn scripts_path(&self) -> &Path {
        &self.scripts_path
    }

    /// Bare filenames of the scripts to run from `baseline`.
    ///
    /// Forward: every script above `baseline`, oldest first.
    /// Backward: the single script whose version equals `baseline`.
    pub fn find_scripts(&self, baseline: SemanticVersion) -> MigrateResult<Vec<String>> {
        log::debug!(
            "Finding {} migration scripts in {}",
            self.direction,
            self.scripts_path.display()
        );

        let mut scripts = self.parse_candidates()?;

        match self.direction {
            MigrationDirection::Forward => {
                scripts.retain(|(_, parsed)| parsed.version > baseline);
                scripts.sort_by(|(a_name, a), (b_name, b)| {
                    a.version.cmp(&b.version).then_with(|| a_name.cmp(b_name))
                });
            }
            MigrationDirection::Backward => {
                scripts.retain(|(_, parsed)| parsed.version == baseline);
                if scripts.len() > 1 {
                    let mut files: Vec<&str> =
                        scripts.iter().map(|(name, _)| name.as_str()).collect();
                    files.sort_unstable();
                    return Err(MigrateError::DuplicateBackwardScript {
                        version: baseline,
                        files: files.join(", "),
                    });
                }
            }
        }

        let ordered: Vec<String> = scripts.into_iter().map(|(name, _)| name).collect();
        log::debug!(
            "Found {} scripts to execute (ordered): {:?}",
            ordered.len(),
            ordered
        );
        Ok(ordered)
    }

    /// Every file named `<letter>-...` for this catalog's direction, parsed.
    /// One bad name fails the whole listing.
    fn parse_candidates(&self) -> MigrateResult<Vec<(String, ScriptFilename)>> {
        if !self.fs.dir_exists(&self.scripts_path) {
            return Err(MigrateError::PathNotFound {
                path: self.scripts_path.display().to_string(),
            });
        }

        let prefix = format!("{}-", self.direction.letter());
        let files = self
            .fs
            .enumerate_files(&self.scripts_path, &prefix)
            .map_err(|source| MigrateError::Io {
                path: self.scripts_path.display().to_string(),
                source,
            })?;

        files
            .iter()
            .map(|path| -> MigrateResult<(String, ScriptFilename)> {
                let name = bare_name(path);
                let parsed = ScriptFilename::parse(&name)?;
                Ok((name, parsed))
            })
            .collect()
    }

    /// Read a script chosen by [`find_scripts`](Self::find_scripts) and build
    /// the change log entry that records it.
    pub fn get_script(&self, filename: &str) -> MigrateResult<(ChangeLogEntry, String)> {
        let path = self.locate(filename)?;
        log::debug!("Reading contents of script {}", path.display());

        let bytes = self.fs.read(&path).map_err(|source| MigrateError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Read {} bytes from {}", bytes.len(), filename);

        let entry = ChangeLogEntry::new(filename, &self.applied_by, self.clock.now(), &bytes)?;
        let contents = String::from_utf8_lossy(&bytes).into_owned();
        Ok((entry, contents))
    }

    /// `scripts_path/filename`, or the one file of that name in a subdirectory
    fn locate(&self, filename: &str) -> MigrateResult<PathBuf> {
        let not_found = || MigrateError::ScriptNotFound {
            filename: filename.to_string(),
            path: self.scripts_path.display().to_string(),
        };

        if filename.is_empty() {
            return Err(not_found());
        }

        let direct = self.scripts_path.join(filename);
        if self.fs.file_exists(&direct) {
            return Ok(direct);
        }

        if !self.fs.dir_exists(&self.scripts_path) {
            return Err(not_found());
        }

        let mut nested = self
            .fs
            .enumerate_files(&self.scripts_path, filename)
            .map_err(|source| MigrateError::Io {
                path: self.scripts_path.display().to_string(),
                source,
            })?
            .into_iter()
            .filter(|path| bare_name(path) == filename);

        match (nested.next(), nested.next()) {
            (Some(path), None) => Ok(path),
            _ => Err(not_found()),
        }
    }
}

fn bare_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
