//! Filesystem capability used by the script catalog

use std::io;
use std::path::{Path, PathBuf};

/// The file operations the script catalog needs
pub trait ScriptFileSystem: Send + Sync {
    /// Whether `path` exists and is a directory
    fn dir_exists(&self, path: &Path) -> bool;

    /// Recursively list files under `dir` whose file name starts with
    /// `prefix`, compared case-insensitively
    fn enumerate_files(&self, dir: &Path, prefix: &str) -> io::Result<Vec<PathBuf>>;

    /// Whether `path` exists and is a regular file
    fn file_exists(&self, path: &Path) -> bool;

    /// Read a whole file
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`ScriptFileSystem`] backed by `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    fn enumerate_recursive(dir: &Path, prefix: &str, files: &mut Vec<PathBuf>) -> io::Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();

            if path.is_dir() {
                Self::enumerate_recursive(&path, prefix, files)?;
            } else if path
                .file_name()
                .map(|name| starts_with_ignore_case(&name.to_string_lossy(), prefix))
                .unwrap_or(false)
            {
                files.push(path);
            }
        }
        Ok(())
    }
}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    name.len() >= prefix.len()
        && name.is_char_boundary(prefix.len())
        && name[..prefix.len()].eq_ignore_ascii_case(prefix)
}

impl ScriptFileSystem for LocalFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn enumerate_files(&self, dir: &Path, prefix: &str) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        Self::enumerate_recursive(dir, prefix, &mut files)?;
        Ok(files)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}
