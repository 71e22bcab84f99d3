//! Migration direction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way a script moves the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationDirection {
    /// Advances the schema to a higher version
    Forward,
    /// Undoes one specific forward version
    Backward,
}

impl MigrationDirection {
    /// Canonical (lowercase) filename prefix letter
    pub fn letter(self) -> char {
        match self {
            MigrationDirection::Forward => 'f',
            MigrationDirection::Backward => 'b',
        }
    }

    /// Map a filename prefix letter to a direction, ignoring case
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'f' => Some(MigrationDirection::Forward),
            'b' => Some(MigrationDirection::Backward),
            _ => None,
        }
    }

    /// Name as stored in the change log
    pub fn as_str(self) -> &'static str {
        match self {
            MigrationDirection::Forward => "forward",
            MigrationDirection::Backward => "backward",
        }
    }
}

impl fmt::Display for MigrationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
