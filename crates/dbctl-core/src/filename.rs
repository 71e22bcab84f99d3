//! Script filename parsing.
//!
//! Migration scripts are named `<d>-<major>.<minor>.<patch>-<description>.<ext>`
//! where `<d>` is `f` (forward) or `b` (backward), in either case. Anything
//! else is rejected outright rather than skipped.

use crate::direction::MigrationDirection;
use crate::error::{CoreError, CoreResult};
use crate::version::SemanticVersion;
use std::fmt;

/// The parts encoded in a migration script filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFilename {
    pub direction: MigrationDirection,
    pub version: SemanticVersion,
    /// Kept verbatim, including any hyphens or underscores
    pub description: String,
    pub extension: String,
}

impl ScriptFilename {
    /// Parse a script filename. Directory components (either separator) are ignored.
    pub fn parse(filename: &str) -> CoreResult<Self> {
        let name = bare_filename(filename);
        let malformed = |reason: String| CoreError::MalformedFilename {
            filename: filename.to_string(),
            reason,
        };

        let mut chars = name.chars();
        let direction = chars
            .next()
            .and_then(MigrationDirection::from_letter)
            .ok_or_else(|| malformed("expected leading 'f' or 'b' direction letter".to_string()))?;

        let rest = chars
            .as_str()
            .strip_prefix('-')
            .ok_or_else(|| malformed("expected '-' after the direction letter".to_string()))?;

        let (version_part, tail) = rest
            .split_once('-')
            .ok_or_else(|| malformed("expected '-' between version and description".to_string()))?;

        let version = SemanticVersion::parse(version_part).map_err(|e| match e {
            CoreError::InvalidVersion { reason, .. } => {
                malformed(format!("invalid version '{version_part}': {reason}"))
            }
            other => malformed(other.to_string()),
        })?;

        let (description, extension) = tail
            .rsplit_once('.')
            .ok_or_else(|| malformed("missing file extension".to_string()))?;

        if description.is_empty() {
            return Err(malformed("description is empty".to_string()));
        }
        if extension.is_empty() {
            return Err(malformed("file extension is empty".to_string()));
        }

        Ok(Self {
            direction,
            version,
            description: description.to_string(),
            extension: extension.to_string(),
        })
    }
}

/// Strip any directory components from a path-like string
pub fn bare_filename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

impl fmt::Display for ScriptFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}.{}",
            self.direction.letter(),
            self.version,
            self.description,
            self.extension
        )
    }
}

#[cfg(test)]
#[path = "filename_test.rs"]
mod tests;
