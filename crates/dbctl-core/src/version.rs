//! Semantic versions used to order migration scripts

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `major.minor.patch` version.
///
/// Ordering is lexicographic on `(major, minor, patch)`, which is exactly the
/// derived order given the field declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    /// Version recorded by database initialization
    pub const GENESIS: SemanticVersion = SemanticVersion::new(1, 0, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `major.minor.patch`; each component must be a non-empty run of ASCII digits
    pub fn parse(value: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidVersion {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = value.split('.');
        let mut next = |name: &str| -> CoreResult<u64> {
            let part = parts
                .next()
                .ok_or_else(|| invalid(&format!("missing {name} component")))?;
            parse_component(part).map_err(|reason| invalid(&format!("{name} {reason}")))
        };

        let major = next("major")?;
        let minor = next("minor")?;
        let patch = next("patch")?;

        if parts.next().is_some() {
            return Err(invalid("expected exactly three components"));
        }

        Ok(Self::new(major, minor, patch))
    }
}

fn parse_component(part: &str) -> Result<u64, String> {
    if part.is_empty() {
        return Err("component is empty".to_string());
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("component '{part}' is not a number"));
    }
    part.parse::<u64>()
        .map_err(|e| format!("component '{part}' is out of range: {e}"))
}

impl FromStr for SemanticVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SemanticVersion {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SemanticVersion> for String {
    fn from(version: SemanticVersion) -> Self {
        version.to_string()
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
