//! Target Django version.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Django release line a project targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum DjangoVersion {
    /// Django 2.x.
    V2,
    /// Django 3.x.
    V3,
    /// Django 4.x.
    #[default]
    V4,
}

impl DjangoVersion {
    /// Map a raw persisted version string (`"2.x"`, `"3.2"`, ...) by prefix.
    ///
    /// Anything not starting with `2` or `3` maps to the newest version.
    pub fn from_prefix(raw: &str) -> Self {
        if raw.starts_with('2') {
            DjangoVersion::V2
        } else if raw.starts_with('3') {
            DjangoVersion::V3
        } else {
            DjangoVersion::V4
        }
    }

    /// Major version number.
    pub fn major(self) -> u8 {
        match self {
            DjangoVersion::V2 => 2,
            DjangoVersion::V3 => 3,
            DjangoVersion::V4 => 4,
        }
    }
}

impl fmt::Display for DjangoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.x", self.major())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_prefix() {
        assert_eq!(DjangoVersion::from_prefix("2.x"), DjangoVersion::V2);
        assert_eq!(DjangoVersion::from_prefix("3.2"), DjangoVersion::V3);
        assert_eq!(DjangoVersion::from_prefix("4.x"), DjangoVersion::V4);
        assert_eq!(DjangoVersion::from_prefix("5.0"), DjangoVersion::V4);
        assert_eq!(DjangoVersion::from_prefix(""), DjangoVersion::V4);
    }

    #[test]
    fn test_display_round_trips_through_prefix() {
        for version in [DjangoVersion::V2, DjangoVersion::V3, DjangoVersion::V4] {
            assert_eq!(DjangoVersion::from_prefix(&version.to_string()), version);
        }
    }
}
