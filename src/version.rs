use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::UserError;

/// A two-field version identifier ordered lexicographically by
/// `(major, minor)`. The textual form is `"<major>.<minor>"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }

    pub fn next_minor(&self) -> Self {
        Self {
            major: self.major,
            minor: self.minor + 1,
        }
    }

    /// The next major version. Minor resets to zero.
    pub fn next_major(&self) -> Self {
        Self {
            major: self.major + 1,
            minor: 0,
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || UserError::BadVersion(s.to_string());
        let (major, minor) = s.split_once('.').ok_or_else(bad)?;
        for part in [major, minor] {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(bad());
            }
        }
        let major = major.parse().map_err(|_| bad())?;
        let minor = minor.parse().map_err(|_| bad())?;
        Ok(Self { major, minor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_field_versions() {
        let version: Version = "1.2".parse().unwrap();
        assert_eq!(version, Version::new(1, 2));
        assert_eq!("0.1".parse::<Version>().unwrap(), Version::default());
        assert_eq!("10.42".parse::<Version>().unwrap(), Version::new(10, 42));
    }

    #[test]
    fn rejects_malformed_versions() {
        for bad in ["", "1", "1.", ".1", "1.2.3", "a.b", "1.x", "-1.0", "1.-2", "1 .2"] {
            assert!(
                matches!(bad.parse::<Version>(), Err(UserError::BadVersion(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        for version in [Version::new(0, 1), Version::new(3, 14), Version::new(12, 0)] {
            assert_eq!(version.to_string().parse::<Version>().unwrap(), version);
        }
    }

    #[test]
    fn orders_lexicographically() {
        assert!(Version::new(0, 9) < Version::new(1, 0));
        assert!(Version::new(1, 0) < Version::new(1, 1));
        assert!(Version::new(2, 0) > Version::new(1, 9));
        assert_eq!(
            [Version::new(1, 0), Version::new(0, 2), Version::new(0, 10)]
                .into_iter()
                .max(),
            Some(Version::new(1, 0))
        );
    }

    #[test]
    fn bumps_versions() {
        let version = Version::new(1, 3);
        assert_eq!(version.next_minor(), Version::new(1, 4));
        assert_eq!(version.next_major(), Version::new(2, 0));
    }
}
