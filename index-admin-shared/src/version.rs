//! Server version numbers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A `major.minor.revision` version as reported by the engine's info endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub revision: u32,
}

impl Version {
    /// `0.0.0`.
    pub const ZERO: Version = Version::new(0, 0, 0);

    /// Create a version.
    pub const fn new(major: u32, minor: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            revision,
        }
    }
}

impl FromStr for Version {
    type Err = ModelError;

    /// Parse `major[.minor[.revision]]`, ignoring any `-qualifier` suffix
    /// such as `-SNAPSHOT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let core = s.trim().split(['-', '+']).next().unwrap_or_default();
        let mut parts = core.split('.');

        let mut next = |required: bool| -> Result<u32, ModelError> {
            match parts.next() {
                Some(part) => part
                    .parse::<u32>()
                    .map_err(|_| ModelError::InvalidVersion(s.to_string())),
                None if required => Err(ModelError::InvalidVersion(s.to_string())),
                None => Ok(0),
            }
        };

        let major = next(true)?;
        let minor = next(false)?;
        let revision = next(false)?;
        if parts.next().is_some() {
            return Err(ModelError::InvalidVersion(s.to_string()));
        }
        Ok(Self::new(major, minor, revision))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("2.11.1".parse::<Version>().unwrap(), Version::new(2, 11, 1));
        assert_eq!("7.17".parse::<Version>().unwrap(), Version::new(7, 17, 0));
        assert_eq!(
            "8.0.0-SNAPSHOT".parse::<Version>().unwrap(),
            Version::new(8, 0, 0)
        );
        assert!("".parse::<Version>().is_err());
        assert!("two.one".parse::<Version>().is_err());
        assert!("1.2.3.4".parse::<Version>().is_err());
    }

    #[test]
    fn test_ordering_and_display() {
        assert!(Version::new(2, 11, 0) > Version::new(2, 9, 5));
        assert!(Version::ZERO < Version::new(0, 0, 1));
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
    }
}
