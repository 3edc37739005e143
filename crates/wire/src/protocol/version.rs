use std::fmt;
use std::str::FromStr;

use crate::protocol::ParseError;

/// Protocol version of an HTTP/1.x message, kept as its `major.minor` pair.
///
/// Values are well-formed by construction. Malformed version text is rejected
/// where it enters the program, by [`FromStr`] or [`TryFrom<&[u8]>`], so a
/// `Version` held by a message never needs re-validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u8,
    minor: u8,
}

impl Version {
    /// `HTTP/0.9`
    pub const HTTP_09: Version = Version::new(0, 9);

    /// `HTTP/1.0`
    pub const HTTP_10: Version = Version::new(1, 0);

    /// `HTTP/1.1`
    pub const HTTP_11: Version = Version::new(1, 1);

    /// Creates a version from its numeric pair.
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Major version number, the `1` of `HTTP/1.1`.
    pub const fn major(&self) -> u8 {
        self.major
    }

    /// Minor version number, the `1` of `HTTP/1.1`.
    pub const fn minor(&self) -> u8 {
        self.minor
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::HTTP_11
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::try_from(s.as_bytes())
    }
}

impl TryFrom<&[u8]> for Version {
    type Error = ParseError;

    /// Parses the `HTTP-version` production of RFC 9112: the case-sensitive
    /// protocol name followed by single-digit major and minor numbers.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match bytes {
            [b'H', b'T', b'T', b'P', b'/', major @ b'0'..=b'9', b'.', minor @ b'0'..=b'9'] => {
                Ok(Version::new(major - b'0', minor - b'0'))
            }
            _ => Err(ParseError::invalid_version(String::from_utf8_lossy(bytes))),
        }
    }
}
