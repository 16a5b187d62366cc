//! Format versioning for nav and navjson documents.
//!
//! Each format is a closed family of versions. Decoders look a version up by
//! its tag and fail on anything not listed here; encoders only ever produce
//! the newest version.

use std::fmt;

/// Magic bytes at the start of every binary nav document.
pub const NAV_BINARY_MAGIC: [u8; 4] = *b"QNAV";

/// Size of the binary header: magic, version, checksum, payload length.
pub const NAV_HEADER_LEN: usize = 4 + 2 + 4 + 4;

/// Known binary nav versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NavVersion {
    V1,
    V2,
    V3,
}

impl NavVersion {
    pub const LATEST: NavVersion = NavVersion::V3;
    pub const ALL: [NavVersion; 3] = [NavVersion::V1, NavVersion::V2, NavVersion::V3];

    pub fn from_tag(tag: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|version| version.tag() == tag)
    }

    pub fn tag(self) -> u16 {
        match self {
            NavVersion::V1 => 1,
            NavVersion::V2 => 2,
            NavVersion::V3 => 3,
        }
    }
}

impl fmt::Display for NavVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nav v{}", self.tag())
    }
}

/// Known navjson versions, keyed by the document's `version` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NavJsonVersion {
    V1,
    V2,
}

impl NavJsonVersion {
    pub const LATEST: NavJsonVersion = NavJsonVersion::V2;
    pub const ALL: [NavJsonVersion; 2] = [NavJsonVersion::V1, NavJsonVersion::V2];

    pub fn from_tag(tag: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|version| version.tag() == tag)
    }

    pub fn tag(self) -> u64 {
        match self {
            NavJsonVersion::V1 => 1,
            NavJsonVersion::V2 => 2,
        }
    }
}

impl fmt::Display for NavJsonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "navjson v{}", self.tag())
    }
}
