//! Version-tagged documents of either format.

use std::fmt;

use crate::error::NavResult;
use crate::graph::NavigationGraph;
use crate::metadata::Metadata;
use crate::nav::NavFile;
use crate::navjson::NavJsonFile;
use crate::version::{NavJsonVersion, NavVersion};

/// Version of a document, whichever format it is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentVersion {
    Nav(NavVersion),
    NavJson(NavJsonVersion),
}

impl fmt::Display for DocumentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentVersion::Nav(version) => fmt::Display::fmt(version, f),
            DocumentVersion::NavJson(version) => fmt::Display::fmt(version, f),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum VersionedDocument {
    Binary(NavFile),
    Json(NavJsonFile),
}

impl VersionedDocument {
    pub fn version(&self) -> DocumentVersion {
        match self {
            VersionedDocument::Binary(file) => DocumentVersion::Nav(file.version()),
            VersionedDocument::Json(file) => DocumentVersion::NavJson(file.version()),
        }
    }

    pub fn to_graph(&self) -> NavResult<NavigationGraph> {
        match self {
            VersionedDocument::Binary(file) => file.to_graph(),
            VersionedDocument::Json(file) => file.to_graph(),
        }
    }

    /// Metadata is only carried by json documents.
    pub fn metadata(&self) -> Option<Metadata> {
        match self {
            VersionedDocument::Binary(_) => None,
            VersionedDocument::Json(file) => Some(file.metadata()),
        }
    }

    /// Serialized form: raw bytes for nav, text for navjson.
    pub fn to_payload(&self) -> NavResult<Payload> {
        match self {
            VersionedDocument::Binary(file) => file.to_binary().map(Payload::Binary),
            VersionedDocument::Json(file) => file.to_json().map(Payload::Text),
        }
    }
}

/// Serialized output ready to be handed to an output sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    Binary(Vec<u8>),
    Text(String),
}

impl Payload {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Binary(bytes) => bytes,
            Payload::Text(text) => text.as_bytes(),
        }
    }
}
