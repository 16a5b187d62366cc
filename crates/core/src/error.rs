use std::path::PathBuf;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub type NavResult<T> = Result<T, NavError>;

#[derive(Debug, Error, Diagnostic)]
pub enum NavError {
    #[error("unsupported {format} version {version}")]
    #[diagnostic(
        code("nav.unsupported_version"),
        help("only versions known to this build can be converted")
    )]
    UnsupportedVersion { format: &'static str, version: u64 },
    #[error("binary format error: {0}")]
    #[diagnostic(code("nav.binary_format"))]
    BinaryFormat(String),
    #[error("invalid navjson document: {message}")]
    #[diagnostic(code("nav.invalid_document"))]
    InvalidDocument {
        message: String,
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },
    #[error("invalid navigation graph: {0}")]
    #[diagnostic(code("nav.invalid_graph"))]
    InvalidGraph(String),
}

/// Failures that end a conversion without producing output.
#[derive(Debug, Error, Diagnostic)]
pub enum ConvertError {
    #[error("Could not identify the file {}", .path.display())]
    #[diagnostic(
        code("nav2json.unknown_format"),
        help("use -json or -nav to pick the conversion direction")
    )]
    UnknownFormat { path: PathBuf },
    #[error("Cannot upgrade: no existing navjson at {}", .path.display())]
    #[diagnostic(
        code("nav2json.missing_upgrade_target"),
        help("run a plain conversion first, or point -out at the navjson to upgrade")
    )]
    MissingUpgradeTarget { path: PathBuf },
    #[error("{} ({source})", .path.display())]
    #[diagnostic(code("nav2json.io"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to convert {}: {source}", .path.display())]
    #[diagnostic(code("nav2json.codec"))]
    Codec {
        path: PathBuf,
        #[source]
        source: NavError,
    },
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn codec(path: impl Into<PathBuf>, source: NavError) -> Self {
        ConvertError::Codec {
            path: path.into(),
            source,
        }
    }

    /// Returns the codec failure behind this error, if any.
    pub fn nav_error(&self) -> Option<&NavError> {
        match self {
            ConvertError::Codec { source, .. } => Some(source),
            _ => None,
        }
    }
}
