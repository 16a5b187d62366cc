//! navjson documents.
//!
//! Every document is a JSON object with an integer `version` field. The field
//! is probed first and selects the layout used for the rest of the document.

mod records;

pub use records::{JsonLinkV2, JsonNodeV1, JsonNodeV2, NavJsonMap, NavJsonV1, NavJsonV2};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{NavError, NavResult};
use crate::graph::NavigationGraph;
use crate::metadata::Metadata;
use crate::version::NavJsonVersion;

/// A navjson document at one of the known versions.
#[derive(Clone, Debug, PartialEq)]
pub enum NavJsonFile {
    V1(NavJsonV1),
    V2(NavJsonV2),
}

#[derive(Deserialize)]
struct VersionProbe {
    #[serde(default)]
    version: Option<serde_json::Value>,
}

impl NavJsonFile {
    pub fn version(&self) -> NavJsonVersion {
        match self {
            NavJsonFile::V1(_) => NavJsonVersion::V1,
            NavJsonFile::V2(_) => NavJsonVersion::V2,
        }
    }

    /// Encodes a graph and its metadata at the given version.
    pub fn from_graph(
        graph: &NavigationGraph,
        metadata: &Metadata,
        version: NavJsonVersion,
    ) -> NavResult<Self> {
        graph.validate()?;
        Ok(match version {
            NavJsonVersion::V1 => NavJsonFile::V1(NavJsonV1::from_graph(graph, metadata)),
            NavJsonVersion::V2 => NavJsonFile::V2(NavJsonV2::from_graph(graph, metadata)),
        })
    }

    pub fn to_graph(&self) -> NavResult<NavigationGraph> {
        let graph = match self {
            NavJsonFile::V1(file) => file.to_graph()?,
            NavJsonFile::V2(file) => file.to_graph()?,
        };
        graph.validate()?;
        Ok(graph)
    }

    pub fn metadata(&self) -> Metadata {
        match self {
            NavJsonFile::V1(file) => file.metadata(),
            NavJsonFile::V2(file) => file.metadata(),
        }
    }

    /// Returns the document with its whole metadata block replaced.
    pub fn with_metadata(mut self, metadata: &Metadata) -> Self {
        match &mut self {
            NavJsonFile::V1(file) => file.set_metadata(metadata),
            NavJsonFile::V2(file) => file.set_metadata(metadata),
        }
        self
    }

    /// Serializes the document as pretty-printed JSON.
    pub fn to_json(&self) -> NavResult<String> {
        let result = match self {
            NavJsonFile::V1(file) => serde_json::to_string_pretty(file),
            NavJsonFile::V2(file) => serde_json::to_string_pretty(file),
        };
        result.map_err(|err| NavError::InvalidDocument {
            message: err.to_string(),
            src: String::new(),
            span: (0, 0).into(),
        })
    }

    pub fn from_json(input: &str) -> NavResult<Self> {
        let probe: VersionProbe = parse(input)?;
        let tag = match probe.version {
            Some(value) => value.as_u64().ok_or_else(|| NavError::InvalidDocument {
                message: format!("'version' must be a non-negative integer, found {value}"),
                src: input.to_string(),
                span: (0, 1).into(),
            })?,
            None => {
                return Err(NavError::InvalidDocument {
                    message: "missing 'version' field".to_string(),
                    src: input.to_string(),
                    span: (0, 1).into(),
                })
            }
        };
        let version = NavJsonVersion::from_tag(tag).ok_or(NavError::UnsupportedVersion {
            format: "navjson",
            version: tag,
        })?;
        Ok(match version {
            NavJsonVersion::V1 => NavJsonFile::V1(parse(input)?),
            NavJsonVersion::V2 => NavJsonFile::V2(parse(input)?),
        })
    }
}

fn parse<T: DeserializeOwned>(input: &str) -> NavResult<T> {
    serde_json::from_str(input).map_err(|err| json_deserialize_error(input, &err))
}

#[cold]
#[inline(never)]
fn json_deserialize_error(input: &str, error: &serde_json::Error) -> NavError {
    let (offset, length) = json_error_span(input, error);
    NavError::InvalidDocument {
        message: error.to_string(),
        src: input.to_string(),
        span: (offset, length).into(),
    }
}

fn json_error_span(input: &str, error: &serde_json::Error) -> (usize, usize) {
    let line = error.line();
    let column = error.column();
    if line == 0 || column == 0 {
        return (0, 1);
    }
    let mut current_line = 1usize;
    let mut offset = 0usize;
    for chunk in input.split_inclusive('\n') {
        if current_line == line {
            let column_index = column.saturating_sub(1);
            let byte_index = chunk
                .char_indices()
                .nth(column_index)
                .map(|(idx, _)| idx)
                .unwrap_or(chunk.len().saturating_sub(1));
            offset += byte_index;
            return (offset, 1);
        }
        offset += chunk.len();
        current_line += 1;
    }
    (input.len().saturating_sub(1), 1)
}

#[cfg(test)]
#[path = "tests/navjson_tests.rs"]
mod tests;
