//! Binary nav documents.
//!
//! Layout: magic (4 bytes), version (`u16` LE), CRC32 of the payload (`u32`
//! LE), payload length (`u32` LE), then a postcard payload whose shape is
//! picked by the version tag.

mod records;

pub use records::{
    LinkV2, LinkV3, NavFileV1, NavFileV2, NavFileV3, NodeV1, NodeV2, NodeV3,
};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{NavError, NavResult};
use crate::graph::NavigationGraph;
use crate::version::{NavVersion, NAV_BINARY_MAGIC, NAV_HEADER_LEN};

/// A binary nav document at one of the known versions.
#[derive(Clone, Debug, PartialEq)]
pub enum NavFile {
    V1(NavFileV1),
    V2(NavFileV2),
    V3(NavFileV3),
}

impl NavFile {
    pub fn version(&self) -> NavVersion {
        match self {
            NavFile::V1(_) => NavVersion::V1,
            NavFile::V2(_) => NavVersion::V2,
            NavFile::V3(_) => NavVersion::V3,
        }
    }

    /// Encodes a graph at the given version. Data the version cannot carry is dropped.
    pub fn from_graph(graph: &NavigationGraph, version: NavVersion) -> NavResult<Self> {
        graph.validate()?;
        Ok(match version {
            NavVersion::V1 => NavFile::V1(NavFileV1::from_graph(graph)),
            NavVersion::V2 => NavFile::V2(NavFileV2::from_graph(graph)),
            NavVersion::V3 => NavFile::V3(NavFileV3::from_graph(graph)),
        })
    }

    pub fn to_graph(&self) -> NavResult<NavigationGraph> {
        let graph = match self {
            NavFile::V1(file) => file.to_graph()?,
            NavFile::V2(file) => file.to_graph()?,
            NavFile::V3(file) => file.to_graph()?,
        };
        graph.validate()?;
        Ok(graph)
    }

    /// Serializes the document with magic bytes, version, and checksum.
    pub fn to_binary(&self) -> NavResult<Vec<u8>> {
        let payload = match self {
            NavFile::V1(file) => encode_payload(file)?,
            NavFile::V2(file) => encode_payload(file)?,
            NavFile::V3(file) => encode_payload(file)?,
        };
        let checksum = crc32fast::hash(&payload);
        let payload_len = u32::try_from(payload.len()).map_err(|_| {
            binary_format_error("navigation graph too large for binary format")
        })?;
        let mut output = Vec::with_capacity(NAV_HEADER_LEN + payload.len());
        output.extend_from_slice(&NAV_BINARY_MAGIC);
        output.extend_from_slice(&self.version().tag().to_le_bytes());
        output.extend_from_slice(&checksum.to_le_bytes());
        output.extend_from_slice(&payload_len.to_le_bytes());
        output.extend_from_slice(&payload);
        Ok(output)
    }

    /// Reads the version tag first, then decodes the payload with that version's layout.
    pub fn from_binary(input: &[u8]) -> NavResult<Self> {
        if input.len() < NAV_HEADER_LEN {
            return Err(binary_format_error("nav data too small"));
        }
        if input[0..4] != NAV_BINARY_MAGIC {
            return Err(binary_format_error("missing nav magic bytes"));
        }
        let tag = u16::from_le_bytes([input[4], input[5]]);
        let version = NavVersion::from_tag(tag).ok_or(NavError::UnsupportedVersion {
            format: "nav",
            version: u64::from(tag),
        })?;
        let checksum = u32::from_le_bytes([input[6], input[7], input[8], input[9]]);
        let payload_len = u32::from_le_bytes([input[10], input[11], input[12], input[13]]) as usize;
        let payload = input
            .get(NAV_HEADER_LEN..)
            .ok_or_else(|| binary_format_error("missing payload"))?;
        if payload.len() != payload_len {
            return Err(binary_format_error("payload length mismatch"));
        }
        if crc32fast::hash(payload) != checksum {
            return Err(binary_format_error("payload checksum mismatch"));
        }
        Ok(match version {
            NavVersion::V1 => NavFile::V1(decode_payload(payload)?),
            NavVersion::V2 => NavFile::V2(decode_payload(payload)?),
            NavVersion::V3 => NavFile::V3(decode_payload(payload)?),
        })
    }
}

fn encode_payload<T: Serialize>(value: &T) -> NavResult<Vec<u8>> {
    postcard::to_allocvec(value).map_err(binary_serialize_error)
}

fn decode_payload<T: DeserializeOwned>(payload: &[u8]) -> NavResult<T> {
    postcard::from_bytes(payload).map_err(binary_serialize_error)
}

#[cold]
#[inline(never)]
fn binary_format_error(message: impl Into<String>) -> NavError {
    NavError::BinaryFormat(message.into())
}

#[cold]
#[inline(never)]
fn binary_serialize_error(error: impl std::fmt::Display) -> NavError {
    NavError::BinaryFormat(format!("binary serialization error: {error}"))
}

#[cfg(test)]
#[path = "tests/nav_tests.rs"]
mod tests;
