mod convert;
mod detect;
mod document;
mod error;
mod graph;
mod metadata;
mod nav;
mod navjson;
mod pipeline;
mod request;
mod sink;
mod terminal;
mod version;

pub use convert::{nav_to_navjson, navjson_to_nav};
pub use detect::{
    derive_output_path, detect_direction, source_stem, Direction, DirectionChoice, NAVJSON_EXTENSION,
    NAV_EXTENSION,
};
pub use document::{DocumentVersion, Payload, VersionedDocument};
pub use error::{ConvertError, NavError, NavResult};
pub use graph::{LinkKind, NavLink, NavNode, NavigationGraph, NodeId, Traversal, Vec3};
pub use metadata::{MergePolicy, Metadata, MetadataOverrides};
pub use nav::{
    LinkV2, LinkV3, NavFile, NavFileV1, NavFileV2, NavFileV3, NodeV1, NodeV2, NodeV3,
};
pub use navjson::{JsonLinkV2, JsonNodeV1, JsonNodeV2, NavJsonFile, NavJsonMap, NavJsonV1, NavJsonV2};
pub use pipeline::{ConversionOutcome, ConversionReport, Pipeline, OVERWRITE_PROMPT};
pub use request::{ConversionRequest, Destination, OutputTarget, OverwritePolicy};
pub use sink::{atomic_write, write_payload};
pub use terminal::{StdTerminal, Terminal};
pub use version::{NavJsonVersion, NavVersion, NAV_BINARY_MAGIC, NAV_HEADER_LEN};
