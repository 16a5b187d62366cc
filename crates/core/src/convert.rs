//! Format conversion through the navigation graph.
//!
//! Conversions always write the newest version of the target format, whatever
//! version the source was in.

use crate::error::NavResult;
use crate::metadata::Metadata;
use crate::nav::NavFile;
use crate::navjson::NavJsonFile;
use crate::version::{NavJsonVersion, NavVersion};

/// Binary nav to the newest navjson. The metadata block starts out empty.
pub fn nav_to_navjson(source: &NavFile) -> NavResult<NavJsonFile> {
    let graph = source.to_graph()?;
    NavJsonFile::from_graph(&graph, &Metadata::default(), NavJsonVersion::LATEST)
}

/// navjson to the newest binary nav. Metadata has no binary counterpart and is dropped.
pub fn navjson_to_nav(source: &NavJsonFile) -> NavResult<NavFile> {
    let graph = source.to_graph()?;
    NavFile::from_graph(&graph, NavVersion::LATEST)
}
