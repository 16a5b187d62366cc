//! Conversion direction from configuration or file extension.

use std::path::{Path, PathBuf};

pub const NAV_EXTENSION: &str = "nav";
pub const NAVJSON_EXTENSION: &str = "navjson";

/// Direction requested in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DirectionChoice {
    ToJson,
    ToNav,
    #[default]
    Auto,
}

/// A resolved conversion direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Binary nav to navjson.
    ToJson,
    /// navjson to binary nav.
    ToNav,
}

impl Direction {
    pub fn target_extension(self) -> &'static str {
        match self {
            Direction::ToJson => NAVJSON_EXTENSION,
            Direction::ToNav => NAV_EXTENSION,
        }
    }
}

/// Resolves the direction. An explicit choice always wins; otherwise only the
/// extension is looked at, never the content. `None` means unknown.
pub fn detect_direction(path: &Path, choice: DirectionChoice) -> Option<Direction> {
    match choice {
        DirectionChoice::ToJson => Some(Direction::ToJson),
        DirectionChoice::ToNav => Some(Direction::ToNav),
        DirectionChoice::Auto => {
            let extension = path.extension()?.to_str()?;
            if extension.eq_ignore_ascii_case(NAV_EXTENSION) {
                Some(Direction::ToJson)
            } else if extension.eq_ignore_ascii_case(NAVJSON_EXTENSION) {
                Some(Direction::ToNav)
            } else {
                None
            }
        }
    }
}

/// Sibling of `source` with the extension of the opposite format.
pub fn derive_output_path(source: &Path, direction: Direction) -> PathBuf {
    source.with_extension(direction.target_extension())
}

/// File name without extension, used as the default map filename.
pub fn source_stem(source: &Path) -> String {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
