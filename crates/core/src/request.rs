//! Immutable description of a single conversion.

use std::path::{Path, PathBuf};

use crate::detect::{derive_output_path, Direction, DirectionChoice};
use crate::metadata::MetadataOverrides;

/// Where the converted document goes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Next to the source, with the extension of the target format.
    #[default]
    Derived,
    Path(PathBuf),
    /// Standard output. `path` is an explicit output path given alongside;
    /// it still names the navjson an upgrade reads its metadata from.
    Stdout { path: Option<PathBuf> },
}

/// What to do when the output file already exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    #[default]
    Ask,
    Always,
    Never,
}

/// Resolved output destination for one conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Stdout,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionRequest {
    source: PathBuf,
    direction: DirectionChoice,
    upgrade: bool,
    output: OutputTarget,
    overwrite: OverwritePolicy,
    silent: bool,
    metadata: MetadataOverrides,
}

impl ConversionRequest {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            direction: DirectionChoice::Auto,
            upgrade: false,
            output: OutputTarget::Derived,
            overwrite: OverwritePolicy::Ask,
            silent: false,
            metadata: MetadataOverrides::default(),
        }
    }

    pub fn with_direction(mut self, direction: DirectionChoice) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_upgrade(mut self, upgrade: bool) -> Self {
        self.upgrade = upgrade;
        self
    }

    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    pub fn with_overwrite(mut self, overwrite: OverwritePolicy) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn with_metadata(mut self, metadata: MetadataOverrides) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn direction(&self) -> DirectionChoice {
        self.direction
    }

    pub fn upgrade(&self) -> bool {
        self.upgrade
    }

    pub fn output(&self) -> &OutputTarget {
        &self.output
    }

    pub fn silent(&self) -> bool {
        self.silent
    }

    pub fn metadata(&self) -> &MetadataOverrides {
        &self.metadata
    }

    /// Policy actually applied: a silent run never prompts, so `Ask` becomes `Never`.
    pub fn overwrite_policy(&self) -> OverwritePolicy {
        match self.overwrite {
            OverwritePolicy::Ask if self.silent => OverwritePolicy::Never,
            policy => policy,
        }
    }

    /// File path the output would occupy, even when writing to stdout.
    pub fn output_path(&self, direction: Direction) -> PathBuf {
        match &self.output {
            OutputTarget::Path(path) | OutputTarget::Stdout { path: Some(path) } => path.clone(),
            OutputTarget::Derived | OutputTarget::Stdout { path: None } => {
                derive_output_path(&self.source, direction)
            }
        }
    }

    pub fn destination(&self, direction: Direction) -> Destination {
        match &self.output {
            OutputTarget::Stdout { .. } => Destination::Stdout,
            _ => Destination::File(self.output_path(direction)),
        }
    }
}
