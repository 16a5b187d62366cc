//! The conversion pipeline.
//!
//! Detect → Load → Convert → Merge (upgrade only) → Confirm overwrite → Write.
//! Every stage either hands its result to the next one or ends the run; the
//! output is only touched once everything before it has succeeded.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::convert::{nav_to_navjson, navjson_to_nav};
use crate::detect::{detect_direction, source_stem, Direction};
use crate::document::{DocumentVersion, VersionedDocument};
use crate::error::ConvertError;
use crate::metadata::MergePolicy;
use crate::nav::NavFile;
use crate::navjson::NavJsonFile;
use crate::request::{ConversionRequest, Destination, OverwritePolicy};
use crate::sink::write_payload;
use crate::terminal::Terminal;

pub const OVERWRITE_PROMPT: &str =
    "The target file already exists. Do you wish to overwrite? (y/n): ";

/// Summary of a finished conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub source_version: DocumentVersion,
    pub destination: Destination,
    pub target_version: DocumentVersion,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Converted {} ({}) to ",
            display_name(&self.source),
            self.source_version
        )?;
        match &self.destination {
            Destination::File(path) => write!(f, "{}", display_name(path))?,
            Destination::Stdout => write!(f, "stdout")?,
        }
        write!(f, " ({})", self.target_version)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionOutcome {
    Converted(ConversionReport),
    /// The output file exists and overwriting it was refused. Nothing was written.
    Declined,
}

pub struct Pipeline<'a, T: Terminal + ?Sized> {
    request: &'a ConversionRequest,
    terminal: &'a mut T,
}

impl<'a, T: Terminal + ?Sized> Pipeline<'a, T> {
    pub fn new(request: &'a ConversionRequest, terminal: &'a mut T) -> Self {
        Self { request, terminal }
    }

    /// Runs the conversion and reports the result as one line, unless silent.
    pub fn run(&mut self) -> Result<ConversionOutcome, ConvertError> {
        let result = self.convert();
        if !self.request.silent() {
            let messages = self.terminal.messages();
            let written = match &result {
                Ok(ConversionOutcome::Converted(report)) => writeln!(messages, "{report}"),
                Ok(ConversionOutcome::Declined) => Ok(()),
                Err(err) => writeln!(messages, "{err}"),
            };
            if let Err(err) = written {
                warn!(error = %err, "failed to write status line");
            }
        }
        result
    }

    /// Runs the conversion without reporting.
    #[instrument(skip_all, fields(source = %self.request.source().display()))]
    pub fn convert(&mut self) -> Result<ConversionOutcome, ConvertError> {
        let request = self.request;
        let source_path = request.source();
        let direction = detect_direction(source_path, request.direction()).ok_or_else(
            || ConvertError::UnknownFormat {
                path: source_path.to_path_buf(),
            },
        )?;
        debug!(?direction, "direction resolved");

        let source = load_document(source_path, direction)?;
        let source_version = source.version();
        debug!(%source_version, "source loaded");

        let converted = self.transform(&source, direction)?;
        let target_version = converted.version();
        let payload = converted
            .to_payload()
            .map_err(|err| ConvertError::codec(source_path, err))?;

        let destination = request.destination(direction);
        if let Destination::File(path) = &destination {
            if path.exists() && !self.confirm_overwrite()? {
                info!(path = %path.display(), "overwrite declined");
                return Ok(ConversionOutcome::Declined);
            }
        }

        let write_path = match &destination {
            Destination::File(path) => path.clone(),
            Destination::Stdout => PathBuf::from("<stdout>"),
        };
        write_payload(&destination, &payload, self.terminal.output())
            .map_err(|err| ConvertError::io(write_path, err))?;
        info!(%target_version, "conversion written");

        Ok(ConversionOutcome::Converted(ConversionReport {
            source: source_path.to_path_buf(),
            source_version,
            destination,
            target_version,
        }))
    }

    fn transform(
        &self,
        source: &VersionedDocument,
        direction: Direction,
    ) -> Result<VersionedDocument, ConvertError> {
        let source_path = self.request.source();
        match source {
            VersionedDocument::Binary(file) => {
                let fresh =
                    nav_to_navjson(file).map_err(|err| ConvertError::codec(source_path, err))?;
                let merged = if self.request.upgrade() {
                    let prior = self.load_upgrade_target(direction)?;
                    MergePolicy::Preserve(&prior).apply(fresh)
                } else {
                    let stem = source_stem(source_path);
                    MergePolicy::Fresh {
                        overrides: self.request.metadata(),
                        source_stem: &stem,
                    }
                    .apply(fresh)
                };
                Ok(VersionedDocument::Json(merged))
            }
            VersionedDocument::Json(file) => {
                if self.request.upgrade() {
                    warn!("upgrade only applies to nav to navjson conversions, ignoring it");
                }
                let nav =
                    navjson_to_nav(file).map_err(|err| ConvertError::codec(source_path, err))?;
                Ok(VersionedDocument::Binary(nav))
            }
        }
    }

    fn load_upgrade_target(&self, direction: Direction) -> Result<NavJsonFile, ConvertError> {
        let path = self.request.output_path(direction);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ConvertError::MissingUpgradeTarget { path });
            }
            Err(err) => return Err(ConvertError::io(path, err)),
        };
        let prior = NavJsonFile::from_json(&text).map_err(|err| ConvertError::codec(&path, err))?;
        debug!(path = %path.display(), version = %prior.version(), "upgrade target loaded");
        Ok(prior)
    }

    fn confirm_overwrite(&mut self) -> Result<bool, ConvertError> {
        match self.request.overwrite_policy() {
            OverwritePolicy::Always => Ok(true),
            OverwritePolicy::Never => Ok(false),
            OverwritePolicy::Ask => {
                let messages = self.terminal.messages();
                let shown = write!(messages, "{OVERWRITE_PROMPT}").and_then(|()| messages.flush());
                if let Err(err) = shown {
                    warn!(error = %err, "failed to show overwrite prompt");
                }
                let answer = loop {
                    match self.terminal.read_key() {
                        Ok(Some('y' | 'Y')) => break true,
                        Ok(Some('n' | 'N')) | Ok(None) => break false,
                        Ok(Some(_)) => continue,
                        Err(err) => return Err(ConvertError::io("<stdin>", err)),
                    }
                };
                if let Err(err) = writeln!(self.terminal.messages()) {
                    warn!(error = %err, "failed to finish overwrite prompt");
                }
                Ok(answer)
            }
        }
    }
}

fn load_document(path: &Path, direction: Direction) -> Result<VersionedDocument, ConvertError> {
    match direction {
        Direction::ToJson => {
            let bytes = fs::read(path).map_err(|err| ConvertError::io(path, err))?;
            NavFile::from_binary(&bytes)
                .map(VersionedDocument::Binary)
                .map_err(|err| ConvertError::codec(path, err))
        }
        Direction::ToNav => {
            let text = fs::read_to_string(path).map_err(|err| ConvertError::io(path, err))?;
            NavJsonFile::from_json(&text)
                .map(VersionedDocument::Json)
                .map_err(|err| ConvertError::codec(path, err))
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
