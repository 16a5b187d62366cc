//! Human-authored navjson metadata and the policy that decides where it comes from.

use crate::navjson::NavJsonFile;

/// The metadata block of a navjson document. Always replaced as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    pub map_filename: String,
    pub map_author: String,
    pub map_name: String,
    pub map_urls: Vec<String>,
    pub comments: String,
    pub contributors: Vec<String>,
}

/// Metadata values given on the command line. Repeated values keep their order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetadataOverrides {
    pub map_filename: Option<String>,
    pub map_author: Option<String>,
    pub map_name: Option<String>,
    pub map_urls: Vec<String>,
    pub comment: Option<String>,
    pub contributors: Vec<String>,
}

impl MetadataOverrides {
    /// Builds a metadata block, falling back to `source_stem` for the map filename.
    pub fn resolve(&self, source_stem: &str) -> Metadata {
        Metadata {
            map_filename: self
                .map_filename
                .clone()
                .unwrap_or_else(|| source_stem.to_string()),
            map_author: self.map_author.clone().unwrap_or_default(),
            map_name: self.map_name.clone().unwrap_or_default(),
            map_urls: self.map_urls.clone(),
            comments: self.comment.clone().unwrap_or_default(),
            contributors: self.contributors.clone(),
        }
    }
}

/// Where the metadata of a freshly converted navjson document comes from.
#[derive(Clone, Copy, Debug)]
pub enum MergePolicy<'a> {
    /// Fill the block from configuration overrides.
    Fresh {
        overrides: &'a MetadataOverrides,
        source_stem: &'a str,
    },
    /// Keep the block of a previously written document; overrides are ignored.
    Preserve(&'a NavJsonFile),
}

impl MergePolicy<'_> {
    pub fn apply(&self, fresh: NavJsonFile) -> NavJsonFile {
        let metadata = match self {
            MergePolicy::Fresh {
                overrides,
                source_stem,
            } => overrides.resolve(source_stem),
            MergePolicy::Preserve(prior) => prior.metadata(),
        };
        fresh.with_metadata(&metadata)
    }
}
