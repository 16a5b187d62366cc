//! Document layouts for each navjson version.

use serde::{Deserialize, Serialize};

use crate::error::NavResult;
use crate::graph::{LinkKind, NavLink, NavNode, NavigationGraph, NodeId, Traversal, Vec3};
use crate::metadata::Metadata;

/// The `map` object shared by every navjson version.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavJsonMap {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Version 1: positions and plain link targets; `comments` may be null.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavJsonV1 {
    pub version: u64,
    #[serde(default)]
    pub map: NavJsonMap,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub contributors: Vec<String>,
    pub nodes: Vec<JsonNodeV1>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonNodeV1 {
    pub origin: Vec3,
    #[serde(default)]
    pub links: Vec<NodeId>,
}

/// Version 2: full node and link data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavJsonV2 {
    pub version: u64,
    #[serde(default)]
    pub map: NavJsonMap,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub contributors: Vec<String>,
    pub nodes: Vec<JsonNodeV2>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonNodeV2 {
    pub origin: Vec3,
    #[serde(default)]
    pub flags: u16,
    #[serde(default = "default_radius")]
    pub radius: u16,
    #[serde(default)]
    pub links: Vec<JsonLinkV2>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonLinkV2 {
    pub target: NodeId,
    #[serde(rename = "type", default)]
    pub kind: LinkKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traversal: Option<Traversal>,
}

fn default_radius() -> u16 {
    NavNode::DEFAULT_RADIUS
}

impl NavJsonMap {
    fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            filename: metadata.map_filename.clone(),
            author: metadata.map_author.clone(),
            name: metadata.map_name.clone(),
            urls: metadata.map_urls.clone(),
        }
    }
}

impl NavJsonV1 {
    pub const VERSION: u64 = 1;

    pub fn from_graph(graph: &NavigationGraph, metadata: &Metadata) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| JsonNodeV1 {
                origin: node.origin,
                links: node.links.iter().map(|link| link.target).collect(),
            })
            .collect();
        Self {
            version: Self::VERSION,
            map: NavJsonMap::from_metadata(metadata),
            comments: (!metadata.comments.is_empty()).then(|| metadata.comments.clone()),
            contributors: metadata.contributors.clone(),
            nodes,
        }
    }

    pub fn to_graph(&self) -> NavResult<NavigationGraph> {
        let nodes = self
            .nodes
            .iter()
            .map(|node| {
                let mut out = NavNode::new(node.origin);
                out.links = node.links.iter().copied().map(NavLink::walk).collect();
                out
            })
            .collect();
        Ok(NavigationGraph::new(nodes))
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            map_filename: self.map.filename.clone(),
            map_author: self.map.author.clone(),
            map_name: self.map.name.clone(),
            map_urls: self.map.urls.clone(),
            comments: self.comments.clone().unwrap_or_default(),
            contributors: self.contributors.clone(),
        }
    }

    pub fn set_metadata(&mut self, metadata: &Metadata) {
        self.map = NavJsonMap::from_metadata(metadata);
        self.comments = (!metadata.comments.is_empty()).then(|| metadata.comments.clone());
        self.contributors = metadata.contributors.clone();
    }
}

impl NavJsonV2 {
    pub const VERSION: u64 = 2;

    pub fn from_graph(graph: &NavigationGraph, metadata: &Metadata) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| JsonNodeV2 {
                origin: node.origin,
                flags: node.flags,
                radius: node.radius,
                links: node
                    .links
                    .iter()
                    .map(|link| JsonLinkV2 {
                        target: link.target,
                        kind: link.kind,
                        traversal: link.traversal,
                    })
                    .collect(),
            })
            .collect();
        Self {
            version: Self::VERSION,
            map: NavJsonMap::from_metadata(metadata),
            comments: metadata.comments.clone(),
            contributors: metadata.contributors.clone(),
            nodes,
        }
    }

    pub fn to_graph(&self) -> NavResult<NavigationGraph> {
        let nodes = self
            .nodes
            .iter()
            .map(|node| NavNode {
                origin: node.origin,
                flags: node.flags,
                radius: node.radius,
                links: node
                    .links
                    .iter()
                    .map(|link| NavLink {
                        target: link.target,
                        kind: link.kind,
                        traversal: link.traversal,
                    })
                    .collect(),
            })
            .collect();
        Ok(NavigationGraph::new(nodes))
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            map_filename: self.map.filename.clone(),
            map_author: self.map.author.clone(),
            map_name: self.map.name.clone(),
            map_urls: self.map.urls.clone(),
            comments: self.comments.clone(),
            contributors: self.contributors.clone(),
        }
    }

    pub fn set_metadata(&mut self, metadata: &Metadata) {
        self.map = NavJsonMap::from_metadata(metadata);
        self.comments = metadata.comments.clone();
        self.contributors = metadata.contributors.clone();
    }
}
