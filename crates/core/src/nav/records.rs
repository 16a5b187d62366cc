//! Payload layouts for each binary nav version.

use serde::{Deserialize, Serialize};

use crate::error::NavResult;
use crate::graph::{LinkKind, NavLink, NavNode, NavigationGraph, NodeId, Traversal, Vec3};

/// Version 1: positions and plain walk links.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavFileV1 {
    pub nodes: Vec<NodeV1>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeV1 {
    pub origin: Vec3,
    pub links: Vec<NodeId>,
}

/// Version 2: adds node flags, node radius and link kinds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavFileV2 {
    pub nodes: Vec<NodeV2>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeV2 {
    pub origin: Vec3,
    pub flags: u16,
    pub radius: u16,
    pub links: Vec<LinkV2>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkV2 {
    pub target: NodeId,
    pub kind: u8,
}

/// Version 3: adds per-link traversal data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavFileV3 {
    pub nodes: Vec<NodeV3>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeV3 {
    pub origin: Vec3,
    pub flags: u16,
    pub radius: u16,
    pub links: Vec<LinkV3>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkV3 {
    pub target: NodeId,
    pub kind: u8,
    pub traversal: Option<Traversal>,
}

impl NavFileV1 {
    pub fn from_graph(graph: &NavigationGraph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| NodeV1 {
                origin: node.origin,
                links: node.links.iter().map(|link| link.target).collect(),
            })
            .collect();
        Self { nodes }
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
}

impl NavFileV2 {
    pub fn from_graph(graph: &NavigationGraph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| NodeV2 {
                origin: node.origin,
                flags: node.flags,
                radius: node.radius,
                links: node
                    .links
                    .iter()
                    .map(|link| LinkV2 {
                        target: link.target,
                        kind: link.kind.code(),
                    })
                    .collect(),
            })
            .collect();
        Self { nodes }
    }

    pub fn to_graph(&self) -> NavResult<NavigationGraph> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let mut links = Vec::with_capacity(node.links.len());
            for link in &node.links {
                links.push(NavLink {
                    target: link.target,
                    kind: LinkKind::from_code(link.kind)?,
                    traversal: None,
                });
            }
            nodes.push(NavNode {
                origin: node.origin,
                flags: node.flags,
                radius: node.radius,
                links,
            });
        }
        Ok(NavigationGraph::new(nodes))
    }
}

impl NavFileV3 {
    pub fn from_graph(graph: &NavigationGraph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| NodeV3 {
                origin: node.origin,
                flags: node.flags,
                radius: node.radius,
                links: node
                    .links
                    .iter()
                    .map(|link| LinkV3 {
                        target: link.target,
                        kind: link.kind.code(),
                        traversal: link.traversal,
                    })
                    .collect(),
            })
            .collect();
        Self { nodes }
    }

    pub fn to_graph(&self) -> NavResult<NavigationGraph> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let mut links = Vec::with_capacity(node.links.len());
            for link in &node.links {
                links.push(NavLink {
                    target: link.target,
                    kind: LinkKind::from_code(link.kind)?,
                    traversal: link.traversal,
                });
            }
            nodes.push(NavNode {
                origin: node.origin,
                flags: node.flags,
                radius: node.radius,
                links,
            });
        }
        Ok(NavigationGraph::new(nodes))
    }
}
