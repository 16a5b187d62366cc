//! Version-agnostic navigation graph.
//!
//! Every codec decodes into a [`NavigationGraph`] and encodes from one. Older
//! document versions carry less data than the graph can hold; fields they do
//! not know about are left at their defaults when decoding.
//!
//! # Contracts
//! - **Invariant**: every link target indexes an existing node.
//! - **Invariant**: every coordinate is finite, so the graph survives a trip
//!   through JSON.
//! - **Postcondition**: a graph decoded from the newest version re-encodes to
//!   an identical graph.

use serde::{Deserialize, Serialize};

use crate::error::{NavError, NavResult};

/// World-space position.
pub type Vec3 = [f32; 3];

/// Index of a node inside [`NavigationGraph::nodes`].
pub type NodeId = u32;

/// How a link between two nodes is traversed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    #[default]
    Walk,
    LongJump,
    Teleport,
    WalkOffLedge,
    BarrierJump,
    Elevator,
    Ladder,
}

impl LinkKind {
    pub const ALL: [LinkKind; 7] = [
        LinkKind::Walk,
        LinkKind::LongJump,
        LinkKind::Teleport,
        LinkKind::WalkOffLedge,
        LinkKind::BarrierJump,
        LinkKind::Elevator,
        LinkKind::Ladder,
    ];

    pub fn code(self) -> u8 {
        match self {
            LinkKind::Walk => 0,
            LinkKind::LongJump => 1,
            LinkKind::Teleport => 2,
            LinkKind::WalkOffLedge => 3,
            LinkKind::BarrierJump => 4,
            LinkKind::Elevator => 5,
            LinkKind::Ladder => 6,
        }
    }

    pub fn from_code(code: u8) -> NavResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| NavError::InvalidGraph(format!("unknown link kind {code}")))
    }
}

/// Precomputed movement data for links that are not a plain walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Traversal {
    pub funnel: Vec3,
    pub start: Vec3,
    pub end: Vec3,
    pub ladder_plane: Vec3,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    pub target: NodeId,
    pub kind: LinkKind,
    pub traversal: Option<Traversal>,
}

impl NavLink {
    pub fn walk(target: NodeId) -> Self {
        Self {
            target,
            kind: LinkKind::Walk,
            traversal: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavNode {
    pub origin: Vec3,
    pub flags: u16,
    pub radius: u16,
    pub links: Vec<NavLink>,
}

impl NavNode {
    pub const DEFAULT_RADIUS: u16 = 16;

    pub fn new(origin: Vec3) -> Self {
        Self {
            origin,
            flags: 0,
            radius: Self::DEFAULT_RADIUS,
            links: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationGraph {
    pub nodes: Vec<NavNode>,
}

impl NavigationGraph {
    pub fn new(nodes: Vec<NavNode>) -> Self {
        Self { nodes }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Checks that every link points at an existing node and that every
    /// coordinate is finite.
    pub fn validate(&self) -> NavResult<()> {
        let node_count = self.nodes.len();
        for (index, node) in self.nodes.iter().enumerate() {
            if !is_finite(&node.origin) {
                return Err(NavError::InvalidGraph(format!(
                    "node {index} has a non-finite origin"
                )));
            }
            for link in &node.links {
                if link.target as usize >= node_count {
                    return Err(NavError::InvalidGraph(format!(
                        "node {index} links to missing node {}",
                        link.target
                    )));
                }
                if let Some(traversal) = &link.traversal {
                    let points = [
                        &traversal.funnel,
                        &traversal.start,
                        &traversal.end,
                        &traversal.ladder_plane,
                    ];
                    if !points.into_iter().all(is_finite) {
                        return Err(NavError::InvalidGraph(format!(
                            "node {index} link to node {} has non-finite traversal data",
                            link.target
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

fn is_finite(point: &Vec3) -> bool {
    point.iter().all(|coord| coord.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_nodes() -> NavigationGraph {
        let mut a = NavNode::new([0.0, 0.0, 24.0]);
        a.links.push(NavLink::walk(1));
        let mut b = NavNode::new([64.0, 0.0, 24.0]);
        b.links.push(NavLink::walk(0));
        NavigationGraph::new(vec![a, b])
    }

    #[test]
    fn validate_accepts_closed_graph() {
        let graph = two_nodes();
        graph.validate().expect("closed graph is valid");
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn validate_rejects_dangling_link() {
        let mut graph = two_nodes();
        graph.nodes[1].links.push(NavLink::walk(9));
        let err = graph.validate().expect_err("dangling link must fail");
        assert!(err.to_string().contains("missing node 9"));
    }

    #[test]
    fn link_kind_codes_are_stable() {
        for kind in LinkKind::ALL {
            assert_eq!(LinkKind::from_code(kind.code()).expect("known code"), kind);
        }
        assert!(LinkKind::from_code(200).is_err());
    }

    #[test]
    fn validate_rejects_non_finite_origin() {
        let mut graph = two_nodes();
        graph.nodes[0].origin = [f32::NAN, 0.0, f32::INFINITY];
        let err = graph.validate().expect_err("NaN origin must fail");
        assert!(matches!(err, NavError::InvalidGraph(_)));
        assert!(err.to_string().contains("node 0 has a non-finite origin"));
    }

    #[test]
    fn validate_rejects_non_finite_traversal() {
        let mut graph = two_nodes();
        graph.nodes[1].links[0] = NavLink {
            target: 0,
            kind: LinkKind::Ladder,
            traversal: Some(Traversal {
                ladder_plane: [0.0, f32::NEG_INFINITY, 0.0],
                ..Traversal::default()
            }),
        };
        let err = graph.validate().expect_err("infinite ladder plane must fail");
        assert!(err.to_string().contains("non-finite traversal data"));
    }
}
