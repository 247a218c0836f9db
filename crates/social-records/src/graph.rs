//! Nodes and directed edges handed to a graph renderer.

use serde::{Deserialize, Serialize};

/// A persona as a graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Persona handle, also the node id
    pub id: String,
    pub faction: String,
    /// Hover text: `(handle)[faction] bio`
    pub label: String,
}

impl GraphNode {
    pub fn new(handle: impl Into<String>, faction: impl Into<String>, bio: &str) -> Self {
        let id = handle.into();
        let faction = faction.into();
        let label = format!("({})[{}] {}", id, faction, bio);
        Self { id, faction, label }
    }
}

/// `follower` follows `followed`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectedEdge {
    pub follower: String,
    pub followed: String,
}

impl DirectedEdge {
    pub fn new(follower: impl Into<String>, followed: impl Into<String>) -> Self {
        Self {
            follower: follower.into(),
            followed: followed.into(),
        }
    }
}

/// The two collections a renderer consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<DirectedEdge>,
}

impl GraphExport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: GraphNode) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: DirectedEdge) {
        self.edges.push(edge);
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn has_edge(&self, follower: &str, followed: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.follower == follower && e.followed == followed)
    }

    /// Edges pointing at nodes that were never added.
    pub fn dangling_edges(&self) -> Vec<&DirectedEdge> {
        self.edges
            .iter()
            .filter(|e| !self.has_node(&e.follower) || !self.has_node(&e.followed))
            .collect()
    }
}
