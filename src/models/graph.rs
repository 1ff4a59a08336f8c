//! Sortie map graphs

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::RenderError;

/// Node category: decides the marker colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCategory {
    pub name: String,
    pub color: Rgb,
}

/// A directed, labelled route to another node of the same graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Index of the destination node
    pub target: usize,
    /// Legend text, e.g. a probability
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapNode {
    /// Position in native map pixels
    pub position: (i32, i32),
    /// One or two characters drawn on the marker
    pub symbol: String,
    pub category: NodeCategory,
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// A node-and-route diagram over a background of `map_size` pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub map_size: (u32, u32),
    pub nodes: Vec<MapNode>,
}

impl Graph {
    /// Reject any route whose target is not a node of this graph.
    pub fn validate(&self) -> Result<(), RenderError> {
        let len = self.nodes.len();
        for (node, n) in self.nodes.iter().enumerate() {
            if let Some(route) = n.routes.iter().find(|r| r.target >= len) {
                return Err(RenderError::InvalidGraph { node, target: route.target, len });
            }
        }
        Ok(())
    }

    /// Nodes with at least one outbound route, with their indices.
    pub fn routed_nodes(&self) -> impl Iterator<Item = (usize, &MapNode)> {
        self.nodes.iter().enumerate().filter(|(_, n)| !n.routes.is_empty())
    }

    pub fn route_count(&self) -> usize {
        self.nodes.iter().map(|n| n.routes.len()).sum()
    }
}
