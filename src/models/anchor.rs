use serde::{Deserialize, Serialize};

/// Which side of the symbol an edge guard bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardSide {
    /// Start pattern side
    Left,
    /// Stop pattern side
    Right,
}

impl GuardSide {
    /// The run edge that bounds the symbol on this side
    pub fn outer_edge(self) -> AnchorEdge {
        match self {
            GuardSide::Left => AnchorEdge::Leading,
            GuardSide::Right => AnchorEdge::Trailing,
        }
    }
}

/// Which end of a dark run is reported as the anchor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorEdge {
    /// First dark pixel of the run
    Leading,
    /// First bright pixel after the run
    Trailing,
}

/// Dark run found in one scan row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedAnchor {
    /// First dark column
    pub left: usize,
    /// One past the last dark column
    pub right: usize,
    /// Row index
    pub y: usize,
    /// Qualifier score
    pub score: f32,
}

impl DetectedAnchor {
    /// Run width in pixels
    pub fn width(&self) -> usize {
        self.right - self.left
    }

    /// Column of the requested edge
    pub fn edge(&self, edge: AnchorEdge) -> usize {
        match edge {
            AnchorEdge::Leading => self.left,
            AnchorEdge::Trailing => self.right,
        }
    }
}
