//! HTTP DTOs for the mind-map scene endpoint.

use serde::{Deserialize, Serialize};

use crate::adapters::render::{DrawCommand, LegendEntry, Scene};
use crate::domain::mindmap::{ContextNode, LayoutPoint, MindMapLayout};

/// Request to lay out and compose a mind-map scene.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneRequest {
    /// Ordered context nodes; `final` kind is reserved for the anchor.
    pub nodes: Vec<ContextNode>,
    /// Caption drawn under the anchor.
    #[serde(default = "default_decision_label")]
    pub decision_label: String,
    /// Drawing surface width in surface units.
    pub width: f64,
    /// Drawing surface height in surface units.
    pub height: f64,
    /// Circle radius; defaults to the classic map size.
    #[serde(default = "default_radius")]
    pub radius: f64,
}

fn default_decision_label() -> String {
    "Decision".to_string()
}

fn default_radius() -> f64 {
    120.0
}

/// Response carrying the geometry and the composed drawing sequence.
#[derive(Debug, Clone, Serialize)]
pub struct SceneResponse {
    pub anchor: LayoutPoint,
    pub points: Vec<LayoutPoint>,
    pub commands: Vec<DrawCommand>,
    pub legend: Vec<LegendEntry>,
}

impl SceneResponse {
    pub fn new(layout: MindMapLayout, scene: Scene) -> Self {
        Self {
            anchor: layout.anchor,
            points: layout.points,
            commands: scene.commands,
            legend: scene.legend,
        }
    }
}
