//! Scene composition - turns layout geometry into draw commands.
//!
//! The layout engine produces positions and color tokens; this adapter
//! arranges them into the concrete drawing sequence a 2D surface executes
//! (connection lines first, then markers, then labels) plus the textual
//! legend shown beside the map. Pure data, no drawing surface.

use serde::{Deserialize, Serialize};

use crate::domain::mindmap::{ColorToken, ContextNode, MindMapLayout, Point};

/// Vertical offset of a node label above its marker, in surface units.
pub const LABEL_OFFSET_PX: f64 = 15.0;

/// Vertical offset of the anchor caption below the anchor, in surface units.
pub const ANCHOR_CAPTION_OFFSET_PX: f64 = 35.0;

/// One drawing instruction for the presentation surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DrawCommand {
    /// Connection line from a node marker to the anchor.
    Line { from: Point, to: Point },
    /// Filled circle marker.
    Circle {
        center: Point,
        radius_px: f64,
        color_token: ColorToken,
    },
    /// Text label.
    Label {
        text: String,
        x: f64,
        y: f64,
        weight: LabelWeight,
    },
}

/// Label emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelWeight {
    Regular,
    Bold,
}

/// One legend row: the node's label next to its color swatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color_token: ColorToken,
}

/// A composed scene: ordered draw commands plus the legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
    pub legend: Vec<LegendEntry>,
}

/// Composes the drawing sequence for a laid-out mind map.
///
/// `nodes` must be the same ordered list the layout was computed from;
/// nodes and points are paired by position. Per node: connection line,
/// marker, label above the marker. Then the anchor marker and the
/// decision caption below it.
pub fn compose_scene(
    nodes: &[ContextNode],
    layout: &MindMapLayout,
    decision_label: &str,
) -> Scene {
    let anchor = layout.anchor.position();
    let mut commands = Vec::with_capacity(layout.points.len() * 3 + 2);

    for (node, point) in nodes.iter().zip(&layout.points) {
        commands.push(DrawCommand::Line {
            from: point.position(),
            to: anchor,
        });
        commands.push(DrawCommand::Circle {
            center: point.position(),
            radius_px: point.radius_px,
            color_token: point.color_token,
        });
        commands.push(DrawCommand::Label {
            text: node.label.clone(),
            x: point.x,
            y: point.y - LABEL_OFFSET_PX,
            weight: LabelWeight::Regular,
        });
    }

    commands.push(DrawCommand::Circle {
        center: anchor,
        radius_px: layout.anchor.radius_px,
        color_token: layout.anchor.color_token,
    });
    commands.push(DrawCommand::Label {
        text: decision_label.to_string(),
        x: anchor.x,
        y: anchor.y + ANCHOR_CAPTION_OFFSET_PX,
        weight: LabelWeight::Bold,
    });

    let legend = nodes
        .iter()
        .zip(&layout.points)
        .map(|(node, point)| LegendEntry {
            label: node.label.clone(),
            color_token: point.color_token,
        })
        .collect();

    Scene { commands, legend }
}
