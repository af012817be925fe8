//! Radial mind-map layout.
//!
//! Pure geometry: an ordered list of context nodes is placed evenly around
//! a circle, with the decision anchor at the center. Node i sits at angle
//! `-90° + i·(360°/N)` proceeding clockwise (surface coordinates, y grows
//! downward), so the first node is always at 12 o'clock and identical
//! ordered input yields bit-identical output. Rendering the geometry is a
//! separate presentation step; nothing here touches a drawing surface.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

use super::node::{ColorToken, ContextNode};

/// Marker radius for a context node, in surface units.
pub const NODE_RADIUS_PX: f64 = 8.0;

/// Marker radius for the central anchor, in surface units.
pub const ANCHOR_RADIUS_PX: f64 = 15.0;

/// A position on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Placed geometry and styling for one node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
    /// Marker size in surface units.
    pub radius_px: f64,
    /// Semantic color key, resolved by the presentation surface.
    pub color_token: ColorToken,
}

impl LayoutPoint {
    /// Position of this point.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Output of one layout computation: the synthesized anchor plus one
/// placed point per input node, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindMapLayout {
    pub anchor: LayoutPoint,
    pub points: Vec<LayoutPoint>,
}

/// Layout computation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// The circle radius must be a positive, finite number.
    #[error("invalid layout radius {0}: must be positive and finite")]
    InvalidRadius(f64),
}

/// Places `nodes` evenly around a circle of `radius` centered at `center`.
///
/// An empty node list is a valid degenerate case and returns the anchor
/// with no points. Node count is unbounded; visual crowding past a
/// practical limit is the caller's concern.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidRadius`] when `radius` is zero, negative,
/// or not finite.
pub fn layout(
    nodes: &[ContextNode],
    center: Point,
    radius: f64,
) -> Result<MindMapLayout, LayoutError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(LayoutError::InvalidRadius(radius));
    }

    let anchor = LayoutPoint {
        x: center.x,
        y: center.y,
        radius_px: ANCHOR_RADIUS_PX,
        color_token: ColorToken::Anchor,
    };

    let n = nodes.len();
    let points = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let angle = -FRAC_PI_2 + (i as f64 / n as f64) * TAU;
            LayoutPoint {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
                radius_px: NODE_RADIUS_PX,
                color_token: ColorToken::for_kind(node.kind),
            }
        })
        .collect();

    Ok(MindMapLayout { anchor, points })
}
