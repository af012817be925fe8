//! Mind-map layout domain.
//!
//! Maps an ordered list of context nodes plus one decision anchor to 2D
//! positions and visual attributes, suitable for any rendering surface.
//! The scene adapter in `crate::adapters::render` turns this geometry into
//! concrete draw commands.

mod layout;
mod node;

pub use layout::{
    layout, LayoutError, LayoutPoint, MindMapLayout, Point, ANCHOR_RADIUS_PX, NODE_RADIUS_PX,
};
pub use node::{ColorToken, ContextNode, NodeKind};
