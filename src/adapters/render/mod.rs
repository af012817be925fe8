//! Presentation adapters for the mind-map geometry.

mod scene;

pub use scene::{
    compose_scene, DrawCommand, LabelWeight, LegendEntry, Scene, ANCHOR_CAPTION_OFFSET_PX,
    LABEL_OFFSET_PX,
};
