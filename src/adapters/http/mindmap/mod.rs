//! Mind-map scene endpoint (layout + drawing sequence).

mod dto;
mod handlers;
mod routes;

pub use dto::{SceneRequest, SceneResponse};
pub use routes::mindmap_routes;
