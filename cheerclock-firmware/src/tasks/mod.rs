//! Embassy async tasks

pub mod net;
pub mod render;

pub use net::net_task;
pub use render::render_task;
