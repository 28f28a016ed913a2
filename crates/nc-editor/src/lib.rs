//! Editor engine for the node canvas: pointer/wheel input in, view,
//! selection and node positions out.

pub mod config;
pub mod input;
pub mod interaction;
pub mod render_loop;

pub use config::InteractionConfig;
pub use input::{InputEvent, Modifiers};
pub use interaction::{Cursor, Interaction, Mode, Response};
pub use render_loop::RenderLoop;
