//! Rendering side of the node canvas: what is under the pointer, and what a
//! frame looks like.

pub mod frame;
pub mod hit;
pub mod paint;
pub mod theme;

pub use frame::{DrawCommand, Highlight, edge_curve, tick};
pub use hit::{Hits, get_selection, hit_test_world};
pub use theme::Theme;
