pub mod error;
pub mod id;
pub mod model;
pub mod selection;
pub mod store;
pub mod transform;

pub use error::GraphError;
pub use id::NodeId;
pub use model::*;
pub use selection::NodeSet;
pub use store::{Graph, GraphStore};
pub use transform::{InverseLinear, MIN_SCALE, Matrix, ViewTransform};
