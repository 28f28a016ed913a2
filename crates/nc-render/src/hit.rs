//! Hit testing: screen point → node ids.
//!
//! Walks the store in its own order and collects *every* node whose bounds
//! contain the point. Store order is also paint order, so the last hit is the
//! topmost node on screen. Callers pick that one as primary.

use nc_core::{GraphStore, NodeId, Offset, ViewTransform};
use smallvec::SmallVec;

/// Hits in store order. Overlaps are rare, so a handful fit inline.
pub type Hits = SmallVec<[NodeId; 4]>;

/// All nodes containing the world-space `point`, in store order.
pub fn hit_test_world<S: GraphStore>(store: &S, point: Offset) -> Hits {
    store
        .nodes()
        .filter(|node| node.contains(point))
        .map(|node| node.id)
        .collect()
}

/// All nodes under the screen-space `screen` point, in store order.
pub fn get_selection<S: GraphStore>(store: &S, view: &ViewTransform, screen: Offset) -> Hits {
    let world = view.to_world(screen.x, screen.y);
    let hits = hit_test_world(store, world);
    log::trace!(
        "hit ({}, {}) -> world ({}, {}): {} node(s)",
        screen.x,
        screen.y,
        world.x,
        world.y,
        hits.len()
    );
    hits
}
