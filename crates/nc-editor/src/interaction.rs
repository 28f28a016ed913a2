//! Interaction state machine.
//!
//! Turns pointer and wheel input into view changes, selection/hover sets and
//! node moves. The machine owns no nodes: hit-testing reads the store and a
//! drag writes the primary selected node back through
//! [`GraphStore::update_node`].
//!
//! | Event              | Condition                    | Effect                              |
//! |--------------------|------------------------------|-------------------------------------|
//! | wheel + ctrl/meta  |                              | zoom, back to `Idle`                |
//! | wheel              |                              | pan, back to `Idle`                 |
//! | pointer down       |                              | select hits, enter `Move`           |
//! | pointer move       | `Move`, selection non-empty  | drag primary selected node          |
//! | pointer move       | `Move`, selection empty      | nothing                             |
//! | pointer move       | otherwise                    | hover hits, update cursor           |
//! | pointer up         |                              | stop drag, back to `Idle`           |

use crate::config::InteractionConfig;
use crate::input::{InputEvent, Modifiers};
use nc_core::{CanvasNode, GraphStore, NodeId, NodeSet, Offset, Size, ViewTransform};
use nc_render::{DrawCommand, Highlight, Theme, get_selection, tick};
use std::fmt;

/// What the current gesture is doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Idle,
    Zoom,
    Pan,
    Move,
}

/// Pointer affordance the host should display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn as_css(&self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
        }
    }
}

/// Outcome of one handled event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response {
    /// Something visible changed; the next frame will differ.
    pub changed: bool,
    pub cursor: Cursor,
    /// The host should cancel its native context menu.
    pub suppress_context_menu: bool,
}

pub struct Interaction {
    view: ViewTransform,
    mode: Mode,
    selection: NodeSet,
    hover: NodeSet,
    /// Screen position of the previous drag step.
    last_offset: Option<Offset>,
    cursor: Cursor,
    config: InteractionConfig,
    on_update: Option<Box<dyn FnMut()>>,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interaction")
            .field("view", &self.view)
            .field("mode", &self.mode)
            .field("selection", &self.selection)
            .field("hover", &self.hover)
            .field("last_offset", &self.last_offset)
            .field("cursor", &self.cursor)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Interaction {
    pub fn new() -> Self {
        Self::with_config(InteractionConfig::default())
    }

    pub fn with_config(config: InteractionConfig) -> Self {
        Self {
            view: ViewTransform::default(),
            mode: Mode::Idle,
            selection: NodeSet::empty(),
            hover: NodeSet::empty(),
            last_offset: None,
            cursor: Cursor::Default,
            config,
            on_update: None,
        }
    }

    /// Register the host's "something changed" signal. Fired after wheel,
    /// press, drag steps, `clear`, `delete_selection`, `deselect`, `forget`
    /// and `set_view`.
    pub fn set_on_update(&mut self, callback: impl FnMut() + 'static) {
        self.on_update = Some(Box::new(callback));
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> &NodeSet {
        &self.selection
    }

    pub fn hover(&self) -> &NodeSet {
        &self.hover
    }

    pub fn last_offset(&self) -> Option<Offset> {
        self.last_offset
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.mode == Mode::Move && !self.selection.is_empty()
    }

    /// The primary (last-hit) selected node.
    pub fn selected_node<'s, S: GraphStore>(&self, store: &'s S) -> Option<&'s CanvasNode> {
        store.retrieve_node(self.selection.primary()?)
    }

    /// The primary (last-hit) hovered node.
    pub fn hovered_node<'s, S: GraphStore>(&self, store: &'s S) -> Option<&'s CanvasNode> {
        store.retrieve_node(self.hover.primary()?)
    }

    pub fn highlight(&self) -> Highlight {
        Highlight {
            selected: self.selection.primary(),
            hovered: self.hover.primary(),
        }
    }

    /// Build the draw commands for the current state.
    pub fn frame<S: GraphStore>(
        &self,
        store: &S,
        surface: Size,
        theme: &Theme,
    ) -> Vec<DrawCommand> {
        tick(store, &self.view, self.highlight(), surface, theme)
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    pub fn handle<S: GraphStore>(&mut self, event: &InputEvent, store: &mut S) -> Response {
        let changed = match *event {
            InputEvent::Wheel { dx, dy, modifiers, .. } => self.wheel(dx, dy, modifiers),
            InputEvent::PointerDown { x, y } => self.press(Offset::new(x, y), store),
            InputEvent::PointerMove { x, y } => self.pointer_move(Offset::new(x, y), store),
            InputEvent::PointerUp { .. } => {
                self.release();
                false
            }
            InputEvent::ContextMenu => {
                return Response {
                    changed: false,
                    cursor: self.cursor,
                    suppress_context_menu: true,
                };
            }
        };
        Response {
            changed,
            cursor: self.cursor,
            suppress_context_menu: false,
        }
    }

    /// Zoom (with ctrl/meta) or pan by one wheel step. Always returns to
    /// `Idle` afterwards.
    pub fn wheel(&mut self, dx: f32, dy: f32, modifiers: Modifiers) -> bool {
        let offset = self.view.offset();
        let mut scale = self.view.scale();
        let mut pan = offset;

        if modifiers.zoom() {
            self.enter(Mode::Zoom);
            scale = (scale - dy * self.config.zoom_speed).max(self.config.min_scale);
        } else {
            self.enter(Mode::Pan);
            pan = Offset::new(
                offset.x - dx * self.config.pan_speed,
                offset.y - dy * self.config.pan_speed,
            );
        }

        self.view
            .set_transform(pan.x, pan.y, scale, self.view.rotation());
        self.enter(Mode::Idle);
        self.notify();
        true
    }

    /// Start a gesture: select everything under the pointer and arm dragging.
    pub fn press<S: GraphStore>(&mut self, point: Offset, store: &S) -> bool {
        // Both sets are rebuilt from scratch; nothing carries over.
        let hits = get_selection(store, &self.view, point);
        self.selection = NodeSet::from(hits.as_slice());
        self.hover = self.selection.clone();
        self.cursor = self.cursor_for_hover();
        self.last_offset = Some(point);
        self.enter(Mode::Move);
        self.notify();
        true
    }

    /// Drag the primary selected node, or update hover when not dragging.
    pub fn pointer_move<S: GraphStore>(&mut self, point: Offset, store: &mut S) -> bool {
        if self.mode != Mode::Move {
            return self.update_hover(point, store);
        }
        if self.selection.is_empty() {
            return false;
        }
        self.drag(point, store)
    }

    /// End the gesture. The selection stays until the next press.
    pub fn release(&mut self) {
        self.last_offset = None;
        self.enter(Mode::Idle);
    }

    // ─── Host operations ─────────────────────────────────────────────────

    /// Remove every node from the store and reset interaction state.
    pub fn clear<S: GraphStore>(&mut self, store: &mut S) {
        let ids: Vec<NodeId> = store.nodes().map(|n| n.id).collect();
        for id in ids {
            store.delete_node(id);
        }
        self.reset_gesture();
        self.notify();
    }

    /// Delete every selected node. Returns whether anything was removed.
    pub fn delete_selection<S: GraphStore>(&mut self, store: &mut S) -> bool {
        let mut removed = false;
        for id in self.selection.iter() {
            if store.contains_node(id) {
                store.delete_node(id);
                removed = true;
            }
        }
        self.reset_gesture();
        self.notify();
        removed
    }

    /// Drop selection, hover and any drag in progress, e.g. after the store
    /// was replaced underneath the canvas.
    pub fn deselect(&mut self) {
        self.reset_gesture();
        self.notify();
    }

    /// Drop `id` from the selection and hover sets after the host removed
    /// the node, leaving every other id in place. A drag of that node ends.
    pub fn forget(&mut self, id: NodeId) {
        if self.selection.primary() == Some(id) {
            self.last_offset = None;
        }
        self.selection = self.selection.without(id);
        self.hover = self.hover.without(id);
        self.cursor = self.cursor_for_hover();
        self.notify();
    }

    pub fn set_config(&mut self, config: InteractionConfig) {
        self.config = config;
    }

    /// Jump to an explicit view, e.g. "reset zoom".
    pub fn set_view(&mut self, offset: Offset, scale: f32) {
        let scale = scale.max(self.config.min_scale);
        self.view
            .set_transform(offset.x, offset.y, scale, self.view.rotation());
        self.notify();
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn drag<S: GraphStore>(&mut self, point: Offset, store: &mut S) -> bool {
        let (Some(last), Some(primary)) = (self.last_offset, self.selection.primary()) else {
            return false;
        };
        let Some(mut node) = store.retrieve_node(primary).cloned() else {
            log::debug!("drag target {primary} is gone");
            return false;
        };

        // Deltas are translation-invariant: undoing the scale is enough.
        let delta = (point - last) / self.view.scale();
        node.set_position(node.position() + delta);
        store.update_node(node);

        self.last_offset = Some(point);
        self.notify();
        true
    }

    fn update_hover<S: GraphStore>(&mut self, point: Offset, store: &S) -> bool {
        let hits = get_selection(store, &self.view, point);
        let changed = self.hover != *hits.as_slice();
        if changed {
            self.hover = NodeSet::from(hits.as_slice());
        }
        self.cursor = self.cursor_for_hover();
        changed
    }

    fn cursor_for_hover(&self) -> Cursor {
        if self.hover.is_empty() {
            Cursor::Default
        } else {
            Cursor::Pointer
        }
    }

    fn reset_gesture(&mut self) {
        self.selection = NodeSet::empty();
        self.hover = NodeSet::empty();
        self.last_offset = None;
        self.cursor = Cursor::Default;
        self.enter(Mode::Idle);
    }

    fn enter(&mut self, mode: Mode) {
        if self.mode != mode {
            log::debug!("mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_update.as_mut() {
            callback();
        }
    }
}
