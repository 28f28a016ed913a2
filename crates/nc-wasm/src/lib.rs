//! WASM bridge for the node canvas — exposes the Rust interaction engine to
//! JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the
//! `<canvas>`, forwards its pointer/wheel events here, and drives frames:
//!
//! ```js
//! const canvas = new NodeCanvas(el.width, el.height);
//! canvas.set_on_update(() => sidePanel.refresh());
//! canvas.start();
//! const loop = () => { if (canvas.render(ctx)) requestAnimationFrame(loop); };
//! requestAnimationFrame(loop);
//! ```

mod notify;
mod render2d;

use nc_core::{CanvasNode, Color, Graph, GraphStore, NodeId, Offset, Size};
use nc_editor::{InputEvent, Interaction, InteractionConfig, Modifiers, RenderLoop};
use nc_render::Theme;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// `{"ok":true,...}` / `{"ok":false,"error":"..."}` replies for fallible calls.
#[derive(Serialize)]
struct Outcome {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Outcome {
    fn ok() -> String {
        Self::render(Self {
            ok: true,
            id: None,
            error: None,
        })
    }

    fn ok_id(id: NodeId) -> String {
        Self::render(Self {
            ok: true,
            id: Some(id.to_string()),
            error: None,
        })
    }

    fn err(error: impl ToString) -> String {
        Self::render(Self {
            ok: false,
            id: None,
            error: Some(error.to_string()),
        })
    }

    fn render(self) -> String {
        serde_json::to_string(&self).unwrap_or_else(|_| r#"{"ok":false}"#.to_string())
    }
}

/// The main WASM-facing canvas object.
///
/// Holds the graph store, the interaction state machine and the render loop
/// lifecycle. All interaction from JS goes through this struct.
#[wasm_bindgen]
pub struct NodeCanvas {
    graph: Graph,
    interaction: Interaction,
    render_loop: RenderLoop,
    theme: Theme,
    width: f32,
    height: f32,
}

#[wasm_bindgen]
impl NodeCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Self {
        console_error_panic_hook_setup();

        Self {
            graph: Graph::new(),
            interaction: Interaction::new(),
            render_loop: RenderLoop::new(),
            theme: Theme::light(),
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Invoke `callback` (no arguments) after state-changing calls.
    ///
    /// The callback is deferred to a microtask, so it runs once the call that
    /// caused the change has returned and may freely query the canvas.
    /// Several changes within one call produce a single callback.
    pub fn set_on_update(&mut self, callback: js_sys::Function) {
        self.interaction.set_on_update(notify::deferred(callback));
    }

    pub fn set_theme(&mut self, is_dark: bool) {
        self.theme = if is_dark { Theme::dark() } else { Theme::light() };
    }

    /// Override wheel tuning from JSON, e.g. `{"pan_speed": 1}`.
    pub fn set_config_json(&mut self, json: &str) -> String {
        match InteractionConfig::from_json(json) {
            Ok(config) => {
                self.interaction.set_config(config);
                Outcome::ok()
            }
            Err(e) => Outcome::err(e),
        }
    }

    // ─── Render loop ─────────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.render_loop.start();
    }

    /// Call on teardown; the next `render` returns `false`.
    pub fn stop(&mut self) {
        self.render_loop.stop();
    }

    /// Paint one frame. Returns whether the host should schedule another.
    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) -> bool {
        let surface = Size::new(self.width, self.height);
        match self
            .render_loop
            .frame(&self.interaction, &self.graph, surface, &self.theme)
        {
            Some(commands) => {
                render2d::execute(ctx, &commands);
                true
            }
            None => false,
        }
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Returns `true` if the canvas needs repainting.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.dispatch(InputEvent::pointer_down(x, y))
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.dispatch(InputEvent::pointer_move(x, y))
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.dispatch(InputEvent::pointer_up(x, y))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn handle_wheel(
        &mut self,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        self.dispatch(InputEvent::Wheel {
            x,
            y,
            dx,
            dy,
            modifiers,
        })
    }

    /// Returns `true` when the host should `preventDefault()` the menu.
    pub fn handle_context_menu(&mut self) -> bool {
        self.interaction
            .handle(&InputEvent::ContextMenu, &mut self.graph)
            .suppress_context_menu
    }

    /// CSS cursor for the canvas element.
    pub fn cursor(&self) -> String {
        self.interaction.cursor().as_css().to_string()
    }

    // ─── Selection queries ───────────────────────────────────────────────

    /// All selected ids as a JSON array, primary last.
    pub fn get_selected_ids(&self) -> String {
        let ids: Vec<&str> = self
            .interaction
            .selection()
            .as_slice()
            .iter()
            .map(|id| id.as_str())
            .collect();
        serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
    }

    /// The primary selected node as JSON, or `null`.
    pub fn get_selected_node(&self) -> String {
        self.interaction
            .selected_node(&self.graph)
            .and_then(|node| serde_json::to_string(node).ok())
            .unwrap_or_else(|| "null".to_string())
    }

    /// The primary hovered id, or empty string.
    pub fn get_hovered_id(&self) -> String {
        self.interaction
            .hover()
            .primary()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    pub fn get_view_json(&self) -> String {
        let view = self.interaction.view();
        serde_json::json!({
            "x": view.offset().x,
            "y": view.offset().y,
            "scale": view.scale(),
        })
        .to_string()
    }

    pub fn reset_view(&mut self) {
        self.interaction.set_view(Offset::ZERO, 1.0);
    }

    // ─── Graph store ─────────────────────────────────────────────────────

    /// Replace the graph from a `{"nodes":[...],"edges":[...]}` document.
    pub fn import_json(&mut self, json: &str) -> String {
        match Graph::import_json(json) {
            Ok(graph) => {
                self.graph = graph;
                self.interaction.deselect();
                Outcome::ok()
            }
            Err(e) => Outcome::err(e),
        }
    }

    pub fn export_json(&self) -> String {
        self.graph.export_json().unwrap_or_else(Outcome::err)
    }

    /// Add a node. An empty `id` generates one. Returns `{"ok":true,"id":...}`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_node(
        &mut self,
        id: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        name: &str,
        color: Option<String>,
    ) -> String {
        let id = if id.is_empty() {
            NodeId::generate()
        } else {
            NodeId::intern(id)
        };
        let mut node = CanvasNode::new(id, Offset::new(x, y), Size::new(width, height), name);
        if let Some(hex) = color.as_deref() {
            match Color::from_hex(hex) {
                Some(c) => node.color = Some(c),
                None => return Outcome::err(format!("invalid color `{hex}`")),
            }
        }
        match self.graph.add_node(node) {
            Ok(()) => Outcome::ok_id(id),
            Err(e) => Outcome::err(e),
        }
    }

    pub fn add_edge(&mut self, start: &str, end: &str) -> String {
        match self
            .graph
            .add_edge(NodeId::intern(start), NodeId::intern(end))
        {
            Ok(()) => Outcome::ok(),
            Err(e) => Outcome::err(e),
        }
    }

    /// Remove a node and its edges. Returns `true` if it existed.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let id = NodeId::intern(id);
        if !self.graph.contains_node(id) {
            return false;
        }
        self.graph.delete_node(id);
        self.interaction.forget(id);
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        self.interaction.delete_selection(&mut self.graph)
    }

    pub fn clear(&mut self) {
        self.interaction.clear(&mut self.graph);
    }

    pub fn node_count(&self) -> usize {
        self.graph.len()
    }
}

// ─── Private helpers ─────────────────────────────────────────────────────

impl NodeCanvas {
    fn dispatch(&mut self, event: InputEvent) -> bool {
        self.interaction.handle(&event, &mut self.graph).changed
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("node canvas panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn canvas_with_box() -> NodeCanvas {
        let mut canvas = NodeCanvas::new(800.0, 600.0);
        canvas.add_node("wasm_box", 10.0, 10.0, 20.0, 20.0, "Box", None);
        canvas
    }

    #[test]
    fn add_node_reports_id_and_duplicates() {
        let mut canvas = NodeCanvas::new(800.0, 600.0);
        assert_eq!(
            canvas.add_node("wasm_dup", 0.0, 0.0, 10.0, 10.0, "A", None),
            r#"{"ok":true,"id":"wasm_dup"}"#
        );
        let again = canvas.add_node("wasm_dup", 0.0, 0.0, 10.0, 10.0, "B", None);
        assert!(again.starts_with(r#"{"ok":false"#));
        assert_eq!(canvas.node_count(), 1);
    }

    #[test]
    fn add_node_rejects_bad_color() {
        let mut canvas = NodeCanvas::new(800.0, 600.0);
        let reply = canvas.add_node("", 0.0, 0.0, 10.0, 10.0, "A", Some("#nothex".into()));
        assert!(reply.contains("invalid color"));
        assert_eq!(canvas.node_count(), 0);
    }

    #[test]
    fn press_then_query_selection() {
        let mut canvas = canvas_with_box();
        assert!(canvas.handle_pointer_down(15.0, 15.0));
        assert_eq!(canvas.get_selected_ids(), r#"["wasm_box"]"#);
        assert!(canvas.get_selected_node().contains(r#""name":"Box""#));
    }

    #[test]
    fn hover_changes_cursor() {
        let mut canvas = canvas_with_box();
        canvas.handle_pointer_move(15.0, 15.0);
        assert_eq!(canvas.cursor(), "pointer");
        assert_eq!(canvas.get_hovered_id(), "wasm_box");
        canvas.handle_pointer_move(200.0, 200.0);
        assert_eq!(canvas.cursor(), "default");
        assert_eq!(canvas.get_hovered_id(), "");
    }

    #[test]
    fn delete_node_clears_stale_selection() {
        let mut canvas = canvas_with_box();
        canvas.handle_pointer_down(15.0, 15.0);
        assert!(canvas.delete_node("wasm_box"));
        assert_eq!(canvas.get_selected_ids(), "[]");
        assert_eq!(canvas.get_selected_node(), "null");
        assert!(!canvas.delete_node("wasm_box"));
    }

    #[test]
    fn deleting_hovered_node_keeps_selection() {
        let mut canvas = canvas_with_box();
        canvas.add_node("wasm_other", 100.0, 10.0, 20.0, 20.0, "Other", None);
        canvas.handle_pointer_down(15.0, 15.0);
        canvas.handle_pointer_up(15.0, 15.0);
        canvas.handle_pointer_move(110.0, 15.0);
        assert_eq!(canvas.get_hovered_id(), "wasm_other");

        assert!(canvas.delete_node("wasm_other"));
        assert_eq!(canvas.get_selected_ids(), r#"["wasm_box"]"#);
        assert_eq!(canvas.get_hovered_id(), "");
        assert_eq!(canvas.cursor(), "default");
    }

    #[test]
    fn import_replaces_graph_and_selection() {
        let mut canvas = canvas_with_box();
        canvas.handle_pointer_down(15.0, 15.0);
        let reply = canvas.import_json(
            r#"{"nodes":[{"id":"wasm_new","x":0,"y":0,"width":5,"height":5,"name":"N"}]}"#,
        );
        assert_eq!(reply, r#"{"ok":true}"#);
        assert_eq!(canvas.node_count(), 1);
        assert_eq!(canvas.get_selected_ids(), "[]");

        assert!(canvas.import_json("not json").starts_with(r#"{"ok":false"#));
        assert_eq!(canvas.node_count(), 1);
    }

    #[test]
    fn wheel_updates_view() {
        let mut canvas = canvas_with_box();
        canvas.handle_wheel(0.0, 0.0, 5.0, 5.0, false, false, false, false);
        assert_eq!(canvas.get_view_json(), r#"{"scale":1.0,"x":-10.0,"y":-10.0}"#);
        canvas.reset_view();
        assert_eq!(canvas.get_view_json(), r#"{"scale":1.0,"x":0.0,"y":0.0}"#);
    }

    #[test]
    fn context_menu_is_suppressed() {
        let mut canvas = NodeCanvas::new(100.0, 100.0);
        assert!(canvas.handle_context_menu());
    }
}
