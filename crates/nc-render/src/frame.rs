//! Frame builder: graph + view + highlight → draw commands.
//!
//! [`tick`] is a pure function of its inputs. It does not touch a drawing
//! surface; painters ([`crate::paint`], the Canvas2D bridge) replay the
//! returned list. Scheduling frames is the embedding application's job.

use crate::theme::Theme;
use kurbo::{Affine, CubicBez, Point, Rect};
use nc_core::{CanvasNode, Color, GraphStore, Matrix, NodeId, Size, ViewTransform};

/// One drawing operation, in the order a 2D context would execute it.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Replace the current transform with identity.
    ResetTransform,
    /// Replace the current transform.
    SetTransform(Affine),
    /// Erase to transparent.
    ClearRect(Rect),
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f64,
    },
    StrokeCurve {
        curve: CubicBez,
        color: Color,
        width: f64,
    },
    /// Text with its baseline-left at `origin`.
    Text {
        text: String,
        origin: Point,
        color: Color,
        font: String,
    },
    /// Push the current transform.
    Save,
    /// Pop back to the last pushed transform.
    Restore,
}

/// Primary ids to highlight this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlight {
    pub selected: Option<NodeId>,
    pub hovered: Option<NodeId>,
}

pub fn to_affine(m: &Matrix) -> Affine {
    Affine::new(m.to_coefficients().map(f64::from))
}

fn node_rect(node: &CanvasNode) -> Rect {
    Rect::new(
        node.x as f64,
        node.y as f64,
        (node.x + node.width) as f64,
        (node.y + node.height) as f64,
    )
}

/// S-curve between two node centers. Control points sit half a node-width
/// to the right of the start and to the left of the end, so the curve
/// leaves and enters horizontally.
pub fn edge_curve(start: &CanvasNode, end: &CanvasNode) -> CubicBez {
    let (s, e) = (start.center(), end.center());
    CubicBez::new(
        (s.x as f64, s.y as f64),
        ((s.x + start.width / 2.0) as f64, s.y as f64),
        ((e.x - end.width / 2.0) as f64, e.y as f64),
        (e.x as f64, e.y as f64),
    )
}

/// Build one frame.
///
/// Background first, then edges, then nodes, so node fills cap the edge
/// ends. Edges whose endpoints no longer resolve are skipped.
pub fn tick<S: GraphStore>(
    store: &S,
    view: &ViewTransform,
    highlight: Highlight,
    surface: Size,
    theme: &Theme,
) -> Vec<DrawCommand> {
    let screen = Rect::new(0.0, 0.0, surface.width as f64, surface.height as f64);
    let mut out = vec![
        DrawCommand::ResetTransform,
        DrawCommand::ClearRect(screen),
        DrawCommand::FillRect {
            rect: screen,
            color: theme.background,
        },
        DrawCommand::SetTransform(to_affine(view.matrix())),
    ];

    for edge in store.edges() {
        let (Some(start), Some(end)) =
            (store.retrieve_node(edge.start), store.retrieve_node(edge.end))
        else {
            log::debug!("skipping edge {} -> {}: endpoint missing", edge.start, edge.end);
            continue;
        };
        out.push(DrawCommand::StrokeCurve {
            curve: edge_curve(start, end),
            color: theme.edge,
            width: theme.edge_width,
        });
    }

    for node in store.nodes() {
        paint_node(&mut out, node, view, highlight, theme);
    }

    log::trace!("frame built: {} commands", out.len());
    out
}

fn paint_node(
    out: &mut Vec<DrawCommand>,
    node: &CanvasNode,
    view: &ViewTransform,
    highlight: Highlight,
    theme: &Theme,
) {
    let rect = node_rect(node);
    out.push(DrawCommand::FillRect {
        rect,
        color: node.color.unwrap_or(theme.node_fill),
    });

    // Label is placed in screen space so zoom does not scale the text.
    let anchor = view.to_screen(node.position());
    out.push(DrawCommand::Save);
    out.push(DrawCommand::ResetTransform);
    out.push(DrawCommand::Text {
        text: node.name.clone(),
        origin: Point::new(anchor.x as f64, anchor.y as f64 - theme.label_gap),
        color: theme.label,
        font: theme.label_font.clone(),
    });
    out.push(DrawCommand::Restore);

    let outline = if highlight.selected == Some(node.id) {
        theme.outline_selected
    } else if highlight.hovered == Some(node.id) {
        theme.outline_hovered
    } else {
        theme.outline
    };
    out.push(DrawCommand::StrokeRect {
        rect,
        color: outline,
        width: theme.outline_width,
    });
}
