//! Draw commands → Vello scene.
//!
//! Replays a frame from [`crate::frame::tick`] into a `vello::Scene`. The
//! caller presents the scene via wgpu with the theme background as base
//! color, so `ClearRect` has nothing to do here.

use crate::frame::DrawCommand;
use kurbo::{Affine, Shape, Stroke};
use nc_core::Color;
use peniko::{Color as PenikoColor, Fill};
use vello::Scene;

/// Current transform plus the save/restore stack of a 2D context.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl TransformStack {
    pub fn current(&self) -> Affine {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn set(&mut self, transform: Affine) {
        self.current = transform;
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Unbalanced restores are ignored, as in Canvas2D.
    pub fn restore(&mut self) {
        if let Some(prev) = self.saved.pop() {
            self.current = prev;
        }
    }
}

/// Paint a command list. Call once per frame with a freshly-reset `Scene`.
pub fn paint_commands(scene: &mut Scene, commands: &[DrawCommand]) -> TransformStack {
    let mut stack = TransformStack::default();
    for cmd in commands {
        match cmd {
            DrawCommand::ResetTransform => stack.set(Affine::IDENTITY),
            DrawCommand::SetTransform(t) => stack.set(*t),
            DrawCommand::Save => stack.save(),
            DrawCommand::Restore => stack.restore(),
            DrawCommand::ClearRect(_) => {}
            DrawCommand::FillRect { rect, color } => fill(scene, stack.current(), rect, *color),
            DrawCommand::StrokeRect { rect, color, width } => {
                stroke(scene, stack.current(), rect, *color, *width)
            }
            DrawCommand::StrokeCurve {
                curve,
                color,
                width,
            } => stroke(scene, stack.current(), curve, *color, *width),
            DrawCommand::Text { text, origin, .. } => {
                // Glyph runs need a font context; labels are Canvas2D-only for now.
                log::trace!("TEXT {text:?} at ({}, {})", origin.x, origin.y);
            }
        }
    }
    stack
}

fn fill<S: Shape>(scene: &mut Scene, transform: Affine, shape: &S, color: Color) {
    scene.fill(Fill::NonZero, transform, to_peniko(color), None, shape);
}

fn stroke<S: Shape>(scene: &mut Scene, transform: Affine, shape: &S, color: Color, width: f64) {
    scene.stroke(&Stroke::new(width), transform, to_peniko(color), None, shape);
}

fn to_peniko(color: Color) -> PenikoColor {
    let [r, g, b, a] = color.to_rgba8();
    PenikoColor::from_rgba8(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Highlight, tick};
    use crate::theme::Theme;
    use nc_core::{CanvasNode, Graph, NodeEdge, NodeId, Offset, Size, ViewTransform};

    #[test]
    fn restore_pops_to_saved_transform() {
        let mut stack = TransformStack::default();
        let zoomed = Affine::scale(2.0);
        stack.set(zoomed);
        stack.save();
        stack.set(Affine::IDENTITY);
        stack.restore();
        assert_eq!(stack.current(), zoomed);
        assert_eq!(stack.depth(), 0);

        stack.restore();
        assert_eq!(stack.current(), zoomed);
    }

    #[test]
    fn full_frame_leaves_stack_balanced() {
        let a = NodeId::intern("paint_a");
        let b = NodeId::intern("paint_b");
        let graph = Graph::from_parts(
            vec![
                CanvasNode::new(a, Offset::new(0.0, 0.0), Size::new(80.0, 30.0), "A"),
                CanvasNode::new(b, Offset::new(200.0, 90.0), Size::new(80.0, 30.0), "B"),
            ],
            vec![NodeEdge::new(a, b)],
        )
        .unwrap();
        let view = ViewTransform::new(Offset::new(4.0, 8.0), 1.5);
        let cmds = tick(
            &graph,
            &view,
            Highlight {
                selected: Some(b),
                hovered: None,
            },
            Size::new(640.0, 480.0),
            &Theme::dark(),
        );

        let mut scene = Scene::new();
        let stack = paint_commands(&mut scene, &cmds);
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.current(), crate::frame::to_affine(view.matrix()));
    }
}
