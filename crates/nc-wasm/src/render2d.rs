//! Canvas2D painter.
//!
//! Replays a frame's draw commands onto an HTML `<canvas>` via
//! `CanvasRenderingContext2d`.

use nc_core::Color;
use nc_render::DrawCommand;
use web_sys::CanvasRenderingContext2d;

pub fn execute(ctx: &CanvasRenderingContext2d, commands: &[DrawCommand]) {
    for cmd in commands {
        match cmd {
            DrawCommand::ResetTransform => {
                let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
            }
            DrawCommand::SetTransform(t) => {
                let [a, b, c, d, e, f] = t.as_coeffs();
                let _ = ctx.set_transform(a, b, c, d, e, f);
            }
            DrawCommand::ClearRect(r) => ctx.clear_rect(r.x0, r.y0, r.width(), r.height()),
            DrawCommand::FillRect { rect, color } => {
                ctx.set_fill_style_str(&css(*color));
                ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
            }
            DrawCommand::StrokeRect { rect, color, width } => {
                ctx.set_stroke_style_str(&css(*color));
                ctx.set_line_width(*width);
                ctx.stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
            }
            DrawCommand::StrokeCurve {
                curve,
                color,
                width,
            } => {
                ctx.set_stroke_style_str(&css(*color));
                ctx.set_line_width(*width);
                ctx.begin_path();
                ctx.move_to(curve.p0.x, curve.p0.y);
                ctx.bezier_curve_to(
                    curve.p1.x, curve.p1.y, curve.p2.x, curve.p2.y, curve.p3.x, curve.p3.y,
                );
                ctx.stroke();
            }
            DrawCommand::Text {
                text,
                origin,
                color,
                font,
            } => {
                ctx.set_font(font);
                ctx.set_fill_style_str(&css(*color));
                ctx.set_text_align("left");
                ctx.set_text_baseline("alphabetic");
                let _ = ctx.fill_text(text, origin.x, origin.y);
            }
            DrawCommand::Save => ctx.save(),
            DrawCommand::Restore => ctx.restore(),
        }
    }
}

/// Canvas accepts `#RRGGBBAA`, which `to_hex` emits for translucent colors.
fn css(color: Color) -> String {
    color.to_hex()
}
