use nc_core::Color;
use serde::{Deserialize, Serialize};

/// Colors and stroke widths used by the frame builder.
///
/// Outline colors encode interaction state: `outline_selected` wins over
/// `outline_hovered`, which wins over `outline`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub edge: Color,
    pub edge_width: f64,
    pub node_fill: Color,
    pub outline: Color,
    pub outline_selected: Color,
    pub outline_hovered: Color,
    pub outline_width: f64,
    pub label: Color,
    /// CSS font shorthand for node labels.
    pub label_font: String,
    /// Screen-space gap between a label's baseline and its node.
    pub label_gap: f64,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::rgba(0.961, 0.961, 0.969, 1.0),
            edge: Color::rgba(0.42, 0.44, 0.50, 1.0),
            edge_width: 2.0,
            node_fill: Color::WHITE,
            outline: Color::rgba(0.53, 0.53, 0.55, 1.0),
            outline_selected: Color::rgba(0.0, 0.48, 1.0, 1.0),
            outline_hovered: Color::rgba(0.31, 0.76, 0.97, 1.0),
            outline_width: 2.0,
            label: Color::rgba(0.11, 0.11, 0.12, 1.0),
            label_font: "500 12px Inter, sans-serif".into(),
            label_gap: 6.0,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::rgba(0.11, 0.11, 0.118, 1.0),
            edge: Color::rgba(0.60, 0.60, 0.62, 1.0),
            node_fill: Color::rgba(0.17, 0.17, 0.18, 1.0),
            outline: Color::rgba(0.39, 0.39, 0.40, 1.0),
            outline_selected: Color::rgba(0.04, 0.52, 1.0, 1.0),
            outline_hovered: Color::rgba(0.39, 0.82, 1.0, 1.0),
            label: Color::rgba(0.92, 0.92, 0.96, 1.0),
            ..Self::light()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
