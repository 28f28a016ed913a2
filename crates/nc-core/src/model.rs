//! Data model for the node canvas.
//!
//! Nodes live in world space and are owned by a [`GraphStore`](crate::store::GraphStore).
//! Everything else in the workspace refers to them by [`NodeId`] only, so the
//! rendered state can never drift from the stored state.

use crate::id::NodeId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Add, AddAssign, Div, Sub};

// ─── Geometry ────────────────────────────────────────────────────────────

/// A 2D point or vector: pan offsets, pointer positions, drag deltas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Offset {
    fn add_assign(&mut self, rhs: Offset) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Div<f32> for Offset {
    type Output = Offset;

    fn div(self, rhs: f32) -> Offset {
        Offset::new(self.x / rhs, self.y / rhs)
    }
}

/// Width and height, both non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color, 4 × f32 in [0.0, 1.0]. Serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let digits = hex
            .bytes()
            .map(hex_digit)
            .collect::<Option<Vec<u8>>>()?;

        let channels: Vec<u8> = match digits.len() {
            3 | 4 => digits.iter().map(|d| d * 17).collect(),
            6 | 8 => digits.chunks(2).map(|p| (p[0] << 4) | p[1]).collect(),
            _ => return None,
        };
        let alpha = channels.get(3).copied().unwrap_or(255);
        Some(Self::rgba(
            channels[0] as f32 / 255.0,
            channels[1] as f32 / 255.0,
            channels[2] as f32 / 255.0,
            alpha as f32 / 255.0,
        ))
    }

    /// 8-bit channels, rounded.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color `{s}`")))
    }
}

// ─── Nodes & edges ───────────────────────────────────────────────────────

/// A rectangular node positioned in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl CanvasNode {
    pub fn new(id: NodeId, position: Offset, size: Size, name: impl Into<String>) -> Self {
        Self {
            id,
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn position(&self) -> Offset {
        Offset::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub fn set_position(&mut self, position: Offset) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Inclusive containment: a point on the border counts.
    pub fn contains(&self, point: Offset) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn center(&self) -> Offset {
        Offset::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A directed connection between two nodes. Its path is derived from the
/// endpoints each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeEdge {
    pub start: NodeId,
    pub end: NodeId,
}

impl NodeEdge {
    pub fn new(start: NodeId, end: NodeId) -> Self {
        Self { start, end }
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.start == id || self.end == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node() -> CanvasNode {
        CanvasNode::new(
            NodeId::intern("model_box"),
            Offset::new(10.0, 10.0),
            Size::new(20.0, 20.0),
            "Box",
        )
    }

    #[test]
    fn containment_is_inclusive() {
        let n = node();
        assert!(n.contains(Offset::new(15.0, 15.0)));
        assert!(n.contains(Offset::new(10.0, 10.0)));
        assert!(n.contains(Offset::new(30.0, 30.0)));
        assert!(n.contains(Offset::new(30.0, 12.0)));
        assert!(!n.contains(Offset::new(30.01, 15.0)));
        assert!(!n.contains(Offset::new(15.0, 9.99)));
    }

    #[test]
    fn center_of_node() {
        assert_eq!(node().center(), Offset::new(20.0, 20.0));
    }

    #[test]
    fn offset_arithmetic() {
        let a = Offset::new(25.0, 25.0);
        let b = Offset::new(15.0, 15.0);
        assert_eq!(a - b, Offset::new(10.0, 10.0));
        assert_eq!((a - b) / 2.0, Offset::new(5.0, 5.0));
        assert_eq!(a + b, Offset::new(40.0, 40.0));
    }

    #[test]
    fn negative_size_clamps_to_zero() {
        assert_eq!(Size::new(-4.0, 3.0), Size::new(0.0, 3.0));
    }

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#6C5CE7").unwrap();
        assert_eq!(c.to_hex(), "#6C5CE7");

        let translucent = Color::from_hex("FF000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 0.01);
        assert_eq!(translucent.to_hex(), "#FF000080");

        assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GGGGGG"), None);
    }

    #[test]
    fn short_hex_with_alpha() {
        let c = Color::from_hex("#f008").unwrap();
        assert_eq!(c.to_rgba8(), [255, 0, 0, 136]);
        assert_eq!(c.to_hex(), "#FF000088");
    }

    #[test]
    fn node_serializes_color_as_hex() {
        let n = node().with_color(Color::from_hex("#336699").unwrap());
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["color"], "#336699");
        assert_eq!(json["id"], "model_box");

        let plain = serde_json::to_value(node()).unwrap();
        assert!(plain.get("color").is_none());
    }
}
