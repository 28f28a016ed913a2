//! World ↔ screen transform.
//!
//! The forward matrix maps world space onto the drawing surface; its inverse
//! maps pointer positions back into world space for hit-testing. The inverse
//! is cached because `to_world` runs on every pointer move.

use crate::model::Offset;

/// Smallest scale the view accepts. Keeps the linear block invertible.
pub const MIN_SCALE: f32 = 0.1;

/// Forward affine matrix in canvas `setTransform(a, b, c, d, e, f)` order.
///
/// ```text
/// x' = scale_x·x + shear_x·y + translate_x
/// y' = shear_y·x + scale_y·y + translate_y
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub scale_x: f32,
    pub shear_y: f32,
    pub shear_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        scale_x: 1.0,
        shear_y: 0.0,
        shear_x: 0.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Uniform scale, then rotation by `rotation` radians, then translation.
    pub fn similarity(offset_x: f32, offset_y: f32, scale: f32, rotation: f32) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self {
            scale_x: scale * cos,
            shear_y: scale * sin,
            shear_x: -scale * sin,
            scale_y: scale * cos,
            translate_x: offset_x,
            translate_y: offset_y,
        }
    }

    /// Determinant of the 2×2 linear block.
    pub fn determinant(&self) -> f32 {
        self.scale_x * self.scale_y - self.shear_y * self.shear_x
    }

    /// Adjugate over determinant. `None` when the linear block is singular.
    pub fn inverse_linear(&self) -> Option<InverseLinear> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(InverseLinear {
            a: self.scale_y / det,
            b: -self.shear_y / det,
            c: -self.shear_x / det,
            d: self.scale_x / det,
        })
    }

    pub fn apply(&self, p: Offset) -> Offset {
        Offset::new(
            self.scale_x * p.x + self.shear_x * p.y + self.translate_x,
            self.shear_y * p.x + self.scale_y * p.y + self.translate_y,
        )
    }

    /// Coefficients as `[a, b, c, d, e, f]`, the layout drawing APIs expect.
    pub fn to_coefficients(&self) -> [f32; 6] {
        [
            self.scale_x,
            self.shear_y,
            self.shear_x,
            self.scale_y,
            self.translate_x,
            self.translate_y,
        ]
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Inverse of the forward linear block. Translation is handled by
/// subtracting the forward translation first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseLinear {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl InverseLinear {
    pub const IDENTITY: InverseLinear = InverseLinear {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
    };

    pub fn apply(&self, v: Offset) -> Offset {
        Offset::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }
}

/// Pan/zoom state of the canvas plus its forward and inverse matrices.
///
/// Fields are private: the only writer is [`ViewTransform::set_transform`],
/// which recomputes both matrices in one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    offset: Offset,
    scale: f32,
    rotation: f32,
    matrix: Matrix,
    inverse: InverseLinear,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            offset: Offset::ZERO,
            scale: 1.0,
            rotation: 0.0,
            matrix: Matrix::IDENTITY,
            inverse: InverseLinear::IDENTITY,
        }
    }
}

impl ViewTransform {
    pub fn new(offset: Offset, scale: f32) -> Self {
        let mut view = Self::default();
        view.set_transform(offset.x, offset.y, scale, 0.0);
        view
    }

    /// Recompute the forward matrix and its inverse.
    ///
    /// `scale` is clamped to [`MIN_SCALE`]; non-finite inputs leave the
    /// transform unchanged.
    pub fn set_transform(&mut self, offset_x: f32, offset_y: f32, scale: f32, rotation: f32) {
        let finite = [offset_x, offset_y, scale, rotation].iter().all(|v| v.is_finite());
        if !finite {
            log::warn!(
                "ignoring non-finite transform ({offset_x}, {offset_y}, {scale}, {rotation})"
            );
            return;
        }
        let scale = scale.max(MIN_SCALE);
        let matrix = Matrix::similarity(offset_x, offset_y, scale, rotation);
        // The clamp guarantees det = scale² > 0.
        let Some(inverse) = matrix.inverse_linear() else {
            log::warn!("singular transform at scale {scale}; keeping previous view");
            return;
        };

        self.offset = Offset::new(offset_x, offset_y);
        self.scale = scale;
        self.rotation = rotation;
        self.matrix = matrix;
        self.inverse = inverse;
    }

    /// Screen → world.
    pub fn to_world(&self, screen_x: f32, screen_y: f32) -> Offset {
        let translated = Offset::new(
            screen_x - self.matrix.translate_x,
            screen_y - self.matrix.translate_y,
        );
        self.inverse.apply(translated)
    }

    /// World → screen.
    pub fn to_screen(&self, world: Offset) -> Offset {
        self.matrix.apply(world)
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn inverse(&self) -> &InverseLinear {
        &self.inverse
    }
}
