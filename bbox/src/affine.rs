//! Planar affine maps on `[x, y]` points.

use crate::{common::*, TLBR};

/// An affine map stored as the top two rows of a 3x3 homogeneous matrix.
///
/// A point `[x, y]` maps to `[m00 x + m01 y + m02, m10 x + m11 y + m12]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Affine<T> {
    pub matrix: [[T; 3]; 2],
}

impl<T> Affine<T>
where
    T: Float,
{
    pub fn translation(dx: T, dy: T) -> Self {
        let zero = T::zero();
        let one = T::one();
        Self {
            matrix: [[one, zero, dx], [zero, one, dy]],
        }
    }

    /// Rotation about the origin. Positive angles turn counter-clockwise on
    /// screen, where the y axis points downwards.
    pub fn rotation(radians: T) -> Self {
        let zero = T::zero();
        let (sin, cos) = radians.sin_cos();
        Self {
            matrix: [[cos, sin, zero], [-sin, cos, zero]],
        }
    }

    /// Rotation about the given `[x, y]` pivot.
    pub fn rotation_about(radians: T, pivot: [T; 2]) -> Self {
        let [px, py] = pivot;
        let to_origin = Self::translation(-px, -py);
        let back = Self::translation(px, py);
        back.then(&Self::rotation(radians)).then(&to_origin)
    }

    /// The composed map `self ∘ rhs`, that applies `rhs` first.
    pub fn then(&self, rhs: &Self) -> Self {
        let [[a00, a01, a02], [a10, a11, a12]] = self.matrix;
        let [[b00, b01, b02], [b10, b11, b12]] = rhs.matrix;
        Self {
            matrix: [
                [
                    a00 * b00 + a01 * b10,
                    a00 * b01 + a01 * b11,
                    a00 * b02 + a01 * b12 + a02,
                ],
                [
                    a10 * b00 + a11 * b10,
                    a10 * b01 + a11 * b11,
                    a10 * b02 + a11 * b12 + a12,
                ],
            ],
        }
    }

    pub fn apply(&self, point: [T; 2]) -> [T; 2] {
        let [x, y] = point;
        let [[m00, m01, m02], [m10, m11, m12]] = self.matrix;
        [m00 * x + m01 * y + m02, m10 * x + m11 * y + m12]
    }

    pub fn try_inverse(&self) -> Result<Self> {
        let [[m00, m01, m02], [m10, m11, m12]] = self.matrix;
        let det = m00 * m11 - m01 * m10;
        ensure!(det.abs() > T::epsilon(), "affine map is not invertible");

        let i00 = m11 / det;
        let i01 = -m01 / det;
        let i10 = -m10 / det;
        let i11 = m00 / det;
        let i02 = -(i00 * m02 + i01 * m12);
        let i12 = -(i10 * m02 + i11 * m12);

        Ok(Self {
            matrix: [[i00, i01, i02], [i10, i11, i12]],
        })
    }

    /// Map the four corners and return their axis-aligned hull.
    pub fn apply_rect(&self, rect: &TLBR<T>) -> TLBR<T> {
        let [first, rest @ ..] = rect.corners().map(|point| self.apply(point));
        let [x, y] = first;
        rest.iter().fold(
            TLBR {
                t: y,
                l: x,
                b: y,
                r: x,
            },
            |hull, &[x, y]| TLBR {
                t: hull.t.min(y),
                l: hull.l.min(x),
                b: hull.b.max(y),
                r: hull.r.max(x),
            },
        )
    }
}

impl<T> Mul<&TLBR<T>> for &Affine<T>
where
    T: Float,
{
    type Output = TLBR<T>;

    fn mul(self, rhs: &TLBR<T>) -> Self::Output {
        self.apply_rect(rhs)
    }
}
