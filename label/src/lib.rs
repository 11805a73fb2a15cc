//! Detection labels in pixel and fractional units.

use anyhow::{ensure, Result};
use bbox::{prelude::*, Transform, HW, TLBR};
use num_traits::Num;
use std::ops::Mul;

/// The sentinel encoding of a missing object.
pub const ABSENT_ENCODING: [f32; 5] = [0.0, -1.0, -1.0, -1.0, -1.0];

/// A box paired with a class tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label<R, C>
where
    R: Rect,
{
    pub rect: R,
    pub class: C,
}

impl<'a, T, C> Mul<&'a Label<TLBR<T>, C>> for &'a Transform<T>
where
    T: Copy + Num + PartialOrd,
    C: Copy,
{
    type Output = Label<TLBR<T>, C>;

    fn mul(self, rhs: &'a Label<TLBR<T>, C>) -> Self::Output {
        Label {
            rect: self * &rhs.rect,
            class: rhs.class,
        }
    }
}

/// The per-example detection target.
///
/// A present box is stored in fractions of the image width and height, so
/// resizing the image never changes it.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionLabel {
    Present(TLBR<f64>),
    Absent,
}

impl DetectionLabel {
    /// Normalize an absolute pixel box by the native image size.
    pub fn from_pixel_label<C>(label: &Label<TLBR<f64>, C>, native: &HW<f64>) -> Result<Self>
    where
        C: Copy,
    {
        ensure!(
            native.h() > 0.0 && native.w() > 0.0,
            "native image size must be positive, but get {}x{}",
            native.h(),
            native.w()
        );
        let ratio = &Transform::to_unit_frame(native) * label;
        Ok(Self::Present(ratio.rect))
    }

    /// Normalize absolute `[x0, y0, x1, y1]` pixel coordinates by the native
    /// image size.
    pub fn from_pixel_xyxy(xyxy: [f64; 4], native: &HW<f64>) -> Result<Self> {
        let label = Label {
            rect: TLBR::try_from_xyxy(xyxy)?,
            class: (),
        };
        Self::from_pixel_label(&label, native)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn rect(&self) -> Option<&TLBR<f64>> {
        match self {
            Self::Present(rect) => Some(rect),
            Self::Absent => None,
        }
    }

    /// Encode as `[presence, x0, y0, x1, y1]`.
    pub fn to_array(&self) -> [f32; 5] {
        match self {
            Self::Present(rect) => {
                let [x0, y0, x1, y1] = rect.xyxy();
                [1.0, x0 as f32, y0 as f32, x1 as f32, y1 as f32]
            }
            Self::Absent => ABSENT_ENCODING,
        }
    }
}

impl From<Option<TLBR<f64>>> for DetectionLabel {
    fn from(rect: Option<TLBR<f64>>) -> Self {
        match rect {
            Some(rect) => Self::Present(rect),
            None => Self::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn tabular_label_is_fractional() {
        let native = HW::from_hw([200.0, 200.0]);
        let label = DetectionLabel::from_pixel_xyxy([10.0, 20.0, 110.0, 120.0], &native).unwrap();
        let encoded = label.to_array();
        let expect = [1.0, 0.05, 0.10, 0.55, 0.60];
        encoded
            .iter()
            .zip(expect)
            .for_each(|(&lhs, rhs)| assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-6));
    }

    #[test]
    fn tabular_label_non_square() {
        let native = HW::from_hw([100.0, 400.0]);
        let label = DetectionLabel::from_pixel_xyxy([0.0, 0.0, 400.0, 50.0], &native).unwrap();
        let [presence, x0, y0, x1, y1] = label.to_array();
        assert_eq!(presence, 1.0);
        assert_abs_diff_eq!(x0, 0.0);
        assert_abs_diff_eq!(y0, 0.0);
        assert_abs_diff_eq!(x1, 1.0);
        assert_abs_diff_eq!(y1, 0.5);
    }

    #[test]
    fn tabular_label_rejects_bad_input() {
        let native = HW::from_hw([0.0, 100.0]);
        assert!(DetectionLabel::from_pixel_xyxy([0.0, 0.0, 1.0, 1.0], &native).is_err());

        let native = HW::from_hw([100.0, 100.0]);
        assert!(DetectionLabel::from_pixel_xyxy([50.0, 0.0, 10.0, 1.0], &native).is_err());
    }

    #[test]
    fn absent_label_encoding() {
        let label = DetectionLabel::from(None);
        assert!(!label.is_present());
        assert!(label.rect().is_none());
        assert_eq!(label.to_array(), [0.0, -1.0, -1.0, -1.0, -1.0]);
    }
}
