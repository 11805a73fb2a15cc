use super::Rect;
use crate::{common::*, Transform};

/// Bounding box in TLBR format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TLBR<T> {
    pub(crate) t: T,
    pub(crate) l: T,
    pub(crate) b: T,
    pub(crate) r: T,
}

impl<T> TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    /// Build a box from `[x0, y0, x1, y1]` corner coordinates.
    pub fn try_from_xyxy(xyxy: [T; 4]) -> Result<Self> {
        let [x0, y0, x1, y1] = xyxy;
        Self::try_from_tlbr([y0, x0, y1, x1])
    }

    /// The four corners as `[x, y]` points, clockwise from the top-left.
    pub fn corners(&self) -> [[T; 2]; 4] {
        let Self { t, l, b, r } = *self;
        [[l, t], [r, t], [r, b], [l, b]]
    }

    pub fn transform(&self, transform: &Transform<T>) -> Self {
        TLBR {
            t: self.t * transform.sy + transform.ty,
            l: self.l * transform.sx + transform.tx,
            b: self.b * transform.sy + transform.ty,
            r: self.r * transform.sx + transform.tx,
        }
    }

    /// Mirror the box left-to-right within a frame of the given width.
    pub fn flip_horizontal(&self, width: T) -> Self {
        let Self { t, l, b, r } = *self;
        Self {
            t,
            l: width - r,
            b,
            r: width - l,
        }
    }

    /// Mirror the box top-to-bottom within a frame of the given height.
    pub fn flip_vertical(&self, height: T) -> Self {
        let Self { t, l, b, r } = *self;
        Self {
            t: height - b,
            l,
            b: height - t,
            r,
        }
    }
}

impl<T> Rect for TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn t(&self) -> Self::Type {
        self.t
    }

    fn l(&self) -> Self::Type {
        self.l
    }

    fn b(&self) -> Self::Type {
        self.b
    }

    fn r(&self) -> Self::Type {
        self.r
    }

    fn h(&self) -> Self::Type {
        self.b - self.t
    }

    fn w(&self) -> Self::Type {
        self.r - self.l
    }

    fn try_from_tlbr(tlbr: [Self::Type; 4]) -> Result<Self> {
        let [t, l, b, r] = tlbr;
        ensure!(b >= t && r >= l, "b >= t and r >= l must hold");

        Ok(Self { t, l, b, r })
    }

    fn try_from_tlhw(tlhw: [Self::Type; 4]) -> Result<Self> {
        let [t, l, h, w] = tlhw;
        let b = t + h;
        let r = l + w;
        Self::try_from_tlbr([t, l, b, r])
    }
}
