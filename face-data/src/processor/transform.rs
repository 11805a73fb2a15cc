//! The capabilities that preprocessing steps provide.

use crate::common::*;

/// A step that only changes pixels.
pub trait ImageTransform
where
    Self: Debug + Send + Sync,
{
    fn forward(&self, image: &Rgb32FImage) -> Result<Rgb32FImage>;
}

/// A step that moves pixels and must move the box along.
///
/// The box is given in fractions of the image size. The step returns `None`
/// if the box no longer marks a usable object.
pub trait BoxAwareTransform
where
    Self: Debug + Send + Sync,
{
    fn forward(
        &self,
        image: &Rgb32FImage,
        rect: &TLBR<f64>,
    ) -> Result<(Rgb32FImage, Option<TLBR<f64>>)>;
}
