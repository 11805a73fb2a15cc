//! The random rotation about the image center.

use super::BoxAwareTransform;
use crate::common::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RandomRotateInit {
    pub max_degrees: R64,
}

impl RandomRotateInit {
    pub fn build(self) -> Result<RandomRotate> {
        let Self { max_degrees } = self;
        ensure!(max_degrees >= 0.0, "max_degrees must be non-negative");
        Ok(RandomRotate {
            max_degrees: max_degrees.raw(),
        })
    }
}

/// Rotates by an angle drawn uniformly from `[-max_degrees, max_degrees]`.
///
/// Pixels are sampled bilinearly. Samples beyond the border are mirrored
/// without repeating the edge pixel.
#[derive(Debug, Clone)]
pub struct RandomRotate {
    max_degrees: f64,
}

impl RandomRotate {
    /// Rotate the image and the fractional box by the given angle.
    ///
    /// The returned box is the axis-aligned hull of the rotated corners and
    /// may exceed the image frame.
    pub fn rotate_by(
        image: &Rgb32FImage,
        rect: &TLBR<f64>,
        degrees: f64,
    ) -> Result<(Rgb32FImage, TLBR<f64>)> {
        let (width, height) = image.dimensions();
        ensure!(width > 0 && height > 0, "cannot rotate an empty image");
        let size = HW::from_hw([height as f64, width as f64]);

        let affine = Affine::rotation_about(
            degrees.to_radians(),
            [size.w() / 2.0, size.h() / 2.0],
        );

        // rotate the box in pixel units, so that non-square images keep angles
        let to_unit = Transform::to_unit_frame(&size);
        let to_pixel = to_unit.inverse();
        let pixel_rect = &to_pixel * rect;
        let new_rect = &to_unit * &(&affine * &pixel_rect);

        // sample every output pixel center from the source image
        let inverse = affine.try_inverse()?;
        let new_image = Rgb32FImage::from_fn(width, height, |x, y| {
            let [sx, sy] = inverse.apply([x as f64 + 0.5, y as f64 + 0.5]);
            sample_bilinear(image, sx - 0.5, sy - 0.5)
        });

        Ok((new_image, new_rect))
    }
}

impl BoxAwareTransform for RandomRotate {
    fn forward(
        &self,
        image: &Rgb32FImage,
        rect: &TLBR<f64>,
    ) -> Result<(Rgb32FImage, Option<TLBR<f64>>)> {
        let mut rng = StdRng::from_entropy();
        let degrees = rng.gen_range((-self.max_degrees)..=self.max_degrees);
        let (image, rect) = Self::rotate_by(image, rect, degrees)?;
        Ok((image, Some(rect)))
    }
}

fn sample_bilinear(image: &Rgb32FImage, x: f64, y: f64) -> Rgb<f32> {
    let (width, height) = image.dimensions();
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = (x - x0) as f32;
    let fy = (y - y0) as f32;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let pixel = |xi: i64, yi: i64| {
        image
            .get_pixel(reflect_101(xi, width), reflect_101(yi, height))
            .0
    };
    let top_left = pixel(x0, y0);
    let top_right = pixel(x0 + 1, y0);
    let bottom_left = pixel(x0, y0 + 1);
    let bottom_right = pixel(x0 + 1, y0 + 1);

    let mut output = [0f32; 3];
    for (channel, value) in output.iter_mut().enumerate() {
        let top = top_left[channel] * (1.0 - fx) + top_right[channel] * fx;
        let bottom = bottom_left[channel] * (1.0 - fx) + bottom_right[channel] * fx;
        *value = (top * (1.0 - fy) + bottom * fy).clamp(0.0, 1.0);
    }
    Rgb(output)
}

/// Mirror an out-of-range index back into `0..len` as in `dcb|abcd|cba`.
fn reflect_101(index: i64, len: u32) -> u32 {
    let len = len as i64;
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let index = index.rem_euclid(period);
    let index = if index >= len { period - index } else { index };
    index as u32
}
