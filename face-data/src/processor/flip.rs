//! The random mirror flip.

use super::BoxAwareTransform;
use crate::common::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipMode {
    Horizontal,
    Vertical,
    Both,
}

impl FlipMode {
    const ALL: [FlipMode; 3] = [FlipMode::Horizontal, FlipMode::Vertical, FlipMode::Both];
}

/// Mirrors the image horizontally, vertically or both, chosen uniformly.
#[derive(Debug, Clone, Default)]
pub struct RandomFlip;

impl RandomFlip {
    /// Flip the image and the fractional box with the given mode.
    pub fn flip(image: &Rgb32FImage, rect: &TLBR<f64>, mode: FlipMode) -> (Rgb32FImage, TLBR<f64>) {
        use image::imageops::{flip_horizontal, flip_vertical};

        match mode {
            FlipMode::Horizontal => (flip_horizontal(image), rect.flip_horizontal(1.0)),
            FlipMode::Vertical => (flip_vertical(image), rect.flip_vertical(1.0)),
            FlipMode::Both => (
                flip_vertical(&flip_horizontal(image)),
                rect.flip_horizontal(1.0).flip_vertical(1.0),
            ),
        }
    }
}

impl BoxAwareTransform for RandomFlip {
    fn forward(
        &self,
        image: &Rgb32FImage,
        rect: &TLBR<f64>,
    ) -> Result<(Rgb32FImage, Option<TLBR<f64>>)> {
        let mut rng = StdRng::from_entropy();
        let mode = *FlipMode::ALL
            .choose(&mut rng)
            .ok_or_else(|| format_err!("no flip mode to choose from"))?;
        let (image, rect) = Self::flip(image, rect, mode);
        Ok((image, Some(rect)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked_image() -> Rgb32FImage {
        // a 4x2 image with one bright pixel at the top-left corner
        let mut image = Rgb32FImage::new(4, 2);
        image.put_pixel(0, 0, Rgb([1.0, 1.0, 1.0]));
        image
    }

    #[test]
    fn flip_moves_pixels_and_box_together() {
        let image = marked_image();
        let rect = TLBR::try_from_xyxy([0.0, 0.0, 0.25, 0.5]).unwrap();

        let (flipped, new_rect) = RandomFlip::flip(&image, &rect, FlipMode::Horizontal);
        assert_eq!(flipped.get_pixel(3, 0).0, [1.0; 3]);
        assert_eq!(new_rect.xyxy(), [0.75, 0.0, 1.0, 0.5]);

        let (flipped, new_rect) = RandomFlip::flip(&image, &rect, FlipMode::Vertical);
        assert_eq!(flipped.get_pixel(0, 1).0, [1.0; 3]);
        assert_eq!(new_rect.xyxy(), [0.0, 0.5, 0.25, 1.0]);

        let (flipped, new_rect) = RandomFlip::flip(&image, &rect, FlipMode::Both);
        assert_eq!(flipped.get_pixel(3, 1).0, [1.0; 3]);
        assert_eq!(new_rect.xyxy(), [0.75, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn random_flip_keeps_box_area() {
        let image = marked_image();
        let rect = TLBR::try_from_xyxy([0.0, 0.0, 0.25, 0.5]).unwrap();
        let (_, new_rect) = RandomFlip.forward(&image, &rect).unwrap();
        assert_eq!(new_rect.unwrap().area(), rect.area());
    }
}
