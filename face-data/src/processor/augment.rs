//! The composed box-aware augmentation with the box drop policy.

use super::{
    BoxAwareTransform, BrightnessContrastInit, ImageTransform, RandomFlip, RandomGaussianBlur,
    RandomRotateInit,
};
use crate::{common::*, config::PreprocessorConfig};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AugmentationInit {
    pub rotate_prob: R64,
    pub rotate_degrees: R64,
    pub brightness_contrast_prob: R64,
    pub brightness_limit: R64,
    pub contrast_limit: R64,
    pub flip_prob: R64,
    pub blur_prob: R64,
    pub blur_kernel_range: (usize, usize),
    pub min_visibility: R64,
}

impl AugmentationInit {
    pub fn build(self) -> Result<Augmentation> {
        let Self {
            rotate_prob,
            rotate_degrees,
            brightness_contrast_prob,
            brightness_limit,
            contrast_limit,
            flip_prob,
            blur_prob,
            blur_kernel_range: (min_kernel, max_kernel),
            min_visibility,
        } = self;

        for prob in [
            rotate_prob,
            brightness_contrast_prob,
            flip_prob,
            blur_prob,
            min_visibility,
        ] {
            ensure!(
                (0.0..=1.0).contains(&prob.raw()),
                "probabilities and min_visibility must be in range [0, 1], but get {}",
                prob
            );
        }

        let rotate = RandomRotateInit {
            max_degrees: rotate_degrees,
        }
        .build()?;
        let color = BrightnessContrastInit {
            brightness_limit,
            contrast_limit,
        }
        .build()?;
        let blur = RandomGaussianBlur::new(min_kernel, max_kernel)?;

        // the order matters: geometric steps move the box that later steps see
        let steps = vec![
            (rotate_prob.raw(), Step::Geometric(Box::new(rotate))),
            (
                brightness_contrast_prob.raw(),
                Step::Photometric(Box::new(color)),
            ),
            (flip_prob.raw(), Step::Geometric(Box::new(RandomFlip))),
            (blur_prob.raw(), Step::Photometric(Box::new(blur))),
        ];

        Ok(Augmentation {
            steps,
            min_visibility: min_visibility.raw(),
        })
    }
}

impl From<&PreprocessorConfig> for AugmentationInit {
    fn from(config: &PreprocessorConfig) -> Self {
        let PreprocessorConfig {
            rotate_prob,
            rotate_degrees,
            brightness_contrast_prob,
            brightness_limit,
            contrast_limit,
            flip_prob,
            blur_prob,
            blur_kernel_range,
            min_visibility,
            ..
        } = *config;

        Self {
            rotate_prob,
            rotate_degrees,
            brightness_contrast_prob,
            brightness_limit,
            contrast_limit,
            flip_prob,
            blur_prob,
            blur_kernel_range,
            min_visibility,
        }
    }
}

#[derive(Debug)]
enum Step {
    Geometric(Box<dyn BoxAwareTransform>),
    Photometric(Box<dyn ImageTransform>),
}

/// Random rotation, brightness/contrast jitter, flip and blur, each applied
/// with its own probability.
///
/// The box is dropped if too little of it remains inside the frame.
#[derive(Debug)]
pub struct Augmentation {
    steps: Vec<(f64, Step)>,
    min_visibility: f64,
}

impl Augmentation {
    pub fn min_visibility(&self) -> f64 {
        self.min_visibility
    }

    /// Keep the transformed box only if its visible part covers at least
    /// `min_visibility` of the original box area.
    ///
    /// Both boxes are fractional. The kept box is not clipped to the frame.
    pub fn filter_visible(
        orig_rect: &TLBR<f64>,
        new_rect: TLBR<f64>,
        min_visibility: f64,
    ) -> Option<TLBR<f64>> {
        let frame = TLBR::from_tlbr([0.0, 0.0, 1.0, 1.0]);
        let orig_area = orig_rect.area();
        if orig_area <= 0.0 {
            return None;
        }
        let visible_area = new_rect.intersect_with(&frame)?.area();
        (visible_area > 0.0 && visible_area / orig_area >= min_visibility).then(|| new_rect)
    }
}

impl BoxAwareTransform for Augmentation {
    fn forward(
        &self,
        image: &Rgb32FImage,
        rect: &TLBR<f64>,
    ) -> Result<(Rgb32FImage, Option<TLBR<f64>>)> {
        let mut rng = StdRng::from_entropy();
        let mut image = image.clone();
        let mut new_rect = rect.clone();

        for (prob, step) in &self.steps {
            if !rng.gen_bool(*prob) {
                continue;
            }

            match step {
                Step::Geometric(transform) => {
                    let (next_image, next_rect) = transform.forward(&image, &new_rect)?;
                    image = next_image;
                    new_rect = match next_rect {
                        Some(next_rect) => next_rect,
                        None => return Ok((image, None)),
                    };
                }
                Step::Photometric(transform) => {
                    image = transform.forward(&image)?;
                }
            }
        }

        let new_rect = Self::filter_visible(rect, new_rect, self.min_visibility);
        Ok((image, new_rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::RandomRotate;

    fn default_init() -> AugmentationInit {
        (&PreprocessorConfig::default()).into()
    }

    #[test]
    fn box_rotated_out_of_frame_is_dropped() {
        let image = Rgb32FImage::new(100, 100);
        let rect = TLBR::try_from_xyxy([0.0, 0.0, 0.1, 0.1]).unwrap();
        let (_, rotated) = RandomRotate::rotate_by(&image, &rect, 45.0).unwrap();

        let [x0, y0, x1, y1] = rotated.xyxy();
        assert!(x1 < 0.0 || y1 < 0.0 || x0 > 1.0 || y0 > 1.0);
        assert_eq!(Augmentation::filter_visible(&rect, rotated, 0.1), None);
    }

    #[test]
    fn partly_visible_box() {
        let orig = TLBR::try_from_xyxy([0.0, 0.0, 0.2, 0.2]).unwrap();

        // a quarter of the box remains visible
        let moved = TLBR::try_from_xyxy([-0.1, -0.1, 0.1, 0.1]).unwrap();
        let kept = Augmentation::filter_visible(&orig, moved.clone(), 0.1).unwrap();
        // kept boxes are not clipped
        assert_eq!(kept, moved);
        assert_eq!(Augmentation::filter_visible(&orig, moved, 0.3), None);
    }

    #[test]
    fn degenerate_box_is_dropped() {
        let orig = TLBR::try_from_xyxy([0.5, 0.5, 0.5, 0.7]).unwrap();
        assert_eq!(Augmentation::filter_visible(&orig, orig.clone(), 0.0), None);
    }

    #[test]
    fn disabled_steps_keep_inputs() {
        let augmentation = AugmentationInit {
            rotate_prob: r64(0.0),
            brightness_contrast_prob: r64(0.0),
            flip_prob: r64(0.0),
            blur_prob: r64(0.0),
            ..default_init()
        }
        .build()
        .unwrap();

        let image = Rgb32FImage::from_fn(8, 8, |x, y| Rgb([x as f32 / 8.0, y as f32 / 8.0, 0.0]));
        let rect = TLBR::try_from_xyxy([0.25, 0.25, 0.5, 0.75]).unwrap();
        let (new_image, new_rect) = augmentation.forward(&image, &rect).unwrap();
        assert_eq!(new_image, image);
        assert_eq!(new_rect, Some(rect));
    }

    #[test]
    fn full_augmentation_keeps_centered_box() {
        let augmentation = AugmentationInit {
            rotate_prob: r64(1.0),
            brightness_contrast_prob: r64(1.0),
            flip_prob: r64(1.0),
            blur_prob: r64(1.0),
            ..default_init()
        }
        .build()
        .unwrap();

        let image = Rgb32FImage::from_pixel(16, 16, Rgb([0.5, 0.5, 0.5]));
        let rect = TLBR::try_from_xyxy([0.25, 0.25, 0.75, 0.75]).unwrap();
        for _ in 0..8 {
            let (new_image, new_rect) = augmentation.forward(&image, &rect).unwrap();
            assert_eq!(new_image.dimensions(), (16, 16));
            assert!(new_image.iter().all(|value| (0.0..=1.0).contains(value)));
            assert!(new_rect.is_some());
        }
    }

    #[test]
    fn reject_bad_probability() {
        let result = AugmentationInit {
            flip_prob: r64(1.5),
            ..default_init()
        }
        .build();
        assert!(result.is_err());
    }
}
