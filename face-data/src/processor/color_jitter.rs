//! The random brightness and contrast jitter.

use super::ImageTransform;
use crate::common::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrightnessContrastInit {
    pub brightness_limit: R64,
    pub contrast_limit: R64,
}

impl BrightnessContrastInit {
    pub fn build(self) -> Result<RandomBrightnessContrast> {
        let Self {
            brightness_limit,
            contrast_limit,
        } = self;
        ensure!(
            brightness_limit >= 0.0,
            "brightness_limit must be non-negative"
        );
        ensure!(contrast_limit >= 0.0, "contrast_limit must be non-negative");

        Ok(RandomBrightnessContrast {
            brightness_limit: brightness_limit.raw(),
            contrast_limit: contrast_limit.raw(),
        })
    }
}

/// Scales intensities by `1 + c` and shifts them by `b`, where `c` and `b`
/// are drawn from the symmetric limits.
#[derive(Debug, Clone)]
pub struct RandomBrightnessContrast {
    brightness_limit: f64,
    contrast_limit: f64,
}

impl RandomBrightnessContrast {
    /// Compute `clamp(value * alpha + beta, 0, 1)` on every intensity.
    pub fn adjust(image: &Rgb32FImage, alpha: f32, beta: f32) -> Rgb32FImage {
        let mut output = image.clone();
        output
            .iter_mut()
            .for_each(|value| *value = (*value * alpha + beta).clamp(0.0, 1.0));
        output
    }
}

impl ImageTransform for RandomBrightnessContrast {
    fn forward(&self, image: &Rgb32FImage) -> Result<Rgb32FImage> {
        let mut rng = StdRng::from_entropy();
        let contrast = rng.gen_range((-self.contrast_limit)..=self.contrast_limit);
        let brightness = rng.gen_range((-self.brightness_limit)..=self.brightness_limit);
        let alpha = 1.0 + contrast as f32;
        let beta = brightness as f32;
        Ok(Self::adjust(image, alpha, beta))
    }
}
