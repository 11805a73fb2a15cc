//! The random Gaussian blur.

use super::ImageTransform;
use crate::common::*;

/// Blurs with an odd kernel size drawn from an inclusive range.
#[derive(Debug, Clone)]
pub struct RandomGaussianBlur {
    kernel_sizes: Vec<usize>,
}

impl RandomGaussianBlur {
    pub fn new(min_kernel: usize, max_kernel: usize) -> Result<Self> {
        ensure!(
            min_kernel >= 3 && min_kernel <= max_kernel,
            "kernel range must satisfy 3 <= min <= max, but get [{}, {}]",
            min_kernel,
            max_kernel
        );
        let kernel_sizes: Vec<_> = (min_kernel..=max_kernel).filter(|k| k % 2 == 1).collect();
        ensure!(
            !kernel_sizes.is_empty(),
            "no odd kernel size in [{}, {}]",
            min_kernel,
            max_kernel
        );
        Ok(Self { kernel_sizes })
    }

    /// The standard deviation implied by a kernel size.
    pub fn kernel_sigma(kernel_size: usize) -> f32 {
        0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }

    pub fn blur_with_kernel(image: &Rgb32FImage, kernel_size: usize) -> Rgb32FImage {
        image::imageops::blur(image, Self::kernel_sigma(kernel_size))
    }
}

impl ImageTransform for RandomGaussianBlur {
    fn forward(&self, image: &Rgb32FImage) -> Result<Rgb32FImage> {
        let mut rng = StdRng::from_entropy();
        let kernel_size = *self
            .kernel_sizes
            .choose(&mut rng)
            .ok_or_else(|| format_err!("no kernel size to choose from"))?;
        Ok(Self::blur_with_kernel(image, kernel_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn kernel_sigma_values() {
        assert_abs_diff_eq!(RandomGaussianBlur::kernel_sigma(3), 0.8, epsilon = 1e-6);
        assert_abs_diff_eq!(RandomGaussianBlur::kernel_sigma(7), 1.4, epsilon = 1e-6);
    }

    #[test]
    fn blur_spreads_a_bright_spot() {
        let mut image = Rgb32FImage::new(9, 9);
        image.put_pixel(4, 4, Rgb([1.0, 1.0, 1.0]));
        let output = RandomGaussianBlur::blur_with_kernel(&image, 5);
        assert_eq!(output.dimensions(), (9, 9));
        assert!(output.get_pixel(4, 4).0[0] < 1.0);
        assert!(output.get_pixel(5, 4).0[0] > 0.0);
        assert!(output.iter().all(|value| (0.0..=1.0).contains(value)));
    }

    #[test]
    fn reject_bad_kernel_range() {
        assert!(RandomGaussianBlur::new(1, 7).is_err());
        assert!(RandomGaussianBlur::new(7, 5).is_err());
        assert!(RandomGaussianBlur::new(4, 4).is_err());
        assert_eq!(RandomGaussianBlur::new(3, 7).unwrap().kernel_sizes, vec![3, 5, 7]);
    }
}
