//! Image decoding, resizing and layout conversion.

use super::ImageTransform;
use crate::{common::*, error::DataError};

/// Decode an image file into RGB order with intensities in `[0, 1]`.
///
/// Gray-scale and alpha images are converted to three channels.
pub fn load_image(path: impl AsRef<Path>) -> Result<Rgb32FImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| DataError::Decode {
        path: path.to_owned(),
        source,
    })?;
    Ok(image.into_rgb32f())
}

/// Convert an HWC image into a CHW array.
pub fn to_chw_array(image: &Rgb32FImage) -> Array3<f32> {
    let (width, height) = image.dimensions();
    Array3::from_shape_fn((3, height as usize, width as usize), |(channel, y, x)| {
        image.get_pixel(x as u32, y as u32).0[channel]
    })
}

/// Exact resize to a fixed geometry, ignoring the aspect ratio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resize {
    height: u32,
    width: u32,
}

impl Resize {
    pub fn new(height: usize, width: usize) -> Result<Self> {
        ensure!(
            height > 0 && width > 0,
            "resize target must be positive, but get {}x{}",
            height,
            width
        );
        Ok(Self {
            height: u32::try_from(height)?,
            width: u32::try_from(width)?,
        })
    }

    pub fn square(size: usize) -> Result<Self> {
        Self::new(size, size)
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }
}

impl ImageTransform for Resize {
    fn forward(&self, image: &Rgb32FImage) -> Result<Rgb32FImage> {
        if image.dimensions() == (self.width, self.height) {
            return Ok(image.clone());
        }
        Ok(image::imageops::resize(
            image,
            self.width,
            self.height,
            FilterType::Triangle,
        ))
    }
}

/// Decode, resize and convert an image in one call.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    resize: Resize,
}

impl ImageLoader {
    pub fn new(resize: Resize) -> Self {
        Self { resize }
    }

    pub fn resize(&self) -> &Resize {
        &self.resize
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<Array3<f32>> {
        let image = load_image(path)?;
        let image = self.resize.forward(&image)?;
        Ok(to_chw_array(&image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    #[test]
    fn load_missing_file_is_decode_error() {
        let err = load_image("/nonexistent/face.jpg").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::Decode { .. })
        ));
    }

    #[test]
    fn load_converts_and_normalizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        image::GrayImage::from_pixel(6, 4, image::Luma([255]))
            .save(&path)
            .unwrap();

        let array = ImageLoader::new(Resize::new(8, 10).unwrap())
            .load(&path)
            .unwrap();
        assert_eq!(array.shape(), &[3, 8, 10]);
        assert!(array.iter().all(|&value| (value - 1.0).abs() < 1e-5));
    }

    #[test]
    fn chw_layout() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(1, 0, Rgb([0, 255, 51]));
        let image = DynamicImage::ImageRgb8(image).into_rgb32f();
        let array = to_chw_array(&image);
        assert_eq!(array.shape(), &[3, 1, 2]);
        assert_eq!(array[[0, 0, 1]], 0.0);
        assert_eq!(array[[1, 0, 1]], 1.0);
        assert!((array[[2, 0, 1]] - 0.2).abs() < 1e-6);
        assert_eq!(array[[1, 0, 0]], 0.0);
    }
}
