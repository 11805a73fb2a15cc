//! The per-example processing shared by the detection datasets.

use super::{to_chw_array, BoxAwareTransform, ImageTransform, Resize};
use crate::{common::*, dataset::DetectionExample};
use std::sync::Arc;

/// Applies the optional augmentation, then the final resize.
#[derive(Debug, Clone)]
pub struct DetectionProcessor {
    augmentation: Option<Arc<dyn BoxAwareTransform>>,
    resize: Resize,
    debug_augmentation: bool,
}

impl DetectionProcessor {
    pub fn new(resize: Resize) -> Self {
        Self {
            augmentation: None,
            resize,
            debug_augmentation: false,
        }
    }

    pub fn with_augmentation(mut self, augmentation: Arc<dyn BoxAwareTransform>) -> Self {
        self.augmentation = Some(augmentation);
        self
    }

    /// Log every augmentation outcome at debug level.
    pub fn debug_augmentation(mut self, enabled: bool) -> Self {
        self.debug_augmentation = enabled;
        self
    }

    pub fn resize(&self) -> &Resize {
        &self.resize
    }

    pub fn process(&self, image: Rgb32FImage, label: DetectionLabel) -> Result<DetectionExample> {
        let (image, label) = match (&self.augmentation, label) {
            (Some(augmentation), DetectionLabel::Present(rect)) => {
                let (image, new_rect) = augmentation.forward(&image, &rect)?;
                if self.debug_augmentation {
                    debug!("augmented box {:?} into {:?}", rect, new_rect);
                }
                (image, DetectionLabel::from(new_rect))
            }
            (_, label) => (image, label),
        };

        let image = self.resize.forward(&image)?;
        Ok(DetectionExample {
            image: to_chw_array(&image),
            label,
        })
    }
}
