//! Data preprocessing building blocks.

pub mod augment;
pub mod color_jitter;
pub mod detection;
pub mod flip;
pub mod gaussian_blur;
pub mod image_loader;
pub mod random_rotate;
pub mod transform;

pub use augment::*;
pub use color_jitter::*;
pub use detection::*;
pub use flip::*;
pub use gaussian_blur::*;
pub use image_loader::*;
pub use random_rotate::*;
pub use transform::*;
