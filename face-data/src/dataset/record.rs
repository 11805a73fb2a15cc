use crate::common::*;

/// An image with its detection target.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionExample {
    /// CHW image with intensities in `[0, 1]`.
    pub image: Array3<f32>,
    pub label: DetectionLabel,
}

/// Three images of which the first two show the same identity.
#[derive(Debug, Clone, PartialEq)]
pub struct TripletExample {
    pub anchor: Array3<f32>,
    pub positive: Array3<f32>,
    pub negative: Array3<f32>,
}
