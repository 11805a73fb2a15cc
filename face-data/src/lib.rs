//! Data loading pipelines for face detection and face recognition training.
//!
//! Datasets in [dataset] decode images on demand and produce fixed-shape
//! examples. The [loader] batches them and [pipeline::build] wires all
//! sources together from a [config::Config].

mod common;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod processor;

pub use error::DataError;
