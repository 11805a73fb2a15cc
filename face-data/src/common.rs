//! Common imports from external crates.

pub use anyhow::{ensure, format_err, Context as _, Result};
pub use bbox::{prelude::*, Affine, Transform, HW, TLBR};
pub use image::{imageops::FilterType, Rgb, Rgb32FImage};
pub use indexmap::IndexMap;
pub use itertools::Itertools as _;
pub use label::DetectionLabel;
pub use log::{debug, info, warn};
pub use ndarray::{Array2, Array3, Array4, ArrayView3, Axis};
pub use noisy_float::prelude::*;
pub use rand::{prelude::*, rngs::StdRng, seq::SliceRandom};
pub use serde::{Deserialize, Serialize};
pub use std::{
    collections::HashSet,
    fmt::Debug,
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};
