use super::{list_files, DetectionExample, GenericDataset, RandomAccessDataset};
use crate::{common::*, error::check_index, processor::ImageLoader};

/// The room categories sampled as face-free backgrounds.
pub const BACKGROUND_CATEGORIES: [&str; 5] =
    ["Bathroom", "Bedroom", "Dinning", "Kitchen", "Livingroom"];

/// A random subset of room scenes across all categories, labeled with no face.
#[derive(Debug)]
pub struct BackgroundScenes {
    paths: Vec<PathBuf>,
    loader: ImageLoader,
}

impl BackgroundScenes {
    /// List the category folders under `root_dir`, shuffle the union once and
    /// keep at most `limit` images.
    ///
    /// The shuffle is reproducible if `seed` is set.
    pub fn load(
        root_dir: impl AsRef<Path>,
        limit: usize,
        seed: Option<u64>,
        loader: ImageLoader,
    ) -> Result<Self> {
        let root_dir = root_dir.as_ref();

        let mut paths = vec![];
        for category in BACKGROUND_CATEGORIES {
            paths.extend(list_files(root_dir.join(category))?);
        }
        let num_found = paths.len();

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        paths.shuffle(&mut rng);
        paths.truncate(limit);

        info!(
            "sampled {} background images out of {}",
            paths.len(),
            num_found
        );

        Ok(Self { paths, loader })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl GenericDataset for BackgroundScenes {
    fn name(&self) -> &str {
        "background-scenes"
    }
}

impl RandomAccessDataset for BackgroundScenes {
    type Item = DetectionExample;

    fn num_records(&self) -> usize {
        self.paths.len()
    }

    fn nth(&self, index: usize) -> Result<Self::Item> {
        check_index(index, self.paths.len())?;
        let image = self.loader.load(&self.paths[index])?;
        Ok(DetectionExample {
            image,
            label: DetectionLabel::Absent,
        })
    }
}
