use super::{list_files, DetectionExample, GenericDataset, RandomAccessDataset};
use crate::{common::*, error::check_index, processor::ImageLoader};

/// All images of one room category, each labeled with no face.
#[derive(Debug)]
pub struct RoomScenes {
    name: String,
    paths: Vec<PathBuf>,
    loader: ImageLoader,
}

impl RoomScenes {
    pub fn load(dir: impl AsRef<Path>, loader: ImageLoader) -> Result<Self> {
        let dir = dir.as_ref();
        let paths = list_files(dir)?;
        let name = format!(
            "room-scenes/{}",
            dir.file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_default()
        );

        info!("loaded {} images for {}", paths.len(), name);

        Ok(Self {
            name,
            paths,
            loader,
        })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl GenericDataset for RoomScenes {
    fn name(&self) -> &str {
        &self.name
    }
}

impl RandomAccessDataset for RoomScenes {
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
