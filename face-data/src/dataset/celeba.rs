use super::{GenericDataset, RandomAccessDataset, TripletExample};
use crate::{common::*, error::check_index, processor::ImageLoader};

/// A row of the triplet table. Paths are relative to the image directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TripletRow {
    pub anchor: PathBuf,
    pub pos: PathBuf,
    pub neg: PathBuf,
}

/// Celebrity face triplets for embedding training.
#[derive(Debug)]
pub struct CelebaTriplets {
    image_dir: PathBuf,
    rows: Vec<TripletRow>,
    loader: ImageLoader,
}

impl CelebaTriplets {
    pub fn load(
        image_dir: impl AsRef<Path>,
        triplets_file: impl AsRef<Path>,
        loader: ImageLoader,
    ) -> Result<Self> {
        let triplets_file = triplets_file.as_ref();
        let rows: Vec<TripletRow> = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(triplets_file)
            .with_context(|| format!("failed to open '{}'", triplets_file.display()))?
            .deserialize()
            .collect::<Result<_, _>>()
            .with_context(|| format!("failed to parse '{}'", triplets_file.display()))?;

        info!("loaded {} face triplets", rows.len());

        Ok(Self {
            image_dir: image_dir.as_ref().to_owned(),
            rows,
            loader,
        })
    }

    pub fn rows(&self) -> &[TripletRow] {
        &self.rows
    }
}

impl GenericDataset for CelebaTriplets {
    fn name(&self) -> &str {
        "celeba-triplets"
    }
}

impl RandomAccessDataset for CelebaTriplets {
    type Item = TripletExample;

    fn num_records(&self) -> usize {
        self.rows.len()
    }

    fn nth(&self, index: usize) -> Result<Self::Item> {
        check_index(index, self.rows.len())?;
        let TripletRow { anchor, pos, neg } = &self.rows[index];

        Ok(TripletExample {
            anchor: self.loader.load(self.image_dir.join(anchor))?,
            positive: self.loader.load(self.image_dir.join(pos))?,
            negative: self.loader.load(self.image_dir.join(neg))?,
        })
    }
}
