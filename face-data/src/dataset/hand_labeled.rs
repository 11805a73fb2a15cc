use super::{file_name_str, glob_files, GenericDataset, RandomAccessDataset};
use crate::{
    common::*,
    dataset::DetectionExample,
    error::check_index,
    processor::{load_image, DetectionProcessor, ImageTransform, Resize},
};

/// A row of the hand-labeled face table, in absolute pixel units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HandLabeledRow {
    pub image_name: String,
    pub width: f64,
    pub height: f64,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct FaceRecord {
    path: PathBuf,
    label: DetectionLabel,
}

/// The small hand-labeled face dataset with one face box per image.
#[derive(Debug)]
pub struct HandLabeledFaces {
    records: Vec<FaceRecord>,
    intermediate: Resize,
    processor: DetectionProcessor,
}

impl HandLabeledFaces {
    /// Load the label table and keep the images that are both listed in the
    /// table and present in `image_dir`.
    ///
    /// Only the first box of an image is used. Images resize to
    /// `intermediate_size` before the processor runs.
    pub fn load(
        image_dir: impl AsRef<Path>,
        label_file: impl AsRef<Path>,
        intermediate_size: usize,
        processor: DetectionProcessor,
    ) -> Result<Self> {
        let image_dir = image_dir.as_ref();
        let label_file = label_file.as_ref();

        // parse label file, keeping the first row per image
        let rows: Vec<HandLabeledRow> = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(label_file)
            .with_context(|| format!("failed to open '{}'", label_file.display()))?
            .deserialize()
            .collect::<Result<_, _>>()
            .with_context(|| format!("failed to parse '{}'", label_file.display()))?;
        let num_rows = rows.len();

        let mut first_rows = IndexMap::new();
        rows.into_iter().for_each(|row| {
            first_rows.entry(row.image_name.clone()).or_insert(row);
        });

        // intersect with the image directory listing
        let image_names: HashSet<String> = glob_files(image_dir, "*.jpg")?
            .iter()
            .filter_map(|path| file_name_str(path).map(ToOwned::to_owned))
            .collect();

        let mut filtered_row_count = 0;

        let records: Vec<_> = first_rows
            .into_iter()
            .filter(|(name, _)| image_names.contains(name))
            .filter_map(|(name, row)| {
                let HandLabeledRow {
                    width,
                    height,
                    x0,
                    y0,
                    x1,
                    y1,
                    ..
                } = row;
                let label = HW::try_from_positive_hw([height, width])
                    .and_then(|native| DetectionLabel::from_pixel_xyxy([x0, y0, x1, y1], &native));

                match label {
                    Ok(label) => Some(FaceRecord {
                        path: image_dir.join(&name),
                        label,
                    }),
                    Err(err) => {
                        debug!("skip image '{}': {:#}", name, err);
                        filtered_row_count += 1;
                        None
                    }
                }
            })
            .collect();

        if filtered_row_count > 0 {
            warn!(
                "filtered out {} bad label rows in '{}'",
                filtered_row_count,
                label_file.display()
            );
        }
        let num_labeled = records.len() + filtered_row_count;
        if num_labeled < image_names.len() {
            debug!(
                "{} images in '{}' have no label",
                image_names.len() - num_labeled,
                image_dir.display()
            );
        }
        info!(
            "loaded {} hand-labeled faces from {} label rows",
            records.len(),
            num_rows
        );

        Ok(Self {
            records,
            intermediate: Resize::square(intermediate_size)?,
            processor,
        })
    }

    /// The image paths in record order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.records.iter().map(|record| record.path.as_path())
    }
}

impl GenericDataset for HandLabeledFaces {
    fn name(&self) -> &str {
        "hand-labeled-faces"
    }
}

impl RandomAccessDataset for HandLabeledFaces {
    type Item = DetectionExample;

    fn num_records(&self) -> usize {
        self.records.len()
    }

    fn nth(&self, index: usize) -> Result<Self::Item> {
        check_index(index, self.records.len())?;
        let FaceRecord { path, label } = &self.records[index];

        let image = load_image(path)?;
        let image = self.intermediate.forward(&image)?;
        self.processor
            .process(image, label.clone())
            .with_context(|| format!("failed to process image '{}'", path.display()))
    }
}
