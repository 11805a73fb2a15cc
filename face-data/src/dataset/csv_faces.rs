use super::{GenericDataset, RandomAccessDataset};
use crate::{
    common::*,
    dataset::DetectionExample,
    error::check_index,
    processor::{load_image, DetectionProcessor},
};

/// A row of the CSV-labeled face table.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvFaceRow {
    /// The image path relative to the image directory.
    pub image_file: PathBuf,
    /// Absolute `[x0, y0, x1, y1]` pixel coordinates.
    pub xyxy: [f64; 4],
}

/// The larger face detection dataset labeled by a CSV table.
///
/// Column 0 holds the image path and columns 1 to 4 hold the box. Boxes are
/// normalized by the size of the decoded image, so a row pointing to a
/// missing file only fails when it is accessed.
#[derive(Debug)]
pub struct CsvFaces {
    image_dir: PathBuf,
    rows: Vec<CsvFaceRow>,
    processor: DetectionProcessor,
}

impl CsvFaces {
    pub fn load(
        image_dir: impl AsRef<Path>,
        label_file: impl AsRef<Path>,
        processor: DetectionProcessor,
    ) -> Result<Self> {
        let image_dir = image_dir.as_ref();
        let label_file = label_file.as_ref();
        let rows = load_csv_faces(label_file)
            .with_context(|| format!("failed to load '{}'", label_file.display()))?;

        info!("loaded {} CSV-labeled faces", rows.len());

        Ok(Self {
            image_dir: image_dir.to_owned(),
            rows,
            processor,
        })
    }

    pub fn rows(&self) -> &[CsvFaceRow] {
        &self.rows
    }
}

impl GenericDataset for CsvFaces {
    fn name(&self) -> &str {
        "csv-faces"
    }
}

impl RandomAccessDataset for CsvFaces {
    type Item = DetectionExample;

    fn num_records(&self) -> usize {
        self.rows.len()
    }

    fn nth(&self, index: usize) -> Result<Self::Item> {
        check_index(index, self.rows.len())?;
        let CsvFaceRow { image_file, xyxy } = &self.rows[index];
        let path = self.image_dir.join(image_file);

        let image = load_image(&path)?;
        let (width, height) = image.dimensions();
        let native = HW::try_from_positive_hw([height as f64, width as f64])?;
        let label = DetectionLabel::from_pixel_xyxy(*xyxy, &native)
            .with_context(|| format!("invalid box for image '{}'", path.display()))?;

        self.processor
            .process(image, label)
            .with_context(|| format!("failed to process image '{}'", path.display()))
    }
}

pub fn load_csv_faces(label_file: impl AsRef<Path>) -> Result<Vec<CsvFaceRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(label_file)?;

    reader
        .records()
        .enumerate()
        .map(|(line, record)| -> Result<_> {
            let record = record?;
            ensure!(
                record.len() >= 5,
                "row {} has {} columns, but at least 5 are expected",
                line + 1,
                record.len()
            );

            let image_file = PathBuf::from(&record[0]);
            let mut xyxy = [0.0; 4];
            let row = line + 1;
            for (coord, text) in xyxy.iter_mut().zip(record.iter().skip(1)) {
                *coord = text
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid coordinate '{}' in row {}", text, row))?;
            }

            Ok(CsvFaceRow { image_file, xyxy })
        })
        .collect()
}
