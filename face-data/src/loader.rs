//! Batching over random access datasets.

use crate::{
    common::*,
    config::LoaderConfig,
    dataset::{DetectionExample, RandomAccessDataset, TripletExample},
    error::DataError,
};

/// Examples that can be stacked into a batch.
pub trait Collate
where
    Self: Sized,
{
    type Batch;

    fn collate(examples: Vec<Self>) -> Result<Self::Batch>;
}

/// A batch of detection examples.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionBatch {
    /// Images in `[batch, 3, height, width]` shape.
    pub images: Array4<f32>,
    /// Encoded labels in `[batch, 5]` shape.
    pub labels: Array2<f32>,
}

impl DetectionBatch {
    pub fn len(&self) -> usize {
        self.labels.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A batch of face triplets, each in `[batch, 3, height, width]` shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TripletBatch {
    pub anchors: Array4<f32>,
    pub positives: Array4<f32>,
    pub negatives: Array4<f32>,
}

fn stack_images<'a>(images: impl IntoIterator<Item = &'a Array3<f32>>) -> Result<Array4<f32>> {
    let views: Vec<ArrayView3<f32>> = images.into_iter().map(|image| image.view()).collect();
    let batch = ndarray::stack(Axis(0), &views).map_err(|err| DataError::Collate {
        reason: err.to_string(),
    })?;
    Ok(batch)
}

impl Collate for DetectionExample {
    type Batch = DetectionBatch;

    fn collate(examples: Vec<Self>) -> Result<Self::Batch> {
        ensure!(
            !examples.is_empty(),
            DataError::Collate {
                reason: "empty batch".into()
            }
        );

        let images = stack_images(examples.iter().map(|example| &example.image))?;
        let labels: Vec<f32> = examples
            .iter()
            .flat_map(|example| example.label.to_array())
            .collect();
        let labels = Array2::from_shape_vec((examples.len(), 5), labels)?;

        Ok(DetectionBatch { images, labels })
    }
}

impl Collate for TripletExample {
    type Batch = TripletBatch;

    fn collate(examples: Vec<Self>) -> Result<Self::Batch> {
        ensure!(
            !examples.is_empty(),
            DataError::Collate {
                reason: "empty batch".into()
            }
        );

        Ok(TripletBatch {
            anchors: stack_images(examples.iter().map(|example| &example.anchor))?,
            positives: stack_images(examples.iter().map(|example| &example.positive))?,
            negatives: stack_images(examples.iter().map(|example| &example.negative))?,
        })
    }
}

/// Iterates a dataset in batches, one pass per [BatchLoader::epoch] call.
#[derive(Debug)]
pub struct BatchLoader<D> {
    dataset: D,
    batch_size: usize,
    shuffle: bool,
    drop_last: bool,
    seed: Option<u64>,
    num_epochs: usize,
}

impl<D> BatchLoader<D>
where
    D: RandomAccessDataset,
    D::Item: Collate,
{
    pub fn new(dataset: D, batch_size: usize, config: &LoaderConfig) -> Result<Self> {
        let LoaderConfig {
            shuffle,
            drop_last,
            seed,
        } = *config;
        ensure!(batch_size > 0, "batch_size must be positive");

        Ok(Self {
            dataset,
            batch_size,
            shuffle,
            drop_last,
            seed,
            num_epochs: 0,
        })
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The number of batches in one pass.
    pub fn num_batches(&self) -> usize {
        let num_records = self.dataset.num_records();
        if self.drop_last {
            num_records / self.batch_size
        } else {
            (num_records + self.batch_size - 1) / self.batch_size
        }
    }

    /// Start a new pass over the dataset.
    ///
    /// Each pass draws a fresh order when shuffling is enabled. With a seed,
    /// the order of pass `k` is derived from `seed + k`.
    pub fn epoch(&mut self) -> Epoch<'_, D> {
        let epoch_index = self.num_epochs;
        self.num_epochs += 1;

        let mut order: Vec<usize> = (0..self.dataset.num_records()).collect();
        if self.shuffle {
            let mut rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(epoch_index as u64)),
                None => StdRng::from_entropy(),
            };
            order.shuffle(&mut rng);
        }
        if self.drop_last {
            order.truncate(self.num_batches() * self.batch_size);
        }

        debug!(
            "epoch {} over {} with {} batches",
            epoch_index,
            self.dataset.name(),
            self.num_batches()
        );

        Epoch {
            loader: &*self,
            order,
            cursor: 0,
        }
    }
}

/// One pass over a [BatchLoader].
///
/// A failing example fails its whole batch.
#[derive(Debug)]
pub struct Epoch<'a, D> {
    loader: &'a BatchLoader<D>,
    order: Vec<usize>,
    cursor: usize,
}

impl<'a, D> Epoch<'a, D> {
    /// The record indices visited by this pass, in visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }
}

impl<'a, D> Iterator for Epoch<'a, D>
where
    D: RandomAccessDataset,
    D::Item: Collate,
{
    type Item = Result<<D::Item as Collate>::Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.order.len() {
            return None;
        }

        let end = (self.cursor + self.loader.batch_size).min(self.order.len());
        let indices = &self.order[self.cursor..end];
        self.cursor = end;

        let batch = indices
            .iter()
            .map(|&index| self.loader.dataset.nth(index))
            .collect::<Result<Vec<_>>>()
            .and_then(<D::Item as Collate>::collate);
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.order.len() - self.cursor;
        let num_batches = (remaining + self.loader.batch_size - 1) / self.loader.batch_size;
        (num_batches, Some(num_batches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dataset::GenericDataset, error::check_index};

    #[derive(Debug)]
    struct Tiles {
        len: usize,
    }

    impl GenericDataset for Tiles {
        fn name(&self) -> &str {
            "tiles"
        }
    }

    impl RandomAccessDataset for Tiles {
        type Item = DetectionExample;

        fn num_records(&self) -> usize {
            self.len
        }

        fn nth(&self, index: usize) -> Result<Self::Item> {
            check_index(index, self.len)?;
            let label = if index % 2 == 0 {
                DetectionLabel::Absent
            } else {
                DetectionLabel::Present(TLBR::try_from_xyxy([0.1, 0.2, 0.3, 0.4])?)
            };
            Ok(DetectionExample {
                image: Array3::from_elem((3, 4, 4), index as f32),
                label,
            })
        }
    }

    fn loader(
        len: usize,
        batch_size: usize,
        drop_last: bool,
        seed: Option<u64>,
    ) -> BatchLoader<Tiles> {
        let config = LoaderConfig {
            shuffle: true,
            drop_last,
            seed,
        };
        BatchLoader::new(Tiles { len }, batch_size, &config).unwrap()
    }

    #[test]
    fn detection_batch_shapes() {
        let mut loader = loader(7, 3, false, Some(1));
        assert_eq!(loader.num_batches(), 3);

        let batches: Vec<_> = loader.epoch().collect::<Result<_>>().unwrap();
        let sizes: Vec<_> = batches.iter().map(|batch| batch.len()).collect();
        assert_eq!(sizes, [3, 3, 1]);
        assert_eq!(batches[0].images.shape(), &[3, 3, 4, 4]);
        assert_eq!(batches[0].labels.shape(), &[3, 5]);

        // the label row follows the image it was drawn with
        for batch in &batches {
            for (image, label) in batch.images.outer_iter().zip(batch.labels.outer_iter()) {
                let index = image[[0, 0, 0]] as usize;
                let expect = if index % 2 == 0 { 0.0 } else { 1.0 };
                assert_eq!(label[0], expect);
            }
        }
    }

    #[test]
    fn drop_last_discards_short_batch() {
        let mut loader = loader(7, 3, true, Some(1));
        assert_eq!(loader.num_batches(), 2);
        let sizes: Vec<_> = loader.epoch().map(|batch| batch.unwrap().len()).collect();
        assert_eq!(sizes, [3, 3]);
    }

    #[test]
    fn epochs_are_permutations() {
        let mut loader = loader(10, 4, false, Some(7));
        let first = loader.epoch().order().to_vec();
        let second = loader.epoch().order().to_vec();

        let mut sorted = first.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
        assert_ne!(first, second);

        // the same seed reproduces the same sequence of passes
        let mut replay = self::loader(10, 4, false, Some(7));
        assert_eq!(replay.epoch().order(), first.as_slice());
        assert_eq!(replay.epoch().order(), second.as_slice());
    }

    #[test]
    fn no_shuffle_keeps_order() {
        let config = LoaderConfig {
            shuffle: false,
            drop_last: false,
            seed: None,
        };
        let mut loader = BatchLoader::new(Tiles { len: 5 }, 2, &config).unwrap();
        assert_eq!(loader.epoch().order(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn collate_rejects_mismatched_shapes() {
        let examples = vec![
            DetectionExample {
                image: Array3::zeros((3, 4, 4)),
                label: DetectionLabel::Absent,
            },
            DetectionExample {
                image: Array3::zeros((3, 5, 4)),
                label: DetectionLabel::Absent,
            },
        ];
        let err = DetectionExample::collate(examples).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::Collate { .. })
        ));
    }

    #[test]
    fn triplet_batch_shapes() {
        let example = TripletExample {
            anchor: Array3::zeros((3, 2, 2)),
            positive: Array3::ones((3, 2, 2)),
            negative: Array3::zeros((3, 2, 2)),
        };
        let batch = TripletExample::collate(vec![example.clone(), example]).unwrap();
        assert_eq!(batch.anchors.shape(), &[2, 3, 2, 2]);
        assert_eq!(batch.positives[[1, 2, 1, 1]], 1.0);
    }
}
