use super::{GenericDataset, RandomAccessDataset};
use crate::{common::*, error::check_index};

/// Several datasets laid end to end.
///
/// The index space is partitioned in member order.
#[derive(Debug)]
pub struct ConcatDataset<T> {
    name: String,
    datasets: Vec<Box<dyn RandomAccessDataset<Item = T>>>,
    /// The exclusive end index of each member.
    ends: Vec<usize>,
}

impl<T> ConcatDataset<T> {
    pub fn new(
        name: impl Into<String>,
        datasets: Vec<Box<dyn RandomAccessDataset<Item = T>>>,
    ) -> Result<Self> {
        ensure!(!datasets.is_empty(), "at least one dataset is required");

        let ends: Vec<_> = datasets
            .iter()
            .scan(0, |total, dataset| {
                *total += dataset.num_records();
                Some(*total)
            })
            .collect();

        let name = name.into();
        info!(
            "{} concatenates {}",
            name,
            datasets
                .iter()
                .map(|dataset| format!("{} ({})", dataset.name(), dataset.num_records()))
                .join(", ")
        );

        Ok(Self {
            name,
            datasets,
            ends,
        })
    }

    pub fn datasets(&self) -> &[Box<dyn RandomAccessDataset<Item = T>>] {
        &self.datasets
    }

    /// Map a global index to the member index and the index within it.
    pub fn locate(&self, index: usize) -> Result<(usize, usize)> {
        let len = self.ends.last().copied().unwrap_or(0);
        check_index(index, len)?;

        let member = self.ends.partition_point(|&end| end <= index);
        let start = match member {
            0 => 0,
            _ => self.ends[member - 1],
        };
        Ok((member, index - start))
    }
}

impl<T> GenericDataset for ConcatDataset<T>
where
    T: 'static + Debug,
{
    fn name(&self) -> &str {
        &self.name
    }
}

impl<T> RandomAccessDataset for ConcatDataset<T>
where
    T: 'static + Debug,
{
    type Item = T;

    fn num_records(&self) -> usize {
        self.ends.last().copied().unwrap_or(0)
    }

    fn nth(&self, index: usize) -> Result<Self::Item> {
        let (member, local) = self.locate(index)?;
        self.datasets[member].nth(local)
    }
}
