use crate::common::*;

/// The generic dataset trait.
pub trait GenericDataset
where
    Self: Debug + Send + Sync,
{
    /// A short name used in log messages.
    fn name(&self) -> &str;
}

/// The dataset that can be random accessed.
pub trait RandomAccessDataset
where
    Self: GenericDataset,
{
    type Item;

    /// Get number of records in the dataset.
    fn num_records(&self) -> usize;

    /// Get the nth record in the dataset.
    ///
    /// It fails with [DataError::IndexOutOfRange](crate::error::DataError)
    /// if `index >= num_records()`.
    fn nth(&self, index: usize) -> Result<Self::Item>;

    fn is_empty(&self) -> bool {
        self.num_records() == 0
    }
}

impl<D> GenericDataset for Box<D>
where
    D: GenericDataset + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<D> RandomAccessDataset for Box<D>
where
    D: RandomAccessDataset + ?Sized,
{
    type Item = D::Item;

    fn num_records(&self) -> usize {
        (**self).num_records()
    }

    fn nth(&self, index: usize) -> Result<Self::Item> {
        (**self).nth(index)
    }
}
