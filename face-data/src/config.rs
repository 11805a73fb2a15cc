//! Pipeline configuration format.

use crate::common::*;

pub use dataset::*;
pub use loader::*;
pub use preprocessor::*;

/// The main pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The number of examples per batch.
    pub batch_size: NonZeroUsize,
    /// The side length of detection images in pixels.
    pub img_size: NonZeroUsize,
    /// The side length of recognition images in pixels.
    pub img_size_recog: NonZeroUsize,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub preprocessor: PreprocessorConfig,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = json5::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.dataset.validate()?;
        self.preprocessor.validate()
    }

    /// The directory that the `data/` tree is resolved against.
    pub fn root_prefix(&self) -> &Path {
        let DatasetConfig {
            ref data_root,
            ref alternate_root,
            use_alternate_root,
            ..
        } = self.dataset;

        match (use_alternate_root, alternate_root) {
            (true, Some(alternate_root)) => alternate_root,
            _ => data_root,
        }
    }
}

mod dataset {
    use super::*;

    /// Dataset location and construction options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(default)]
    pub struct DatasetConfig {
        /// The directory containing `data/`.
        pub data_root: PathBuf,
        /// The directory used instead of `data_root` when `use_alternate_root` is set.
        pub alternate_root: Option<PathBuf>,
        pub use_alternate_root: bool,
        /// The maximum number of background scene images.
        pub background_limit: usize,
        /// The side length that hand-labeled faces are resized to before augmentation.
        pub intermediate_size: NonZeroUsize,
    }

    impl DatasetConfig {
        pub fn validate(&self) -> Result<()> {
            ensure!(
                !self.use_alternate_root || self.alternate_root.is_some(),
                "use_alternate_root is set but alternate_root is missing"
            );
            Ok(())
        }
    }

    impl Default for DatasetConfig {
        fn default() -> Self {
            Self {
                data_root: PathBuf::new(),
                alternate_root: None,
                use_alternate_root: false,
                background_limit: 2500,
                intermediate_size: NonZeroUsize::new(250).unwrap(),
            }
        }
    }
}

mod loader {
    use super::*;

    /// Batching options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(default)]
    pub struct LoaderConfig {
        /// Visit examples in a fresh random order per pass.
        pub shuffle: bool,
        /// Discard the trailing batch if it is smaller than the batch size.
        pub drop_last: bool,
        /// If set, shuffling and background sampling become reproducible.
        pub seed: Option<u64>,
    }

    impl Default for LoaderConfig {
        fn default() -> Self {
            Self {
                shuffle: true,
                drop_last: false,
                seed: None,
            }
        }
    }
}

mod preprocessor {
    use super::*;

    /// Data augmentation options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(default)]
    pub struct PreprocessorConfig {
        /// Apply box-aware augmentation to the hand-labeled face dataset.
        pub augment_hand_labeled_faces: bool,
        /// Apply box-aware augmentation to the CSV-labeled face dataset.
        ///
        /// This path has not been validated against training results.
        pub augment_csv_faces: bool,
        /// The probability to apply random rotation.
        pub rotate_prob: R64,
        /// The maximum degrees of random rotation.
        pub rotate_degrees: R64,
        /// The probability to apply brightness and contrast jitter.
        pub brightness_contrast_prob: R64,
        /// The maximum brightness offset.
        pub brightness_limit: R64,
        /// The maximum relative contrast change.
        pub contrast_limit: R64,
        /// The probability to apply horizontal, vertical or both flips.
        pub flip_prob: R64,
        /// The probability to apply Gaussian blur.
        pub blur_prob: R64,
        /// The inclusive range of odd blur kernel sizes.
        pub blur_kernel_range: (usize, usize),
        /// Boxes keeping a smaller visible fraction than this are dropped.
        pub min_visibility: R64,
    }

    impl PreprocessorConfig {
        pub fn validate(&self) -> Result<()> {
            let probs = [
                ("rotate_prob", self.rotate_prob),
                ("brightness_contrast_prob", self.brightness_contrast_prob),
                ("flip_prob", self.flip_prob),
                ("blur_prob", self.blur_prob),
                ("min_visibility", self.min_visibility),
            ];
            for (name, value) in probs {
                ensure!(
                    (0.0..=1.0).contains(&value.raw()),
                    "{} must be in range [0, 1], but get {}",
                    name,
                    value
                );
            }
            ensure!(
                self.rotate_degrees >= 0.0,
                "rotate_degrees must be non-negative"
            );
            ensure!(
                self.brightness_limit >= 0.0 && self.contrast_limit >= 0.0,
                "brightness_limit and contrast_limit must be non-negative"
            );

            let (min_kernel, max_kernel) = self.blur_kernel_range;
            ensure!(
                min_kernel >= 3 && min_kernel <= max_kernel,
                "blur_kernel_range must satisfy 3 <= min <= max, but get {:?}",
                self.blur_kernel_range
            );
            Ok(())
        }
    }

    impl Default for PreprocessorConfig {
        fn default() -> Self {
            Self {
                augment_hand_labeled_faces: false,
                augment_csv_faces: false,
                rotate_prob: r64(0.5),
                rotate_degrees: r64(30.0),
                brightness_contrast_prob: r64(0.5),
                brightness_limit: r64(0.5),
                contrast_limit: r64(0.5),
                flip_prob: r64(0.5),
                blur_prob: r64(0.5),
                blur_kernel_range: (3, 7),
                min_visibility: r64(0.1),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let config = Config::parse("{ batch_size: 4, img_size: 64, img_size_recog: 32 }").unwrap();
        assert_eq!(config.batch_size.get(), 4);
        assert_eq!(config.dataset.background_limit, 2500);
        assert_eq!(config.dataset.intermediate_size.get(), 250);
        assert!(config.loader.shuffle);
        assert_eq!(config.root_prefix(), Path::new(""));
    }

    #[test]
    fn alternate_root_prefix() {
        let config = Config::parse(
            r#"{
                batch_size: 4,
                img_size: 64,
                img_size_recog: 32,
                dataset: { data_root: "local", alternate_root: "/mnt/remote", use_alternate_root: true },
            }"#,
        )
        .unwrap();
        assert_eq!(config.root_prefix(), Path::new("/mnt/remote"));
    }

    #[test]
    fn reject_alternate_root_without_path() {
        let result = Config::parse(
            r#"{
                batch_size: 4,
                img_size: 64,
                img_size_recog: 32,
                dataset: { data_root: "local", use_alternate_root: true },
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn reject_bad_preprocessor() {
        let result = Config::parse(
            "{ batch_size: 4, img_size: 64, img_size_recog: 32, preprocessor: { flip_prob: 1.5 } }",
        );
        assert!(result.is_err());

        let result = Config::parse("{ batch_size: 0, img_size: 64, img_size_recog: 32 }");
        assert!(result.is_err());
    }
}
