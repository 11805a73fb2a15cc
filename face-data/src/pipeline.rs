//! Assembly of the training data pipelines from a [Config].

use crate::{
    common::*,
    config::Config,
    dataset::{
        BackgroundScenes, CelebaTriplets, ConcatDataset, CsvFaces, DetectionExample,
        HandLabeledFaces, RandomAccessDataset, RoomScenes, BACKGROUND_CATEGORIES,
    },
    loader::BatchLoader,
    processor::{AugmentationInit, BoxAwareTransform, DetectionProcessor, ImageLoader, Resize},
};
use std::sync::Arc;

const HAND_LABELED_DIR: &str = "data/human-faces-object-detection";
const CSV_FACES_DIR: &str = "data/face-detection-dataset";
const ROOMS_DIR: &str = "data/house-rooms-image-dataset/House_Room_Dataset";
const TRIPLETS_DIR: &str = "data/celeba-face-recognition-triplets";

/// The data sources consumed by the training loops.
#[derive(Debug)]
pub struct Pipelines {
    /// Face detection batches over hand-labeled faces, CSV-labeled faces and
    /// face-free room scenes.
    pub detection: BatchLoader<ConcatDataset<DetectionExample>>,
    /// Face recognition batches over celebrity triplets.
    pub recognition: BatchLoader<CelebaTriplets>,
    /// A capped random sample of room scenes. It is not part of any loader.
    pub backgrounds: BackgroundScenes,
}

/// Build every dataset and loader. Paths resolve under `config.root_prefix()`.
pub fn build(config: &Config) -> Result<Pipelines> {
    let Config {
        batch_size,
        img_size,
        img_size_recog,
        ref dataset,
        ref loader,
        ref preprocessor,
    } = *config;
    let root = config.root_prefix();
    let batch_size = batch_size.get();

    let detection_resize = Resize::square(img_size.get())?;
    let recognition_loader = ImageLoader::new(Resize::square(img_size_recog.get())?);
    let scene_loader = ImageLoader::new(detection_resize.clone());

    let use_augmentation =
        preprocessor.augment_hand_labeled_faces || preprocessor.augment_csv_faces;
    let augmentation: Option<Arc<dyn BoxAwareTransform>> = if use_augmentation {
        let augmentation = AugmentationInit::from(preprocessor).build()?;
        Some(Arc::new(augmentation) as Arc<dyn BoxAwareTransform>)
    } else {
        None
    };
    let processor = |enabled: bool| {
        let processor = DetectionProcessor::new(detection_resize.clone());
        match (&augmentation, enabled) {
            (Some(augmentation), true) => processor.with_augmentation(augmentation.clone()),
            _ => processor,
        }
    };

    // detection
    let hand_labeled = {
        let dir = root.join(HAND_LABELED_DIR);
        HandLabeledFaces::load(
            dir.join("images"),
            dir.join("faces.csv"),
            dataset.intermediate_size.get(),
            processor(preprocessor.augment_hand_labeled_faces),
        )?
    };
    let csv_faces = {
        let dir = root.join(CSV_FACES_DIR);
        CsvFaces::load(
            dir.join("images"),
            dir.join("labels_and_coordinates.csv"),
            processor(preprocessor.augment_csv_faces)
                .debug_augmentation(preprocessor.augment_csv_faces),
        )?
    };
    if preprocessor.augment_csv_faces {
        warn!("augmentation on CSV-labeled faces is enabled but not validated");
    }

    let mut members: Vec<Box<dyn RandomAccessDataset<Item = DetectionExample>>> = vec![];
    members.push(Box::new(hand_labeled));
    members.push(Box::new(csv_faces));
    for category in BACKGROUND_CATEGORIES {
        let rooms = RoomScenes::load(root.join(ROOMS_DIR).join(category), scene_loader.clone())?;
        members.push(Box::new(rooms));
    }
    let detection = ConcatDataset::new("face-detection", members)?;

    // recognition
    let triplets = {
        let dir = root.join(TRIPLETS_DIR);
        CelebaTriplets::load(
            dir.join("images"),
            dir.join("triplets.csv"),
            recognition_loader,
        )?
    };

    // backgrounds
    let backgrounds = BackgroundScenes::load(
        root.join(ROOMS_DIR),
        dataset.background_limit,
        loader.seed,
        scene_loader,
    )?;

    Ok(Pipelines {
        detection: BatchLoader::new(detection, batch_size, loader)?,
        recognition: BatchLoader::new(triplets, batch_size, loader)?,
        backgrounds,
    })
}
