use anyhow::{Context, Result};
use face_data::{config::Config, dataset::RandomAccessDataset, pipeline};
use log::info;
use std::{env, path::PathBuf};
use structopt::StructOpt;

#[derive(Debug, Clone, StructOpt)]
/// Build the face data pipelines and run one pass over each loader.
struct Args {
    #[structopt(long, default_value = "face-data.json5")]
    /// configuration file
    pub config_file: PathBuf,
    #[structopt(long)]
    /// stop each pass after this many batches
    pub max_batches: Option<usize>,
}

fn main() -> Result<()> {
    let filters = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();

    let Args {
        config_file,
        max_batches,
    } = Args::from_args();
    let config = Config::open(&config_file)
        .with_context(|| format!("failed to load config file '{}'", config_file.display()))?;
    let max_batches = max_batches.unwrap_or(usize::MAX);

    let mut pipelines = pipeline::build(&config)?;
    info!(
        "{} background images available",
        pipelines.backgrounds.num_records()
    );

    for (step, batch) in pipelines.detection.epoch().take(max_batches).enumerate() {
        let batch = batch.with_context(|| format!("failed to load detection batch {}", step))?;
        let num_faces = batch
            .labels
            .outer_iter()
            .filter(|label| label[0] > 0.5)
            .count();
        info!(
            "detection batch {}: images {:?}, labels {:?}, {} with a face",
            step,
            batch.images.shape(),
            batch.labels.shape(),
            num_faces
        );
    }

    for (step, batch) in pipelines.recognition.epoch().take(max_batches).enumerate() {
        let batch = batch.with_context(|| format!("failed to load triplet batch {}", step))?;
        info!(
            "triplet batch {}: anchors {:?}, positives {:?}, negatives {:?}",
            step,
            batch.anchors.shape(),
            batch.positives.shape(),
            batch.negatives.shape()
        );
    }

    Ok(())
}
