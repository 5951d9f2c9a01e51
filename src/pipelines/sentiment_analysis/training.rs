use std::{fmt::Display, path::Path, sync::Arc};

use burn::{
    config::Config as _,
    data::{
        dataloader::DataLoaderBuilder,
        dataset::{transform::PartialDataset, Dataset},
    },
    module::{AutodiffModule, Module},
    optim::AdamConfig,
    record::{CompactRecorder, Recorder},
    tensor::{
        backend::{AutodiffBackend, Backend},
        ElementConversion,
    },
    train::{
        metric::{AccuracyMetric, LearningRateMetric, LossMetric},
        ClassificationOutput, LearnerBuilder, ValidStep,
    },
};
use derive_new::new;

use crate::utils::renderer::Simple;

use super::{batcher::Train, Batcher, Item, Model, ModelConfig};

/// Training Config
pub type Config = super::config::Training;

/// File name of the saved model configuration
pub static MODEL_CONFIG_FILE: &str = "config.json";

/// File name (without extension) of the saved model weights
pub static MODEL_FILE: &str = "model";

/// File name of the saved training configuration
pub static TRAINING_CONFIG_FILE: &str = "training.json";

/// The held-out validation slice and the remaining training slice of a dataset
pub type Split<D, I> = (PartialDataset<Arc<D>, I>, PartialDataset<Arc<D>, I>);

/// Split off the first `validation_size` items for validation, in original order
pub fn split_validation<D, I>(dataset: D, validation_size: usize) -> Split<D, I>
where
    D: Dataset<I>,
    I: Clone + Send + Sync,
{
    let len = dataset.len();
    let split_at = validation_size.min(len);
    let dataset = Arc::new(dataset);

    (
        PartialDataset::new(dataset.clone(), 0, split_at),
        PartialDataset::new(dataset, split_at, len),
    )
}

/// Loss and accuracy over a held-out dataset
#[derive(Debug, Clone, Copy, PartialEq, new)]
pub struct Evaluation {
    /// Mean binary cross entropy
    pub loss: f64,

    /// Fraction of correctly classified reviews
    pub accuracy: f64,

    /// Number of reviews evaluated
    pub items: usize,
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "loss: {:.4} - accuracy: {:.4} ({} reviews)",
            self.loss, self.accuracy, self.items
        )
    }
}

/// Run a model over a dataset without gradients and summarize loss and accuracy
pub fn evaluate<B, M, I, D>(
    model: &M,
    batcher: Batcher<B>,
    dataset: D,
    batch_size: usize,
) -> Evaluation
where
    B: Backend,
    M: ValidStep<Train<B>, ClassificationOutput<B>>,
    I: Item + 'static,
    D: Dataset<I> + 'static,
{
    let dataloader = DataLoaderBuilder::new(batcher)
        .batch_size(batch_size)
        .build(dataset);

    let mut loss_sum = 0.0;
    let mut correct = 0;
    let mut items = 0;

    for batch in dataloader.iter() {
        let output: ClassificationOutput<B> = ValidStep::step(model, batch);
        let [batch_size] = output.targets.dims();

        loss_sum += output.loss.into_scalar().elem::<f64>() * batch_size as f64;

        let predictions = output.output.argmax(1).squeeze::<1>(1);
        correct += predictions
            .equal(output.targets)
            .int()
            .sum()
            .into_scalar()
            .elem::<i64>() as usize;

        items += batch_size;
    }

    if items == 0 {
        return Evaluation::new(f64::NAN, f64::NAN, 0);
    }

    Evaluation::new(loss_sum / items as f64, correct as f64 / items as f64, items)
}

/// Define train function
pub fn train<B, M, I, D>(
    device: B::Device,       // Device on which to perform computation (e.g., CPU or CUDA device)
    dataset_train: D,        // Training dataset, the validation slice is split off its head
    dataset_test: D,         // Testing dataset, used for the final evaluation
    model_config: M::Config, // Model configuration
    config: Config,          // Experiment configuration
) -> anyhow::Result<M>
where
    B: AutodiffBackend,
    M: Model<B> + 'static,
    I: Item + 'static,
    D: Dataset<I> + 'static,
    M::InnerModule: ValidStep<
        Train<<B as AutodiffBackend>::InnerBackend>,
        ClassificationOutput<<B as AutodiffBackend>::InnerBackend>,
    >,
{
    let artifact_dir = config.artifact_dir.as_str();

    std::fs::create_dir_all(artifact_dir)
        .map_err(|e| anyhow!("Unable to create artifact directory {}: {}", artifact_dir, e))?;

    B::seed(config.seed);

    let model = M::init(&model_config, &device);

    log::info!("{}", model);

    let (dataset_valid, dataset_train) = split_validation(dataset_train, config.validation_size);

    log::info!(
        "Training on {} reviews, validating on {}",
        dataset_train.len(),
        dataset_valid.len()
    );

    // Initialize batchers for training and validation data
    let batcher_train = Batcher::<B>::new(model_config.get_config(), device.clone());
    let batcher_valid = Batcher::<B::InnerBackend>::new(model_config.get_config(), device.clone());

    let workers = match config.num_workers {
        Some(workers) => workers,
        None => std::thread::available_parallelism()?.into(),
    };

    // Initialize data loaders for training and validation data
    let dataloader_train = DataLoaderBuilder::new(batcher_train)
        .batch_size(config.batch_size)
        .shuffle(config.seed)
        .num_workers(workers)
        .build(dataset_train);

    let dataloader_valid = DataLoaderBuilder::new(batcher_valid.clone())
        .batch_size(config.batch_size)
        .num_workers(workers)
        .build(dataset_valid);

    // Initialize learner
    let builder = LearnerBuilder::new(artifact_dir)
        .metric_train_numeric(AccuracyMetric::new())
        .metric_valid_numeric(AccuracyMetric::new())
        .metric_train_numeric(LossMetric::new())
        .metric_valid_numeric(LossMetric::new())
        .metric_train_numeric(LearningRateMetric::new())
        .with_file_checkpointer(CompactRecorder::new())
        .devices(vec![device.clone()])
        .num_epochs(config.num_epochs)
        .summary();

    let builder = if config.use_tui {
        builder
    } else {
        builder.renderer(Simple::new())
    };

    let learner = builder.build(model, AdamConfig::new().init(), config.learning_rate);

    // Train the model
    let model_trained = learner.fit(dataloader_train, dataloader_valid);

    let evaluation = evaluate(
        &model_trained.valid(),
        batcher_valid,
        dataset_test,
        config.batch_size,
    );

    log::info!("Test evaluation: {}", evaluation);
    println!("{evaluation}");

    save::<B, M>(&model_trained, &model_config, &config)?;

    Ok(model_trained)
}

/// Save the configurations and the trained model to the artifact directory
pub fn save<B, M>(model: &M, model_config: &M::Config, config: &Config) -> anyhow::Result<()>
where
    B: AutodiffBackend,
    M: Model<B>,
{
    let artifact_dir = Path::new(&config.artifact_dir);

    config
        .save(artifact_dir.join(TRAINING_CONFIG_FILE))
        .map_err(|e| anyhow!("Unable to save training config: {}", e))?;

    model_config
        .save(artifact_dir.join(MODEL_CONFIG_FILE))
        .map_err(|e| anyhow!("Unable to save model config: {}", e))?;

    CompactRecorder::new()
        .record(model.clone().into_record(), artifact_dir.join(MODEL_FILE))
        .map_err(|e| anyhow!("Unable to save trained model weights: {}", e))?;

    log::info!("Saved model to {}", artifact_dir.display());

    Ok(())
}
