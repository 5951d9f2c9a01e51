//! Command line tool to train and persist a sentiment model

use anyhow::anyhow;
use burn_sentiment::{
    backend,
    datasets::imdb,
    models::pooled_embedding,
    pipelines::sentiment_analysis::{self, Training},
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: train [OPTIONS]

Options:
  -h, --help           Print help
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -a, --artifact-dir   Where the trained model is saved (defaults to 'artifacts')
  -n, --num-epochs     Number of epochs to train for (defaults to 40)
  -b, --batch-size     Batch size (defaults to 512)
  -g, --gpu            Index of the CUDA device to use (requires the 'tch' feature)
  --no-tui             Disable TUI
";

#[derive(Debug)]
struct Args {
    data_dir: Option<String>,
    artifact_dir: Option<String>,
    num_epochs: Option<usize>,
    batch_size: Option<usize>,
    gpu: Option<usize>,
    use_tui: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            data_dir: pargs.opt_value_from_str(["-d", "--data-dir"])?,
            artifact_dir: pargs.opt_value_from_str(["-a", "--artifact-dir"])?,
            num_epochs: pargs.opt_value_from_str(["-n", "--num-epochs"])?,
            batch_size: pargs.opt_value_from_str(["-b", "--batch-size"])?,
            gpu: pargs.opt_value_from_str(["-g", "--gpu"])?,
            use_tui: !(pargs.contains("--no-tui")),
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(anyhow!("Unexpected arguments: {:?}", remaining));
        }

        Ok(Some(args))
    }

    fn training_config(&self) -> Training {
        let mut config = Training::new().with_use_tui(self.use_tui);

        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.to_string();
        }

        if let Some(artifact_dir) = &self.artifact_dir {
            config.artifact_dir = artifact_dir.to_string();
        }

        if let Some(num_epochs) = self.num_epochs {
            config.num_epochs = num_epochs;
        }

        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }

        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let config = args.training_config();
    let device = backend::device(args.gpu);

    let model_config = pooled_embedding::Config::new();

    let (train, test) = imdb::load_data(&config.data_dir, model_config.vocab_size).await?;

    sentiment_analysis::train::<
        backend::Training,
        pooled_embedding::Model<backend::Training>,
        imdb::Item,
        imdb::Dataset,
    >(device, train, test, model_config, config)?;

    Ok(())
}
