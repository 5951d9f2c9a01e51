//! Command line tool to classify movie reviews, training a model first if none is saved

use std::sync::Arc;

use anyhow::anyhow;
use burn_sentiment::{
    backend,
    datasets::imdb,
    models::pooled_embedding,
    pipelines::sentiment_analysis::{self, Classifier, Codec, Training, Vocabulary},
    utils::files::read_file,
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: classify [OPTIONS]

Options:
  -h, --help           Print help
  -i, --input          File with one review per line (defaults to 'test.txt')
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -a, --artifact-dir   Where the trained model is saved (defaults to 'artifacts')
  -g, --gpu            Index of the CUDA device to use (requires the 'tch' feature)
  --no-tui             Disable TUI when a model has to be trained
";

type B = backend::Training;
type M = pooled_embedding::Model<B>;

#[derive(Debug)]
struct Args {
    input: String,
    data_dir: Option<String>,
    artifact_dir: Option<String>,
    gpu: Option<usize>,
    use_tui: bool,
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let args = Args {
        input: pargs
            .opt_value_from_str(["-i", "--input"])?
            .unwrap_or_else(|| "test.txt".to_string()),
        data_dir: pargs.opt_value_from_str(["-d", "--data-dir"])?,
        artifact_dir: pargs.opt_value_from_str(["-a", "--artifact-dir"])?,
        gpu: pargs.opt_value_from_str(["-g", "--gpu"])?,
        use_tui: !(pargs.contains("--no-tui")),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        return Err(anyhow!("Unexpected arguments: {:?}", remaining));
    }

    Ok(Some(args))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = parse_args()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let mut config = Training::new().with_use_tui(args.use_tui);

    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    if let Some(artifact_dir) = args.artifact_dir {
        config.artifact_dir = artifact_dir;
    }

    let device = backend::device(args.gpu);

    let word_index = imdb::word_index(&config.data_dir).await?;
    let codec = Codec::new(Arc::new(Vocabulary::from_word_index(word_index)));

    let artifact_dir = config.artifact_dir.clone();
    let train_device = device.clone();

    // Fall back to training when no usable model is saved
    let fallback = move || async move {
        let model_config = pooled_embedding::Config::new();
        let (train, test) = imdb::load_data(&config.data_dir, model_config.vocab_size).await?;

        let model = sentiment_analysis::train::<B, M, imdb::Item, imdb::Dataset>(
            train_device,
            train,
            test,
            model_config.clone(),
            config,
        )?;

        Ok::<_, anyhow::Error>((model, model_config))
    };

    let (model, model_config) =
        sentiment_analysis::acquire::<B, M, _, _>(&artifact_dir, &device, fallback)
            .await?
            .into_parts();

    let classifier = Classifier::new(model, &model_config, codec, device);

    let lines = read_file(&args.input)
        .await
        .map_err(|e| anyhow!("Unable to read reviews from {}: {}", args.input, e))?;

    for line in lines {
        let review = classifier.classify(&line);

        log::debug!("Decoded: {}", classifier.codec().decode(&review.encoded));

        println!("{review}");
    }

    Ok(())
}
