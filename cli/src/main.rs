//! text-search entry point
//!
//! `text-search <document> [query]` prints the lines of `document` most
//! similar to `query`. Logs go to stderr, results to stdout.

use clap::Parser;
use text_search::Args;
use text_search_core::{Encoder, TextSearch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let model_config = args.model_config();
    tracing::debug!(
        "Model: {}, batch size {}",
        model_config.model,
        model_config.batch_size
    );

    let search = TextSearch::new(Encoder::new(model_config));
    let stdout = std::io::stdout();

    if let Err(e) = text_search::run(&args, &search, stdout.lock()) {
        text_search::report_error(&e, std::io::stderr());
        std::process::exit(1);
    }
}
