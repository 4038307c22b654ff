//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use text_search_core::{ModelConfig, ModelKind, SearchConfig};

#[derive(Parser, Debug, Clone)]
#[command(name = "text-search")]
#[command(about = "Semantic search over the lines of a text document")]
#[command(version)]
pub struct Args {
    /// Text document to search (UTF-8; every non-blank line is a sentence)
    pub document: PathBuf,

    /// Text to look for; without it the document is only encoded
    pub query: Option<String>,

    /// Number of matching lines to show
    #[arg(long, short = 'k', default_value_t = 3)]
    pub top_k: usize,

    /// Embedding model (all-MiniLM-L6-v2-q, all-MiniLM-L6-v2, all-MiniLM-L12-v2, bge-small-en-v1.5)
    #[arg(long, short, default_value_t = ModelKind::default())]
    pub model: ModelKind,

    /// Directory for downloaded model weights
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Lines sent to the model per inference call
    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Hide the model download progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose logging to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

impl Args {
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            model: self.model,
            cache_dir: self.cache_dir.clone(),
            show_download_progress: !self.no_progress && !self.json,
            batch_size: self.batch_size,
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig { top_k: self.top_k }
    }

    /// Default tracing filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "text_search=debug,text_search_core=debug"
        } else {
            "text_search=info,text_search_core=info"
        }
    }
}
