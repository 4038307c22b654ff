//! One encode-all / query-one / rank cycle

use std::io::Write;

use anyhow::Context;
use text_search_core::{Document, TextSearch};

use crate::args::Args;
use crate::output::{Output, Report};

/// Read the document, encode it, and answer the query if one was given
pub fn run<W: Write>(args: &Args, search: &TextSearch, out: W) -> anyhow::Result<Report> {
    let document = Document::from_path(&args.document)
        .with_context(|| format!("Failed to read {}", args.document.display()))?;
    tracing::debug!("Loaded {} sentences from {:?}", document.len(), args.document);

    let mut output = Output::new(out, args.json, args.document.clone());
    output.encoding_started(document.len())?;

    let encoded = search.index(document).context("Failed to encode document")?;
    output.encoding_finished(encoded.elapsed())?;

    let Some(query) = args.query.as_deref() else {
        tracing::info!("No query given, encoded only");
        return Ok(output.finish()?);
    };

    output.searching(query)?;
    let hits = search
        .search(&encoded, query, &args.search_config())
        .with_context(|| format!("Search for {:?} failed", query))?;
    output.hits(hits)?;

    Ok(output.finish()?)
}

/// Log a fatal error and write it, with its context chain, to `err`
///
/// The write does not go through the log filter, so the caller always sees
/// why the run failed.
pub fn report_error<W: Write>(error: &anyhow::Error, mut err: W) {
    tracing::error!("{:#}", error);
    let _ = writeln!(err, "Error: {:#}", error);
}
