//! Result rendering
//!
//! Text mode streams progress lines as the run advances; JSON mode collects
//! everything and writes a single object at the end.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use text_search_core::SearchHit;

/// JSON report for one run
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub document: PathBuf,
    pub sentences: usize,
    pub encoding_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub hits: Vec<SearchHit>,
}

/// Writes run progress and results to `out`
pub struct Output<W: Write> {
    out: W,
    json: bool,
    report: Report,
}

impl<W: Write> Output<W> {
    pub fn new(out: W, json: bool, document: PathBuf) -> Self {
        Self {
            out,
            json,
            report: Report {
                document,
                ..Report::default()
            },
        }
    }

    pub fn encoding_started(&mut self, sentences: usize) -> std::io::Result<()> {
        self.report.sentences = sentences;
        if !self.json {
            writeln!(self.out, "Encoding ({} sentences). Please wait...", sentences)?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn encoding_finished(&mut self, elapsed: Duration) -> std::io::Result<()> {
        self.report.encoding_ms = elapsed.as_millis() as u64;
        if !self.json {
            writeln!(self.out, "Finished encoding in {} ms", elapsed.as_millis())?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    pub fn searching(&mut self, query: &str) -> std::io::Result<()> {
        self.report.query = Some(query.to_string());
        if !self.json {
            writeln!(self.out, "Searching for {}", query)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    pub fn hits(&mut self, hits: Vec<SearchHit>) -> std::io::Result<()> {
        if !self.json {
            for hit in &hits {
                writeln!(
                    self.out,
                    "Line #{} ({}%): {}",
                    hit.line_number, hit.percent, hit.text
                )?;
            }
        }
        self.report.hits = hits;
        Ok(())
    }

    /// Flush; in JSON mode this is where the report is written
    pub fn finish(mut self) -> std::io::Result<Report> {
        if self.json {
            serde_json::to_writer_pretty(&mut self.out, &self.report)?;
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(self.report)
    }
}
