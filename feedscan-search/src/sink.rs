//! Result sinks: the consumers at the end of the fan-in.
//!
//! The aggregator hands results to a sink one at a time, in the order it
//! receives them. A slow sink slows the whole run down through the
//! bounded result channel.

use std::io::{self, Write};

use crate::types::SearchResult;

/// Consumes results delivered by a run.
pub trait ResultSink {
    /// Accept one result.
    ///
    /// # Errors
    ///
    /// An error stops the run; outstanding workers are cancelled.
    fn deliver(&mut self, result: SearchResult) -> io::Result<()>;
}

/// Writes each result as `"<field>:\n<content>\n\n"`.
#[derive(Debug)]
pub struct DisplaySink<W: Write> {
    writer: W,
}

impl<W: Write> DisplaySink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl DisplaySink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ResultSink for DisplaySink<W> {
    fn deliver(&mut self, result: SearchResult) -> io::Result<()> {
        write!(self.writer, "{result}\n\n")?;
        self.writer.flush()
    }
}

/// Keeps every delivered result in memory.
#[derive(Debug, Default)]
pub struct CollectSink {
    results: Vec<SearchResult>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
    }
}

impl ResultSink for CollectSink {
    fn deliver(&mut self, result: SearchResult) -> io::Result<()> {
        self.results.push(result);
        Ok(())
    }
}
