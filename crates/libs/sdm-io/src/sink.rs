//! Output sinks for live process output.
//!
//! A sink accepts chunks of text as a process produces them. Sinks are
//! injected into the batch runner, which tees process output into its own
//! aggregation buffer and the caller's sink.

use tracing::info;

/// Accept a chunk of text written by a running process.
pub trait OutputSink: Send {
    /// Handle one chunk of combined stdout/stderr output.
    fn write(&mut self, chunk: &str);
}

/// Sink that accumulates every chunk into a string.
#[derive(Debug, Default)]
pub struct CapturingSink {
    log: String,
}

impl CapturingSink {
    /// The text captured so far.
    pub fn log(&self) -> &str {
        &self.log
    }

    /// Consume the sink and return the captured text.
    pub fn into_log(self) -> String {
        self.log
    }
}

impl OutputSink for CapturingSink {
    fn write(&mut self, chunk: &str) {
        self.log.push_str(chunk);
    }
}

/// Sink that forwards each output line to the tracing subscriber,
/// prefixed with a component name.
#[derive(Debug)]
pub struct TracingSink {
    name: String,
}

impl TracingSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl OutputSink for TracingSink {
    fn write(&mut self, chunk: &str) {
        for line in chunk.lines() {
            info!("{} - {}", self.name, line);
        }
    }
}

/// Sink that writes every chunk to each of a list of sinks, in order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn OutputSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Box<dyn OutputSink>>) -> Self {
        Self { sinks }
    }

    /// Add another sink to the fan-out.
    pub fn push(&mut self, sink: Box<dyn OutputSink>) {
        self.sinks.push(sink);
    }
}

impl OutputSink for FanoutSink {
    fn write(&mut self, chunk: &str) {
        for sink in self.sinks.iter_mut() {
            sink.write(chunk);
        }
    }
}

/// Sink that discards all output.
#[derive(Debug, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn write(&mut self, _chunk: &str) {}
}
