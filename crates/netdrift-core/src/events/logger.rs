//! Event Logger
//!
//! Append-only JSONL event logging.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use netdrift_events::{EventType, NetworkEvent};

use crate::network::Network;

/// Writes network events to a JSONL file, one event per line.
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    event_count: u64,
    /// Event types to write; everything else is counted but skipped
    filter: Option<Vec<EventType>>,
}

impl EventLogger {
    /// Create a new event logger writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            event_count: 0,
            filter: None,
        })
    }

    /// Create a logger that discards events (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            event_count: 0,
            filter: None,
        }
    }

    /// Only write events of the given types.
    pub fn with_filter(mut self, types: Vec<EventType>) -> Self {
        self.filter = Some(types);
        self
    }

    /// Number of events handed to the logger, written or not
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Log an event to the file
    pub fn log(&mut self, event: &NetworkEvent) -> std::io::Result<()> {
        self.event_count += 1;
        let wanted = self
            .filter
            .as_ref()
            .map_or(true, |types| types.contains(&event.event_type()));
        if let (Some(writer), true) = (self.writer.as_mut(), wanted) {
            let json = event.to_jsonl()?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Log multiple events
    pub fn log_batch(&mut self, events: &[NetworkEvent]) -> std::io::Result<()> {
        for event in events {
            self.log(event)?;
        }
        Ok(())
    }

    /// Drains the network's journal into the log. Returns how many events
    /// were drained.
    pub fn drain_from(&mut self, network: &mut Network) -> std::io::Result<usize> {
        let events = network.drain_events();
        self.log_batch(&events)?;
        Ok(events.len())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "Failed to flush event logger");
        }
    }
}
