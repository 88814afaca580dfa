//! Reading sinks
//!
//! Every successfully read attribute value is handed to a [`ReadingSink`]
//! synchronously, in scan order. The production sink writes one log line per
//! reading; [`CollectingSink`] accumulates readings for tests.

use crate::beans::AttributeReading;
use log::info;
use std::sync::Mutex;

/// Destination for extracted attribute readings
pub trait ReadingSink: Send + Sync {
    /// Consume one reading
    fn emit(&self, reading: &AttributeReading);
}

/// Sink that writes one informational log line per reading
///
/// Lines have the literal form `<attributeName>: <attributeValue>` and are
/// written to the `jmx2log` log target, matching the probe's purpose of
/// feeding plain log files rather than a metrics pipeline.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    /// Create a new log sink
    pub fn new() -> Self {
        Self
    }
}

impl ReadingSink for LogSink {
    fn emit(&self, reading: &AttributeReading) {
        info!(target: "jmx2log", "{}: {}", reading.name, reading.value);
    }
}

/// Sink that accumulates readings in memory
///
/// Useful for unit tests that assert on the exact readings a scan produced
/// and on their order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    readings: Mutex<Vec<AttributeReading>>,
}

impl CollectingSink {
    /// Create an empty collecting sink
    pub fn new() -> Self {
        Self {
            readings: Mutex::new(Vec::new()),
        }
    }

    /// All readings emitted so far, in emission order
    pub fn readings(&self) -> Vec<AttributeReading> {
        self.readings.lock().unwrap().clone()
    }

    /// Number of readings emitted so far
    pub fn emitted_count(&self) -> usize {
        self.readings.lock().unwrap().len()
    }

    /// Discard all collected readings
    pub fn reset(&self) {
        self.readings.lock().unwrap().clear();
    }
}

impl ReadingSink for CollectingSink {
    fn emit(&self, reading: &AttributeReading) {
        self.readings.lock().unwrap().push(reading.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beans::{AttributeValue, BeanName};

    #[test]
    fn test_collecting_sink_keeps_emission_order() {
        let sink = CollectingSink::new();
        let bean = BeanName::new("app:type=queue");
        sink.emit(&AttributeReading::new(
            bean.clone(),
            "QueueNumEntries",
            AttributeValue::Integer(1),
        ));
        sink.emit(&AttributeReading::new(
            bean,
            "Paused",
            AttributeValue::Boolean(false),
        ));

        let readings = sink.readings();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].name, "QueueNumEntries");
        assert_eq!(readings[1].name, "Paused");
    }

    #[test]
    fn test_collecting_sink_reset() {
        let sink = CollectingSink::new();
        sink.emit(&AttributeReading::new(
            BeanName::new("app:type=queue"),
            "QueueNumEntries",
            AttributeValue::Integer(1),
        ));
        assert_eq!(sink.emitted_count(), 1);

        sink.reset();
        assert_eq!(sink.emitted_count(), 0);
    }
}
