//! Tick scheduling
//!
//! A [`Scheduler`] invokes the probe's `run_once` on a fixed interval from a
//! single worker thread. One worker means at most one scan is ever in
//! flight, so overlapping invocations are impossible by construction rather
//! than prevented by locking inside the probe.

use crate::probe::JmxLogProbe;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Fixed-interval scheduler driving a probe
///
/// The first scan runs immediately on start; subsequent scans run one
/// interval after the previous scan finished.
pub struct Scheduler {
    /// Pause between the end of one scan and the start of the next
    interval: Duration,
    /// Probe invoked on every tick
    probe: Arc<JmxLogProbe>,
    /// Handle to the worker thread
    thread_handle: Option<JoinHandle<()>>,
    /// Shared state for controlling the worker
    running: Arc<Mutex<bool>>,
}

impl Scheduler {
    /// Create a scheduler
    ///
    /// # Arguments
    ///
    /// * `interval` - Pause between scans (legacy default is one minute)
    /// * `probe` - Probe to invoke on every tick
    pub fn new(interval: Duration, probe: Arc<JmxLogProbe>) -> Self {
        Self {
            interval,
            probe,
            thread_handle: None,
            running: Arc::new(Mutex::new(false)),
        }
    }

    /// Start the worker thread
    ///
    /// The first scan runs before the first sleep. Calling `start` on a
    /// running scheduler is a no-op.
    pub fn start(&mut self) {
        {
            let mut running = self.running.lock().unwrap();
            if *running {
                info!("Scheduler already running, skipping start");
                return;
            }
            *running = true;
        }

        let interval = self.interval;
        let probe = Arc::clone(&self.probe);
        let running = Arc::clone(&self.running);

        debug!("Spawning scheduler thread");
        let handle = thread::spawn(move || {
            Self::scheduler_thread(interval, probe, running);
        });

        self.thread_handle = Some(handle);
        info!("Scheduler started with interval {:?}", self.interval);
    }

    /// Stop the worker thread and wait for it to finish
    ///
    /// A scan already in progress runs to completion. Calling `stop` on a
    /// stopped scheduler is a no-op.
    pub fn stop(&mut self) {
        {
            let mut running = self.running.lock().unwrap();
            if !*running {
                debug!("Scheduler already stopped");
                return;
            }
            *running = false;
        }

        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                warn!("Scheduler thread panicked before join");
            }
        }
        info!("Scheduler stopped");
    }

    /// Worker loop: scan, then sleep one interval in short slices
    fn scheduler_thread(interval: Duration, probe: Arc<JmxLogProbe>, running: Arc<Mutex<bool>>) {
        info!("Scheduler thread started");

        while *running.lock().unwrap() {
            let report = probe.run_once();
            if !report.is_clean() {
                warn!(
                    "Scan completed with {} errors ({} readings emitted)",
                    report.errors.len(),
                    report.readings_emitted
                );
            }

            // Sleep in short slices so stop() stays responsive
            let mut remaining = interval;
            while remaining > Duration::ZERO && *running.lock().unwrap() {
                let nap = remaining.min(Duration::from_millis(200));
                thread::sleep(nap);
                remaining = remaining.saturating_sub(nap);
            }
        }

        info!("Scheduler thread stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beans::BeanName;
    use crate::registry::{LocalRegistry, RegisteredBean};
    use crate::rules::SearchRule;
    use crate::sink::CollectingSink;
    use std::time::Instant;

    fn probe_with_sink() -> (Arc<JmxLogProbe>, Arc<CollectingSink>) {
        let registry = LocalRegistry::new();
        registry.register(
            RegisteredBean::new(BeanName::new("app:type=queue")).with_value("QueueNumEntries", 1),
        );
        let sink = Arc::new(CollectingSink::new());
        let probe = Arc::new(JmxLogProbe::new(
            vec![SearchRule::new("app:.*", "QueueNumEntries")],
            Arc::new(registry),
            sink.clone(),
        ));
        (probe, sink)
    }

    fn wait_for_emissions(sink: &CollectingSink, at_least: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while sink.emitted_count() < at_least {
            assert!(Instant::now() < deadline, "timed out waiting for scans");
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_first_scan_runs_before_the_first_sleep() {
        let (probe, sink) = probe_with_sink();
        let mut scheduler = Scheduler::new(Duration::from_secs(3600), probe);

        scheduler.start();
        wait_for_emissions(&sink, 1);
        scheduler.stop();

        assert_eq!(sink.emitted_count(), 1);
    }

    #[test]
    fn test_scans_repeat_on_the_interval() {
        let (probe, sink) = probe_with_sink();
        let mut scheduler = Scheduler::new(Duration::from_millis(10), probe);

        scheduler.start();
        wait_for_emissions(&sink, 3);
        scheduler.stop();
    }

    #[test]
    fn test_no_scans_after_stop() {
        let (probe, sink) = probe_with_sink();
        let mut scheduler = Scheduler::new(Duration::from_millis(10), probe);

        scheduler.start();
        wait_for_emissions(&sink, 1);
        scheduler.stop();

        let count_at_stop = sink.emitted_count();
        thread::sleep(Duration::from_millis(100));
        assert_eq!(sink.emitted_count(), count_at_stop);
    }

    #[test]
    fn test_start_and_stop_are_idempotent() {
        let (probe, sink) = probe_with_sink();
        let mut scheduler = Scheduler::new(Duration::from_secs(3600), probe);

        scheduler.start();
        scheduler.start();
        wait_for_emissions(&sink, 1);
        scheduler.stop();
        scheduler.stop();

        assert_eq!(sink.emitted_count(), 1);
    }
}
