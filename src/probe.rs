//! Scan coordination
//!
//! [`JmxLogProbe`] executes exactly one full scan per invocation: every
//! configured rule in order, every matched bean in registry order, every
//! matched attribute in registry order, each reading forwarded synchronously
//! to the sink. Failures never abort a scan; a pattern error skips its rule
//! and a read error skips its bean, and both are recorded in the tick's
//! [`ScanReport`].

use crate::beans::Timestamp;
use crate::error::ScanError;
use crate::registry::MBeanRegistry;
use crate::rules::SearchRule;
use crate::scanner::Scanner;
use crate::sink::ReadingSink;
use chrono::Utc;
use log::{debug, error};
use std::sync::{Arc, RwLock};

/// Outcome of one scan
///
/// The continue-on-error policy is visible here: every rule skipped for a
/// bad pattern and every bean skipped for a read failure appears as one
/// entry in `errors`, alongside the count of readings that were emitted.
#[derive(Debug)]
pub struct ScanReport {
    /// When the scan started
    pub started_at: Timestamp,
    /// When the scan finished
    pub finished_at: Timestamp,
    /// Number of rules the scan iterated
    pub rules_scanned: usize,
    /// Number of readings forwarded to the sink
    pub readings_emitted: usize,
    /// Rules and beans that were skipped, in the order they were encountered
    pub errors: Vec<ScanError>,
}

impl ScanReport {
    /// Whether the scan completed without skipping any rule or bean
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Coordinates the periodic scan over rules, beans, and attributes
///
/// Constructed once with a resolved rule list, a registry handle, and a
/// sink; [`run_once`](JmxLogProbe::run_once) is then invoked by an external
/// scheduler. The rule list can be swapped between ticks with
/// [`reconfigure`](JmxLogProbe::reconfigure); a running scan always works on
/// the snapshot it took at tick start.
pub struct JmxLogProbe {
    rules: RwLock<Arc<Vec<SearchRule>>>,
    scanner: Scanner,
    sink: Arc<dyn ReadingSink>,
}

impl JmxLogProbe {
    /// Create a probe
    ///
    /// # Arguments
    ///
    /// * `rules` - Parsed search rules, processed in list order on every tick
    /// * `registry` - Bean registry to query
    /// * `sink` - Destination for extracted readings
    pub fn new(
        rules: Vec<SearchRule>,
        registry: Arc<dyn MBeanRegistry>,
        sink: Arc<dyn ReadingSink>,
    ) -> Self {
        Self {
            rules: RwLock::new(Arc::new(rules)),
            scanner: Scanner::new(registry),
            sink,
        }
    }

    /// Number of currently configured rules
    pub fn rule_count(&self) -> usize {
        self.rules.read().unwrap().len()
    }

    /// Replace the rule list, effective from the next tick
    ///
    /// The list is swapped atomically; a scan already in progress keeps the
    /// snapshot it started with.
    pub fn reconfigure(&self, rules: Vec<SearchRule>) {
        let mut guard = self.rules.write().unwrap();
        *guard = Arc::new(rules);
    }

    /// Execute one full scan
    ///
    /// Iterates all rules in configuration order and forwards every
    /// successfully read attribute value to the sink. Always runs to
    /// completion; per-rule and per-bean failures are written to the error
    /// log and recorded in the returned report.
    pub fn run_once(&self) -> ScanReport {
        let started_at = Utc::now();
        let rules = Arc::clone(&*self.rules.read().unwrap());

        let mut readings_emitted = 0;
        let mut errors = Vec::new();
        for rule in rules.iter() {
            self.scan_rule(rule, &mut readings_emitted, &mut errors);
        }

        let report = ScanReport {
            started_at,
            finished_at: Utc::now(),
            rules_scanned: rules.len(),
            readings_emitted,
            errors,
        };
        debug!(
            "Scan finished: {} rules, {} readings, {} errors",
            report.rules_scanned,
            report.readings_emitted,
            report.errors.len()
        );
        report
    }

    /// Scan one rule, isolating read failures to the bean they occurred on
    fn scan_rule(&self, rule: &SearchRule, readings_emitted: &mut usize, errors: &mut Vec<ScanError>) {
        let beans = match self.scanner.select_beans(rule) {
            Ok(beans) => beans,
            Err(e) => {
                let skipped = ScanError::Rule(rule.to_string(), e);
                error!(target: "jmx2log", "{}", skipped);
                errors.push(skipped);
                return;
            }
        };

        for bean in beans {
            match self.scanner.select_attributes(&bean, rule.attribute_pattern()) {
                Ok(readings) => {
                    for reading in readings {
                        self.sink.emit(&reading);
                        *readings_emitted += 1;
                    }
                }
                Err(e) => {
                    let skipped = ScanError::Bean(bean.to_string(), e);
                    error!(target: "jmx2log", "{}", skipped);
                    errors.push(skipped);
                }
            }
        }
    }
}
