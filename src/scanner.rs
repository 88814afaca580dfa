//! Bean and attribute selection
//!
//! The scanner translates one [`SearchRule`] into registry queries: first
//! the beans whose canonical name matches the rule's name pattern, then for
//! each bean the attribute values matching the rule's attribute pattern.
//! Pattern errors are rule-level failures; read errors are bean-level
//! failures. The caller decides how to isolate them.

use crate::beans::{AttributeReading, BeanName};
use crate::error::{PatternError, ReadError};
use crate::registry::{compile_full_match, MBeanRegistry};
use crate::rules::SearchRule;
use std::sync::Arc;

/// Selects beans and attribute readings for one rule at a time
///
/// Holds no state besides the registry handle; every call performs a fresh
/// query against live registry state. No caching, no retry.
pub struct Scanner {
    registry: Arc<dyn MBeanRegistry>,
}

impl Scanner {
    /// Create a scanner bound to a registry
    pub fn new(registry: Arc<dyn MBeanRegistry>) -> Self {
        Self { registry }
    }

    /// All beans matching the rule's name pattern
    ///
    /// Validates both of the rule's patterns first: a bad attribute pattern
    /// is a rule defect and must surface here, once per rule, before any
    /// bean of the rule is read. An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns `PatternError` if either pattern is not a valid regular
    /// expression.
    pub fn select_beans(&self, rule: &SearchRule) -> Result<Vec<BeanName>, PatternError> {
        compile_full_match(rule.attribute_pattern())?;
        self.registry.find_beans(rule.name_pattern())
    }

    /// Current readings of all attributes of `bean` matching `attribute_pattern`
    ///
    /// # Errors
    ///
    /// Returns `ReadError` when the registry cannot produce values for this
    /// bean; the failure is scoped to the bean, not the scan.
    pub fn select_attributes(
        &self,
        bean: &BeanName,
        attribute_pattern: &str,
    ) -> Result<Vec<AttributeReading>, ReadError> {
        self.registry.find_attributes(bean, attribute_pattern)
    }
}
