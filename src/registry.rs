//! Bean registry contract and in-process implementation
//!
//! The probe consumes the registry through the [`MBeanRegistry`] trait: query
//! beans by a name pattern, then read matching attribute values per bean.
//! [`LocalRegistry`] is the in-process implementation; an embedding
//! application registers beans whose attribute values are produced by
//! supplier closures, so every read observes the live value.

use crate::beans::{AttributeReading, AttributeValue, BeanName};
use crate::error::{PatternError, ReadError};
use regex::Regex;
use std::sync::RwLock;

/// Contract of the bean registry consumed by the probe
///
/// Both queries take raw pattern strings and match them as full-string
/// regular expressions against canonical bean names and attribute names
/// respectively. `find_beans` fails only for invalid pattern syntax;
/// `find_attributes` fails when values for the given bean cannot be read.
#[cfg_attr(test, mockall::automock)]
pub trait MBeanRegistry: Send + Sync {
    /// All registered beans whose canonical name matches `name_pattern`
    fn find_beans(&self, name_pattern: &str) -> Result<Vec<BeanName>, PatternError>;

    /// Current values of all attributes of `bean` whose name matches `attribute_pattern`
    fn find_attributes(
        &self,
        bean: &BeanName,
        attribute_pattern: &str,
    ) -> Result<Vec<AttributeReading>, ReadError>;
}

/// Compile a configured pattern as a full-string matcher
///
/// The pattern must match the entire input, not a substring; `foo.*bar`
/// matches `foobazbar` but not `xfoobazbarx`. The historically-compatible
/// default configuration carries its own `.*` wraps for that reason.
pub fn compile_full_match(pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(&format!("^(?:{})$", pattern))
        .map_err(|e| PatternError::InvalidSyntax(pattern.to_string(), e))
}

/// Produces the current value of one registered attribute
type AttributeSupplier = Box<dyn Fn() -> Result<AttributeValue, String> + Send + Sync>;

struct RegisteredAttribute {
    name: String,
    supplier: AttributeSupplier,
}

/// A bean registered with the [`LocalRegistry`]
///
/// Built with chained `with_value`/`with_supplier` calls; attribute order is
/// the order of those calls.
pub struct RegisteredBean {
    name: BeanName,
    attributes: Vec<RegisteredAttribute>,
}

impl RegisteredBean {
    /// Create a bean with the given canonical name and no attributes
    pub fn new(name: BeanName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
        }
    }

    /// Add an attribute with a constant value
    pub fn with_value(self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        let value = value.into();
        self.with_supplier(name, move || Ok(value.clone()))
    }

    /// Add an attribute whose value is produced on every read
    ///
    /// A supplier error fails the read of the whole bean for that tick.
    pub fn with_supplier(
        mut self,
        name: impl Into<String>,
        supplier: impl Fn() -> Result<AttributeValue, String> + Send + Sync + 'static,
    ) -> Self {
        self.attributes.push(RegisteredAttribute {
            name: name.into(),
            supplier: Box::new(supplier),
        });
        self
    }
}

/// In-process bean registry
///
/// Beans are matched in registration order, which keeps scan output
/// deterministic for a fixed registry. Registration and deregistration are
/// allowed while a scheduler is running; each query takes a fresh snapshot
/// under the lock.
#[derive(Default)]
pub struct LocalRegistry {
    beans: RwLock<Vec<RegisteredBean>>,
}

impl LocalRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            beans: RwLock::new(Vec::new()),
        }
    }

    /// Register a bean, replacing any bean already registered under the same name
    ///
    /// Replacement keeps the original registration position so scan ordering
    /// is unaffected by re-registration.
    pub fn register(&self, bean: RegisteredBean) {
        let mut beans = self.beans.write().unwrap();
        if let Some(existing) = beans.iter_mut().find(|b| b.name == bean.name) {
            *existing = bean;
        } else {
            beans.push(bean);
        }
    }

    /// Remove a bean by canonical name
    ///
    /// Returns `true` if a bean was registered under that name.
    pub fn deregister(&self, name: &BeanName) -> bool {
        let mut beans = self.beans.write().unwrap();
        let before = beans.len();
        beans.retain(|b| &b.name != name);
        beans.len() != before
    }

    /// Number of registered beans
    pub fn bean_count(&self) -> usize {
        self.beans.read().unwrap().len()
    }
}

impl MBeanRegistry for LocalRegistry {
    fn find_beans(&self, name_pattern: &str) -> Result<Vec<BeanName>, PatternError> {
        let matcher = compile_full_match(name_pattern)?;
        let beans = self.beans.read().unwrap();
        Ok(beans
            .iter()
            .filter(|b| matcher.is_match(b.name.as_str()))
            .map(|b| b.name.clone())
            .collect())
    }

    fn find_attributes(
        &self,
        bean: &BeanName,
        attribute_pattern: &str,
    ) -> Result<Vec<AttributeReading>, ReadError> {
        let matcher = compile_full_match(attribute_pattern)?;
        let beans = self.beans.read().unwrap();
        let registered = beans
            .iter()
            .find(|b| &b.name == bean)
            .ok_or_else(|| ReadError::BeanVanished(bean.to_string()))?;

        let mut readings = Vec::new();
        for attribute in &registered.attributes {
            if !matcher.is_match(&attribute.name) {
                continue;
            }
            let value = (attribute.supplier)()
                .map_err(|e| ReadError::AttributeAccess(attribute.name.clone(), e))?;
            readings.push(AttributeReading::new(
                bean.clone(),
                attribute.name.clone(),
                value,
            ));
        }
        Ok(readings)
    }
}
