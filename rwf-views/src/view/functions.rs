//! Functions and filters available to every template.
//!
//! The table is bound into the layouts and partials when they are compiled, and every
//! page compiled on top of them inherits it.
//!
//! # Example
//!
//! ```
//! use rwf_views::view::Functions;
//! use rwf_views::view::Value;
//!
//! let functions = Functions::new()
//!     .function("year", |_args| Ok(Value::from(2024)))?
//!     .filter("shout", |value, _args| {
//!         let text = value.as_str().unwrap_or_default();
//!         Ok(Value::from(text.to_uppercase()))
//!     })?;
//!
//! assert_eq!(functions.len(), 2);
//! # Ok::<(), rwf_views::view::Error>(())
//! ```
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tera::{Tera, Value};

use super::Error;

/// Function callable from templates, e.g. `{{ now(format="%Y") }}`.
pub type FunctionFn = dyn Fn(&HashMap<String, Value>) -> tera::Result<Value> + Send + Sync;

/// Filter applied to a value, e.g. `{{ name | shout }}`.
pub type FilterFn = dyn Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync;

/// Typed table of template functions and filters.
#[derive(Clone, Default)]
pub struct Functions {
    functions: BTreeMap<String, Arc<FunctionFn>>,
    filters: BTreeMap<String, Arc<FilterFn>>,
}

impl Functions {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function.
    ///
    /// The name must be a valid identifier and not already used by another function.
    pub fn function<F>(mut self, name: &str, function: F) -> Result<Self, Error>
    where
        F: Fn(&HashMap<String, Value>) -> tera::Result<Value> + Send + Sync + 'static,
    {
        validate(name)?;

        if self.functions.contains_key(name) {
            return Err(Error::Function(name.to_string(), "already registered"));
        }

        self.functions.insert(name.to_string(), Arc::new(function));
        Ok(self)
    }

    /// Register a filter.
    ///
    /// The name must be a valid identifier and not already used by another filter.
    pub fn filter<F>(mut self, name: &str, filter: F) -> Result<Self, Error>
    where
        F: Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync + 'static,
    {
        validate(name)?;

        if self.filters.contains_key(name) {
            return Err(Error::Function(name.to_string(), "already registered"));
        }

        self.filters.insert(name.to_string(), Arc::new(filter));
        Ok(self)
    }

    /// Number of functions and filters registered.
    pub fn len(&self) -> usize {
        self.functions.len() + self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make the table available to templates compiled by this Tera instance.
    ///
    /// Functions are shared, not copied: every clone of the instance calls the same closures.
    pub(crate) fn bind(&self, tera: &mut Tera) {
        for (name, function) in &self.functions {
            let function = function.clone();
            tera.register_function(name, move |args: &HashMap<String, Value>| function(args));
        }

        for (name, filter) in &self.filters {
            let filter = filter.clone();
            tera.register_filter(
                name,
                move |value: &Value, args: &HashMap<String, Value>| filter(value, args),
            );
        }
    }
}

impl fmt::Debug for Functions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Functions")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn validate(name: &str) -> Result<(), Error> {
    let mut chars = name.chars();

    match chars.next() {
        None => return Err(Error::Function(name.to_string(), "name is empty")),
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            return Err(Error::Function(
                name.to_string(),
                "name must start with a letter or underscore",
            ))
        }
        _ => (),
    }

    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(Error::Function(
            name.to_string(),
            "name can only contain letters, digits and underscores",
        ))
    }
}
