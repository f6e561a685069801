//! Key/value collaborators the mapper reads from and writes to.

mod env;
mod error;
mod toml_store;

pub use env::EnvSource;
pub use error::StoreError;
pub use toml_store::TomlStore;

use std::collections::{BTreeMap, HashMap};

use crate::BoxError;

/// Looks up string values by key.
pub trait KeyValueGetter {
    fn get(&self, key: &str) -> Option<String>;
}

/// Stores string values by key.
pub trait KeyValueSetter {
    fn set(&mut self, key: &str, value: &str) -> Result<(), BoxError>;
}

/// Stores typed values by key.
pub trait KeyValueRawSetter {
    fn set_raw(&mut self, key: &str, value: toml::Value) -> Result<(), BoxError>;
}

/// Rewrites explicit key names, e.g. to fill in a `%s` placeholder.
pub trait KeyProcessor {
    fn process_key(&self, key: &str) -> String;
}

impl<F> KeyProcessor for F
where
    F: Fn(&str) -> String,
{
    fn process_key(&self, key: &str) -> String {
        self(key)
    }
}

/// Replaces every `%s` in a key name with a fixed string.
#[derive(Debug, Clone)]
pub struct Placeholder {
    replacement: String,
}

impl Placeholder {
    pub fn new(replacement: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
        }
    }
}

impl KeyProcessor for Placeholder {
    fn process_key(&self, key: &str) -> String {
        key.replace("%s", &self.replacement)
    }
}

impl<T: KeyValueGetter + ?Sized> KeyValueGetter for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<T: KeyValueGetter + ?Sized> KeyValueGetter for &mut T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<T: KeyValueSetter + ?Sized> KeyValueSetter for &mut T {
    fn set(&mut self, key: &str, value: &str) -> Result<(), BoxError> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueRawSetter + ?Sized> KeyValueRawSetter for &mut T {
    fn set_raw(&mut self, key: &str, value: toml::Value) -> Result<(), BoxError> {
        (**self).set_raw(key, value)
    }
}

impl KeyValueGetter for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl KeyValueSetter for HashMap<String, String> {
    fn set(&mut self, key: &str, value: &str) -> Result<(), BoxError> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl KeyValueRawSetter for HashMap<String, toml::Value> {
    fn set_raw(&mut self, key: &str, value: toml::Value) -> Result<(), BoxError> {
        self.insert(key.to_string(), value);
        Ok(())
    }
}

impl KeyValueGetter for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl KeyValueSetter for BTreeMap<String, String> {
    fn set(&mut self, key: &str, value: &str) -> Result<(), BoxError> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl KeyValueRawSetter for BTreeMap<String, toml::Value> {
    fn set_raw(&mut self, key: &str, value: toml::Value) -> Result<(), BoxError> {
        self.insert(key.to_string(), value);
        Ok(())
    }
}
