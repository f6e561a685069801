//! A key/value store backed by a TOML document.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use super::{KeyValueGetter, KeyValueRawSetter, KeyValueSetter, StoreError};
use crate::BoxError;

/// Keys are dotted paths into the document: `database.port` reads
/// `port` from the `[database]` table.
///
/// Scalars read back as their textual form, arrays as comma lists and
/// tables as `key:value` lists, matching what the codec parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TomlStore {
    table: Table,
}

impl TomlStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: Table) -> Self {
        Self { table }
    }

    /// Loads a TOML file.
    ///
    /// A missing file is an error when `required`, otherwise an empty store.
    pub fn load(path: impl AsRef<Path>, required: bool) -> Result<Self, StoreError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => contents.parse(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if required {
                    Err(StoreError::FileNotFound(path.to_path_buf()))
                } else {
                    Ok(Self::new())
                }
            }
            Err(e) => Err(StoreError::ReadError {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let contents = self.to_toml_string()?;
        std::fs::write(path, contents).map_err(|e| StoreError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, StoreError> {
        Ok(toml::to_string(&self.table)?)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    /// Looks up a dotted path.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let mut current = self.table.get(parts.next()?)?;
        for part in parts {
            current = current.as_table()?.get(part)?;
        }
        Some(current)
    }

    /// Inserts a value at a dotted path, creating intermediate tables.
    ///
    /// Tables are merged into existing tables; anything else is replaced.
    pub fn insert(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let path: Vec<&str> = key.split('.').collect();
        if path.iter().any(|p| p.is_empty()) {
            return Err(StoreError::InvalidKeyPath(key.to_string()));
        }
        insert_at_path(&mut self.table, &path, value);
        Ok(())
    }
}

impl FromStr for TomlStore {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_table(toml::from_str(s)?))
    }
}

impl KeyValueGetter for TomlStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lookup(key).map(value_to_string)
    }
}

impl KeyValueSetter for TomlStore {
    fn set(&mut self, key: &str, value: &str) -> Result<(), BoxError> {
        Ok(self.insert(key, Value::String(value.to_string()))?)
    }
}

impl KeyValueRawSetter for TomlStore {
    fn set_raw(&mut self, key: &str, value: Value) -> Result<(), BoxError> {
        Ok(self.insert(key, value)?)
    }
}

fn insert_at_path(table: &mut Table, path: &[&str], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        match (table.get_mut(*first), value) {
            (Some(Value::Table(base)), Value::Table(overlay)) => deep_merge(base, overlay),
            (_, value) => {
                table.insert(first.to_string(), value);
            }
        }
        return;
    }

    if !matches!(table.get(*first), Some(Value::Table(_))) {
        table.insert(first.to_string(), Value::Table(Table::new()));
    }

    if let Some(Value::Table(nested)) = table.get_mut(*first) {
        insert_at_path(nested, rest, value);
    }
}

fn deep_merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(base_table)), Value::Table(overlay_table)) => {
                deep_merge(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Renders a TOML value in the textual form the codec parses.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(dt) => dt.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Table(table) => table
            .iter()
            .map(|(k, v)| format!("{k}:{}", value_to_string(v)))
            .collect::<Vec<_>>()
            .join(","),
    }
}
