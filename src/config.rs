//! The mutable key/value store flag callbacks and positional bindings write
//! into.

use std::collections::BTreeMap;
use std::fmt;

/// A nested `string -> value` mapping, populated as flags are parsed.
///
/// The root store holds global option values plus one nested [`Value::Table`]
/// per dispatched subcommand, keyed by the canonical subcommand name. Keys
/// are unique; the last write wins.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    entries: BTreeMap<String, Value>,
}

#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    List(Vec<String>),
    Table(ConfigStore),
}

impl ConfigStore {
    pub fn new() -> ConfigStore {
        ConfigStore::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.entries.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(Value::as_list)
    }

    pub fn get_table(&self, key: &str) -> Option<&ConfigStore> {
        self.get(key).and_then(Value::as_table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(it) => Some(it),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(it) => Some(it),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&ConfigStore> {
        match self {
            Value::Table(it) => Some(it),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(it: &str) -> Value {
        Value::Str(it.to_string())
    }
}

impl From<String> for Value {
    fn from(it: String) -> Value {
        Value::Str(it)
    }
}

impl From<Vec<String>> for Value {
    fn from(it: Vec<String>) -> Value {
        Value::List(it)
    }
}

impl From<ConfigStore> for Value {
    fn from(it: ConfigStore) -> Value {
        Value::Table(it)
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(it) => fmt::Debug::fmt(it, f),
            Value::List(it) => f.debug_list().entries(it).finish(),
            Value::Table(it) => fmt::Debug::fmt(it, f),
        }
    }
}
