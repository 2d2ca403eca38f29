// src/node/config_loader.rs

use anyhow::Context;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Key/value pairs of one section, kept in the order the file lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSection {
    entries: Vec<(String, String)>,
}

impl ConfigSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`; an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigSection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut section = Self::new();
        for (k, v) in iter {
            section.insert(k, v);
        }
        section
    }
}

/// section → key → value
pub type ConfigTree = BTreeMap<String, ConfigSection>;

/// Loads the node configuration into a generic key/value tree.
pub trait ConfigLoader: Send + Sync {
    fn load(&self) -> anyhow::Result<ConfigTree>;
}

/// Reads an INI file on every `load`, so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct IniConfigLoader {
    path: PathBuf,
}

impl IniConfigLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ConfigLoader for IniConfigLoader {
    fn load(&self) -> anyhow::Result<ConfigTree> {
        let name = self
            .path
            .to_str()
            .context("node config path is not valid utf-8")?;
        let raw = ::config::Config::builder()
            .add_source(::config::File::new(name, ::config::FileFormat::Ini))
            .build()
            .with_context(|| format!("failed to load node config {}", self.path.display()))?;
        let top = raw
            .try_deserialize::<HashMap<String, ::config::Value>>()
            .with_context(|| format!("failed to read node config {}", self.path.display()))?;

        let mut tree = ConfigTree::new();
        for (section, value) in top {
            // keys outside any [section] are plain strings, not tables
            let Ok(table) = value.into_table() else {
                continue;
            };
            // `preserve_order` keeps the table in file order
            let mut entries = ConfigSection::new();
            for (key, v) in table {
                let text = v
                    .into_string()
                    .with_context(|| format!("value of {}.{} is not a string", section, key))?;
                entries.insert(key, text);
            }
            tree.insert(section, entries);
        }
        Ok(tree)
    }
}
