// src/node/storage.rs

use crate::node::types::BlockHash;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// One table row: field name → value, iterated in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableEntry {
    pub fields: BTreeMap<String, String>,
}

impl TableEntry {
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[async_trait]
pub trait TableStore: Send + Sync {
    async fn select(
        &self,
        hash: &BlockHash,
        number: u64,
        table: &str,
        key: &str,
    ) -> anyhow::Result<Vec<TableEntry>>;
}
