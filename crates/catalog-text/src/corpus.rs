//! Immutable, index-addressed collection of catalog records.
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

use catalog_core::catalog::{read_catalog, CatalogRow};
use catalog_core::error::Result;
use catalog_core::types::ProductRecord;

use crate::tokenizer::Tokenizer;

/// Records in catalog order. Position `i` names the same record for the
/// lifetime of the corpus; a reload builds a new `Corpus`.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<ProductRecord>,
}

impl Corpus {
    pub fn build(rows: Vec<CatalogRow>, tokenizer: &Tokenizer) -> Self {
        let records: Vec<ProductRecord> = rows
            .into_iter()
            .map(|row| {
                let search_text = row.search_text();
                let tokens = tokenizer.tokenize(&search_text);
                row.into_record(search_text, tokens)
            })
            .collect();
        info!(documents = records.len(), "built corpus");
        Self { records }
    }

    /// Read and build in one step. Any read failure is returned; nothing partial is kept.
    pub fn load(path: &Path, tokenizer: &Tokenizer) -> Result<Self> {
        let rows = read_catalog(path)?;
        Ok(Self::build(rows, tokenizer))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, doc: usize) -> Option<&ProductRecord> {
        self.records.get(doc)
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn token_sets(&self) -> impl Iterator<Item = &BTreeSet<String>> + '_ {
        self.records.iter().map(|r| &r.tokens)
    }

    /// First record whose SKU equals `sku` ignoring case. An empty SKU never matches.
    pub fn find_sku(&self, sku: &str) -> Option<usize> {
        if sku.is_empty() {
            return None;
        }
        let needle = sku.to_lowercase();
        self.records
            .iter()
            .position(|r| r.sku.to_lowercase() == needle)
    }
}
