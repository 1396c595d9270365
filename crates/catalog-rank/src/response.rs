//! Public response shape: a status line plus allow-listed product fields.
//!
//! Product keys reuse the catalog column names (`ID`, `SKU`, `Supabase_ID`, ...)
//! so callers can key on the same names they see in the catalog.

use serde::{Serialize, Serializer};
use std::fmt;

use catalog_core::traits::LexicalScorer;
use catalog_core::types::{Dimension, Dimensions, Query, ScoredResult};

use crate::ranker::CatalogEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    SkuMatch,
    NoProducts,
    Found(usize),
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::SkuMatch => f.write_str("SKU match found"),
            ResponseStatus::NoProducts => f.write_str("No products found"),
            ResponseStatus::Found(n) => write!(f, "{n} products found"),
        }
    }
}

impl Serialize for ResponseStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Short description")]
    pub short_description: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Tax status")]
    pub tax_status: String,
    #[serde(rename = "In stock?")]
    pub in_stock: Option<bool>,
    #[serde(rename = "Weight (lbs)")]
    pub weight: Option<f64>,
    #[serde(rename = "Length (in)")]
    pub length: Option<f64>,
    #[serde(rename = "Width (in)")]
    pub width: Option<f64>,
    #[serde(rename = "Regular price")]
    pub regular_price: Option<f64>,
    #[serde(rename = "Categories")]
    pub categories: Vec<String>,
    #[serde(rename = "Supabase_ID")]
    pub external_id: String,
    pub search_text: String,
    pub score: f64,
    pub text_score: f64,
    pub dim_score: Option<f64>,
    pub matched_terms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_height: Option<f64>,
}

impl FormattedRecord {
    /// Project a ranked result, echoing the query's dimension targets.
    pub fn project(result: &ScoredResult<'_>, targets: &Dimensions) -> Self {
        let record = result.record;
        Self {
            id: record.id.clone(),
            sku: record.sku.clone(),
            name: record.name.clone(),
            short_description: record.short_description.clone(),
            description: record.description.clone(),
            tax_status: record.tax_status.clone(),
            in_stock: record.in_stock,
            weight: record.dimensions.weight,
            length: record.dimensions.length,
            width: record.dimensions.width,
            regular_price: record.regular_price,
            categories: record.categories.clone(),
            external_id: record.external_id.clone(),
            search_text: record.search_text.clone(),
            score: result.combined_score,
            text_score: result.text_score,
            dim_score: result.dim_score,
            matched_terms: result.matched_terms.clone(),
            target_weight: targets.get(Dimension::Weight),
            target_length: targets.get(Dimension::Length),
            target_width: targets.get(Dimension::Width),
            target_height: targets.get(Dimension::Height),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub status: ResponseStatus,
    pub products: Vec<FormattedRecord>,
}

impl SearchResponse {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<L: LexicalScorer> CatalogEngine<L> {
    /// Search and format in one call. Never fails; an empty corpus reports no products.
    pub fn get_response(&self, query: &Query) -> SearchResponse {
        if let Some(hit) = self.sku_match(query) {
            return SearchResponse {
                status: ResponseStatus::SkuMatch,
                products: vec![FormattedRecord::project(&hit, &query.targets)],
            };
        }
        let products: Vec<FormattedRecord> = self
            .search(query)
            .iter()
            .map(|r| FormattedRecord::project(r, &query.targets))
            .collect();
        let status = if products.is_empty() {
            ResponseStatus::NoProducts
        } else {
            ResponseStatus::Found(products.len())
        };
        SearchResponse { status, products }
    }
}
