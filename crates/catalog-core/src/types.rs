//! Domain types shared by the text index and the ranker.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub const DEFAULT_MAX_RESULTS: usize = 100;

/// A physical measurement the catalog carries per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Weight,
    Length,
    Width,
    Height,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Weight,
        Dimension::Length,
        Dimension::Width,
        Dimension::Height,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Weight => "weight",
            Dimension::Length => "length",
            Dimension::Width => "width",
            Dimension::Height => "height",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional value per dimension. `None` means absent, never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Dimensions {
    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Weight => self.weight,
            Dimension::Length => self.length,
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: Option<f64>) {
        let slot = match dimension {
            Dimension::Weight => &mut self.weight,
            Dimension::Length => &mut self.length,
            Dimension::Width => &mut self.width,
            Dimension::Height => &mut self.height,
        };
        *slot = value;
    }

    /// Present values in `Dimension::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL
            .into_iter()
            .filter_map(move |d| self.get(d).map(|v| (d, v)))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// One immutable catalog entry.
///
/// - `id` / `sku`: catalog identity; `sku` is unique per variant
/// - `external_id`: reference into the storefront database
/// - `dimensions`: parsed numeric measurements, `None` when the cell was
///   missing or not a finite number
/// - `search_text`: the fixed-order concatenation of descriptive columns
/// - `tokens`: the tokenized form of `search_text`
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub tax_status: String,
    pub in_stock: Option<bool>,
    pub dimensions: Dimensions,
    pub regular_price: Option<f64>,
    pub categories: Vec<String>,
    pub external_id: String,
    pub search_text: String,
    pub tokens: BTreeSet<String>,
}

/// A single search request.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub text: String,
    pub targets: Dimensions,
    pub sku: Option<String>,
    pub max_results: usize,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            targets: Dimensions::default(),
            sku: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn target(mut self, dimension: Dimension, value: f64) -> Self {
        self.targets.set(dimension, Some(value));
        self
    }

    pub fn weight(self, value: f64) -> Self {
        self.target(Dimension::Weight, value)
    }

    pub fn length(self, value: f64) -> Self {
        self.target(Dimension::Length, value)
    }

    pub fn width(self, value: f64) -> Self {
        self.target(Dimension::Width, value)
    }

    pub fn height(self, value: f64) -> Self {
        self.target(Dimension::Height, value)
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// True when any dimension target or a SKU was supplied.
    pub fn has_dim_params(&self) -> bool {
        !self.targets.is_empty() || self.sku.is_some()
    }
}

/// Display-only distance between a requested and a catalog measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionDelta {
    Value(f64),
    NotApplicable,
}

impl Serialize for DimensionDelta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DimensionDelta::Value(v) => serializer.serialize_f64(*v),
            DimensionDelta::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

/// A ranked candidate. Borrows its record from the corpus it was scored against.
#[derive(Debug, Clone)]
pub struct ScoredResult<'c> {
    pub doc: usize,
    pub record: &'c ProductRecord,
    pub text_score: f64,
    /// `None` when the query carried no dimension parameters.
    pub dim_score: Option<f64>,
    pub combined_score: f64,
    pub matched_terms: Vec<String>,
    pub differences: BTreeMap<Dimension, DimensionDelta>,
}
