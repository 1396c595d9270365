//! Catalog row schema and loading.
//!
//! Rows are read by column name from CSV (or a JSON array of objects) into
//! [`CatalogRow`], then turned into [`ProductRecord`] once the caller has
//! tokenized [`CatalogRow::search_text`].
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{Dimensions, ProductRecord};

pub const REQUIRED_COLUMNS: [&str; 2] = ["ID", "SKU"];

/// Columns concatenated into `search_text`, in order.
pub const SEARCH_TEXT_COLUMNS: [&str; 25] = [
    "ID",
    "Type",
    "SKU",
    "GTIN, UPC, EAN, or ISBN",
    "Name",
    "Published",
    "Is featured?",
    "Visibility in catalog",
    "Short description",
    "Description",
    "Tax status",
    "In stock?",
    "Stock",
    "Backorders allowed?",
    "Sold individually?",
    "Weight (lbs)",
    "Length (in)",
    "Width (in)",
    "Height (in)",
    "Allow customer reviews?",
    "Regular price",
    "Categories",
    "Position",
    "Meta: _wp_page_template",
    "Supabase_ID",
];

/// One raw catalog row. Every cell is optional text; columns not listed here are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogRow {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "SKU")]
    pub sku: Option<String>,
    #[serde(rename = "GTIN, UPC, EAN, or ISBN")]
    pub gtin: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Published")]
    pub published: Option<String>,
    #[serde(rename = "Is featured?")]
    pub featured: Option<String>,
    #[serde(rename = "Visibility in catalog")]
    pub visibility: Option<String>,
    #[serde(rename = "Short description")]
    pub short_description: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Tax status")]
    pub tax_status: Option<String>,
    #[serde(rename = "In stock?")]
    pub in_stock: Option<String>,
    #[serde(rename = "Stock")]
    pub stock: Option<String>,
    #[serde(rename = "Backorders allowed?")]
    pub backorders: Option<String>,
    #[serde(rename = "Sold individually?")]
    pub sold_individually: Option<String>,
    #[serde(rename = "Weight (lbs)")]
    pub weight: Option<String>,
    #[serde(rename = "Length (in)")]
    pub length: Option<String>,
    #[serde(rename = "Width (in)")]
    pub width: Option<String>,
    #[serde(rename = "Height (in)")]
    pub height: Option<String>,
    #[serde(rename = "Allow customer reviews?")]
    pub reviews_allowed: Option<String>,
    #[serde(rename = "Regular price")]
    pub regular_price: Option<String>,
    #[serde(rename = "Categories")]
    pub categories: Option<String>,
    #[serde(rename = "Position")]
    pub position: Option<String>,
    #[serde(rename = "Meta: _wp_page_template")]
    pub page_template: Option<String>,
    #[serde(rename = "Supabase_ID")]
    pub external_id: Option<String>,
}

impl CatalogRow {
    fn search_fields(&self) -> [&Option<String>; 25] {
        [
            &self.id,
            &self.kind,
            &self.sku,
            &self.gtin,
            &self.name,
            &self.published,
            &self.featured,
            &self.visibility,
            &self.short_description,
            &self.description,
            &self.tax_status,
            &self.in_stock,
            &self.stock,
            &self.backorders,
            &self.sold_individually,
            &self.weight,
            &self.length,
            &self.width,
            &self.height,
            &self.reviews_allowed,
            &self.regular_price,
            &self.categories,
            &self.position,
            &self.page_template,
            &self.external_id,
        ]
    }

    /// Space-joined `SEARCH_TEXT_COLUMNS`, missing cells as empty strings.
    pub fn search_text(&self) -> String {
        self.search_fields()
            .iter()
            .map(|cell| cell.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            weight: parse_measurement(self.weight.as_deref()),
            length: parse_measurement(self.length.as_deref()),
            width: parse_measurement(self.width.as_deref()),
            height: parse_measurement(self.height.as_deref()),
        }
    }

    pub fn into_record(self, search_text: String, tokens: BTreeSet<String>) -> ProductRecord {
        let dimensions = self.dimensions();
        ProductRecord {
            in_stock: parse_flag(self.in_stock.as_deref()),
            regular_price: parse_measurement(self.regular_price.as_deref()),
            categories: split_categories(self.categories.as_deref()),
            id: self.id.unwrap_or_default(),
            sku: self.sku.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            short_description: self.short_description.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            tax_status: self.tax_status.unwrap_or_default(),
            external_id: self.external_id.unwrap_or_default(),
            dimensions,
            search_text,
            tokens,
        }
    }
}

/// Finite number or absent. Zero stays `Some(0.0)`.
pub fn parse_measurement(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

pub fn parse_flag(raw: Option<&str>) -> Option<bool> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("1" | "yes" | "true" | "y") => Some(true),
        Some("0" | "no" | "false" | "n") => Some(false),
        _ => None,
    }
}

fn split_categories(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

fn check_required(present: &[&str]) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !present.contains(*required))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingColumns(missing));
    }
    Ok(())
}

fn log_missing_optional(present: &[&str]) {
    let optional: Vec<&str> = SEARCH_TEXT_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present.contains(col))
        .collect();
    if !optional.is_empty() {
        debug!(columns = ?optional, "catalog lacks optional columns; treating as empty");
    }
}

/// Read a catalog file. `.json` files are parsed as an array of objects, anything else as CSV.
pub fn read_catalog(path: &Path) -> Result<Vec<CatalogRow>> {
    let file = File::open(path).map_err(|source| Error::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let rows = match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => read_json(reader)?,
        _ => read_csv(reader)?,
    };
    info!(path = %path.display(), rows = rows.len(), "read catalog");
    Ok(rows)
}

/// Header row required; `ID` and `SKU` columns must be present.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<CatalogRow>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let headers = reader.headers()?.clone();
    let present: Vec<&str> = headers.iter().collect();
    check_required(&present)?;
    log_missing_optional(&present);
    let mut rows = Vec::new();
    for row in reader.deserialize::<CatalogRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Array of objects keyed by column name. Scalars are stringified so numeric
/// JSON cells go through the same coercion as CSV text; arrays are comma-joined.
///
/// Every object must carry the required columns itself.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<CatalogRow>> {
    let objects: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;
    for object in &objects {
        check_required(&object.keys().map(String::as_str).collect::<Vec<_>>())?;
    }
    if !objects.is_empty() {
        let columns: BTreeSet<&str> = objects.iter().flat_map(|o| o.keys().map(String::as_str)).collect();
        log_missing_optional(&columns.into_iter().collect::<Vec<_>>());
    }
    objects
        .into_iter()
        .map(|object| -> Result<CatalogRow> {
            let cells: Map<String, Value> = object
                .into_iter()
                .filter_map(|(column, value)| cell_text(value).map(|text| (column, Value::String(text))))
                .collect();
            Ok(serde_json::from_value(Value::Object(cells))?)
        })
        .collect()
}

fn cell_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(cell_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}
