//! catalog-rank
//!
//! Combines BM25 relevance with dimensional proximity into ranked catalog
//! results, formats them for callers, and serves them from a reloadable snapshot.
#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod dimension;
pub mod ranker;
pub mod response;
pub mod service;

pub use ranker::CatalogEngine;
pub use response::{FormattedRecord, ResponseStatus, SearchResponse};
pub use service::CatalogService;
