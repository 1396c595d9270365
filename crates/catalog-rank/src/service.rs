//! Hot-swappable catalog engine.
//!
//! Queries run against an `Arc` snapshot; `reload` builds the replacement
//! engine without holding the lock and swaps it in with one pointer write, so
//! in-flight queries keep the snapshot they started with.

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use catalog_core::error::Result;
use catalog_core::types::Query;

use crate::ranker::CatalogEngine;
use crate::response::SearchResponse;

pub struct CatalogService {
    source: PathBuf,
    current: RwLock<Arc<CatalogEngine>>,
}

impl CatalogService {
    /// Build the first engine from `source`. Failure here must stop startup.
    pub fn load(source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        let engine = CatalogEngine::load(&source)?;
        info!(source = %source.display(), documents = engine.corpus().len(), "catalog service ready");
        Ok(Self { source, current: RwLock::new(Arc::new(engine)) })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn snapshot(&self) -> Arc<CatalogEngine> {
        Arc::clone(&self.current.read())
    }

    /// Rebuild from the source and swap. On failure the previous engine keeps serving.
    pub fn reload(&self) -> Result<usize> {
        match CatalogEngine::load(&self.source) {
            Ok(engine) => {
                let documents = engine.corpus().len();
                *self.current.write() = Arc::new(engine);
                info!(source = %self.source.display(), documents, "catalog reloaded");
                Ok(documents)
            }
            Err(e) => {
                warn!(source = %self.source.display(), error = %e, "catalog reload failed; keeping previous index");
                Err(e)
            }
        }
    }

    pub fn get_response(&self, query: &Query) -> SearchResponse {
        self.snapshot().get_response(query)
    }
}
