//! Score combination and ranking.
//!
//! Lexical (BM25) and dimensional signals are merged per candidate, weak
//! dimensional matches are penalised whenever the caller supplied any
//! dimension parameter, and the ranked list is cut at the single largest
//! score drop.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::ensure;
use tracing::{debug, info};

use catalog_core::catalog::CatalogRow;
use catalog_core::error::Result;
use catalog_core::traits::LexicalScorer;
use catalog_core::types::{DimensionDelta, Query, ScoredResult};
use catalog_text::{Bm25Index, Corpus, Tokenizer};

use crate::dimension::dimensional_score;

pub const DIMENSION_SCORE_MULTIPLIER: f64 = 3.0;
pub const SKU_MATCH_SCORE: f64 = 10.0;
pub const LOW_DIMENSION_SCORE_PENALTY: f64 = 0.25;
pub const DIMENSION_SCORE_THRESHOLD_FACTOR: f64 = 0.5;

/// Tokenizer, corpus and lexical index for one catalog snapshot.
///
/// Read-only after construction; share it behind an `Arc` and query from any
/// number of threads.
pub struct CatalogEngine<L: LexicalScorer = Bm25Index> {
    tokenizer: Tokenizer,
    corpus: Corpus,
    lexical: L,
}

impl CatalogEngine<Bm25Index> {
    pub fn build(rows: Vec<CatalogRow>) -> Self {
        let tokenizer = Tokenizer::new();
        let corpus = Corpus::build(rows, &tokenizer);
        let lexical = Bm25Index::build(corpus.token_sets());
        info!(
            documents = corpus.len(),
            vocabulary = lexical.vocabulary_size(),
            avgdl = lexical.average_doc_length(),
            "built lexical index"
        );
        Self { tokenizer, corpus, lexical }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let rows = catalog_core::catalog::read_catalog(path)?;
        Ok(Self::build(rows))
    }
}

impl<L: LexicalScorer> CatalogEngine<L> {
    /// Pair a corpus with any lexical scorer that scores exactly its documents.
    pub fn with_scorer(tokenizer: Tokenizer, corpus: Corpus, lexical: L) -> anyhow::Result<Self> {
        ensure!(
            lexical.doc_count() == corpus.len(),
            "lexical scorer covers {} documents, corpus has {}",
            lexical.doc_count(),
            corpus.len()
        );
        Ok(Self { tokenizer, corpus, lexical })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn lexical(&self) -> &L {
        &self.lexical
    }

    /// Exact, case-insensitive SKU hit. Bypasses all scoring.
    pub fn sku_match(&self, query: &Query) -> Option<ScoredResult<'_>> {
        let sku = query.sku.as_deref()?;
        let doc = self.corpus.find_sku(sku)?;
        let record = self.corpus.get(doc)?;
        debug!(sku, doc, "SKU short-circuit");
        Some(ScoredResult {
            doc,
            record,
            text_score: SKU_MATCH_SCORE,
            dim_score: Some(SKU_MATCH_SCORE),
            combined_score: SKU_MATCH_SCORE,
            matched_terms: self.tokenizer.tokenize(&query.text).into_iter().collect(),
            differences: BTreeMap::new(),
        })
    }

    /// Ranked candidates for `query`, at most `query.max_results` of them.
    pub fn search(&self, query: &Query) -> Vec<ScoredResult<'_>> {
        if let Some(hit) = self.sku_match(query) {
            return vec![hit];
        }

        let tokens = self.tokenizer.tokenize(&query.text);
        let text_scores = self.lexical.get_scores(&tokens);
        let dim_scores: Option<Vec<f64>> = query.has_dim_params().then(|| {
            self.corpus
                .records()
                .iter()
                .map(|r| dimensional_score(&query.targets, &r.dimensions) * DIMENSION_SCORE_MULTIPLIER)
                .collect()
        });

        let combined = combine_scores(&text_scores, dim_scores.as_deref());
        let order = rank_order(&combined);
        let sorted: Vec<f64> = order.iter().map(|&doc| combined[doc]).collect();
        let keep = cutoff_len(&sorted, query.max_results);

        let matched_terms: Vec<String> = tokens.into_iter().collect();
        let results: Vec<ScoredResult<'_>> = order[..keep]
            .iter()
            .filter_map(|&doc| {
                let record = self.corpus.get(doc)?;
                let differences = if query.has_dim_params() {
                    query
                        .targets
                        .iter()
                        .map(|(dimension, target)| {
                            let delta = match record.dimensions.get(dimension) {
                                Some(actual) => DimensionDelta::Value((target - actual).abs()),
                                None => DimensionDelta::NotApplicable,
                            };
                            (dimension, delta)
                        })
                        .collect()
                } else {
                    BTreeMap::new()
                };
                Some(ScoredResult {
                    doc,
                    record,
                    text_score: text_scores[doc],
                    dim_score: dim_scores.as_ref().map(|d| d[doc]),
                    combined_score: combined[doc],
                    matched_terms: matched_terms.clone(),
                    differences,
                })
            })
            .collect();

        debug!(
            query = %query.text,
            candidates = combined.len(),
            returned = results.len(),
            "ranked catalog search"
        );
        results
    }

    /// Query tokens that occur somewhere in the catalog vocabulary.
    pub fn vocabulary_matches(&self, text: &str) -> Vec<String> {
        let tokens: BTreeSet<String> = self.tokenizer.tokenize(text);
        tokens
            .into_iter()
            .filter(|t| self.lexical.contains_term(t))
            .collect()
    }
}

/// `text + dim`, with weak dimensional matches scaled by `LOW_DIMENSION_SCORE_PENALTY`.
///
/// `dim_scores` is `None` when the query carried no dimension parameters; the
/// text scores then pass through unchanged. A corpus-wide maximum of zero is
/// treated as `1.0`, so every candidate falls under the threshold.
pub fn combine_scores(text_scores: &[f64], dim_scores: Option<&[f64]>) -> Vec<f64> {
    let Some(dim_scores) = dim_scores else {
        return text_scores.to_vec();
    };
    let max_dim = dim_scores.iter().copied().fold(0.0, f64::max);
    let base = if max_dim > 0.0 { max_dim } else { 1.0 };
    let threshold = base * DIMENSION_SCORE_THRESHOLD_FACTOR;
    text_scores
        .iter()
        .zip(dim_scores)
        .map(|(&text, &dim)| {
            let combined = text + dim;
            if dim < threshold { combined * LOW_DIMENSION_SCORE_PENALTY } else { combined }
        })
        .collect()
}

/// Document indices by descending score; ties keep corpus order.
pub fn rank_order(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}

/// Largest gap between consecutive entries of a descending list.
pub fn largest_drop(sorted_scores: &[f64]) -> f64 {
    sorted_scores
        .windows(2)
        .map(|w| w[0] - w[1])
        .fold(0.0, f64::max)
}

/// Number of leading entries of `sorted_scores` to emit.
///
/// Walks at most `max_results` entries, stops at the first non-positive score,
/// and stops before the first entry whose drop from the previous one equals the
/// largest drop of the whole list. Fires at most once.
pub fn cutoff_len(sorted_scores: &[f64], max_results: usize) -> usize {
    let largest = largest_drop(sorted_scores);
    let mut kept = 0;
    let mut prev: Option<f64> = None;
    for &score in sorted_scores.iter().take(max_results) {
        if score <= 0.0 {
            break;
        }
        if prev.is_some_and(|p| p - score == largest) {
            break;
        }
        prev = Some(score);
        kept += 1;
    }
    kept
}
