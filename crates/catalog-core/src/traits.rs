use std::collections::BTreeSet;

/// Lexical relevance over a fixed corpus.
///
/// `get_scores` returns one non-negative score per document, aligned with
/// corpus order. An empty token set scores every document `0.0`.
pub trait LexicalScorer: Send + Sync {
    fn doc_count(&self) -> usize;
    fn contains_term(&self, term: &str) -> bool;
    fn get_scores(&self, query_tokens: &BTreeSet<String>) -> Vec<f64>;
}
