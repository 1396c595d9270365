//! BM25 Okapi index over a fixed corpus.
//!
//! Document length is the number of tokens handed in for that document; for a
//! [`crate::Corpus`] that is the size of its token set. Terms whose raw idf is
//! negative (present in more than half the documents) are floored at
//! `EPSILON * average_idf`.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use catalog_core::traits::LexicalScorer;

pub const K1: f64 = 1.5;
pub const B: f64 = 0.75;
pub const EPSILON: f64 = 0.25;

/// A single entry in a term's postings list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc: u32,
    pub term_frequency: u32,
}

/// Precomputed term statistics. Immutable once built.
///
/// Term tables are ordered so the idf average is summed in the same order on
/// every build; equal corpora give bit-identical scores.
#[derive(Debug, Clone, Default)]
pub struct Bm25Index {
    postings: BTreeMap<String, Vec<Posting>>,
    idf: BTreeMap<String, f64>,
    doc_lengths: Vec<u32>,
    avgdl: f64,
}

impl Bm25Index {
    /// Build from per-document token lists, in corpus order.
    pub fn build<'a, I, D>(docs: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = &'a String>,
    {
        let mut postings: BTreeMap<String, Vec<Posting>> = BTreeMap::new();
        let mut doc_lengths = Vec::new();
        let mut total_len: u64 = 0;

        for (doc, tokens) in docs.into_iter().enumerate() {
            let mut tf: HashMap<&str, u32> = HashMap::new();
            let mut len: u32 = 0;
            for token in tokens {
                *tf.entry(token.as_str()).or_insert(0) += 1;
                len += 1;
            }
            for (term, term_frequency) in tf {
                postings.entry(term.to_string()).or_default().push(Posting {
                    doc: doc as u32,
                    term_frequency,
                });
            }
            doc_lengths.push(len);
            total_len += u64::from(len);
        }

        let n = doc_lengths.len() as f64;
        let avgdl = if doc_lengths.is_empty() { 0.0 } else { total_len as f64 / n };

        let mut idf = BTreeMap::new();
        let mut idf_sum = 0.0;
        let mut negative = Vec::new();
        for (term, list) in &postings {
            let df = list.len() as f64;
            let value = (n - df + 0.5).ln() - (df + 0.5).ln();
            idf_sum += value;
            if value < 0.0 {
                negative.push(term.clone());
            }
            idf.insert(term.clone(), value);
        }
        if !negative.is_empty() {
            let average_idf = idf_sum / idf.len() as f64;
            let floor = (EPSILON * average_idf).max(0.0);
            for term in negative {
                idf.insert(term, floor);
            }
        }

        Self { postings, idf, doc_lengths, avgdl }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.postings.len()
    }

    pub fn average_doc_length(&self) -> f64 {
        self.avgdl
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }
}

impl LexicalScorer for Bm25Index {
    fn doc_count(&self) -> usize {
        self.doc_lengths.len()
    }

    fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    fn get_scores(&self, query_tokens: &BTreeSet<String>) -> Vec<f64> {
        let mut scores = vec![0.0; self.doc_lengths.len()];
        for token in query_tokens {
            let (Some(list), Some(&idf)) = (self.postings.get(token), self.idf.get(token)) else {
                continue;
            };
            for posting in list {
                let dl = f64::from(self.doc_lengths[posting.doc as usize]);
                let tf = f64::from(posting.term_frequency);
                let norm = tf + K1 * (1.0 - B + B * dl / self.avgdl);
                scores[posting.doc as usize] += idf * tf * (K1 + 1.0) / norm;
            }
        }
        scores
    }
}
