use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

use catalog_core::traits::LexicalScorer;
use catalog_text::{Bm25Index, Corpus, Tokenizer};

const CATALOG: &str = "\
ID,SKU,Name,Short description,Weight (lbs),Width (in),Length (in),Categories
1,230025,Quadruplex Aluminum Cable,Service drop,410,1.2,1000,Cable
2,200010,Shielded Motor Drop,4-conductor shielded drop cable,608,1.5,12000,Cable
3,170110,UF/NMC-B,Underground feeder,55,0.6,250,Wire
4,240078,Cable in Conduit,Pre-installed conductors,700,1.4,2500,Conduit
5,300001,Wire Nut,Twist-on connector,,,,Connectors
";

fn load() -> (TempDir, Corpus, Tokenizer) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data.csv");
    fs::write(&path, CATALOG).unwrap();
    let tokenizer = Tokenizer::new();
    let corpus = Corpus::load(&path, &tokenizer).expect("corpus");
    (tmp, corpus, tokenizer)
}

#[test]
fn corpus_keeps_catalog_order_and_tokens() {
    let (_tmp, corpus, _) = load();
    assert_eq!(corpus.len(), 5);
    assert_eq!(corpus.get(1).unwrap().sku, "200010");
    assert!(corpus.get(1).unwrap().tokens.contains("4-conductor"));
    assert!(corpus.get(4).unwrap().dimensions.weight.is_none());
    assert!(corpus.get(5).is_none());
}

#[test]
fn sku_lookup_ignores_case_and_takes_first() {
    let (_tmp, corpus, _) = load();
    assert_eq!(corpus.find_sku("240078"), Some(3));
    assert_eq!(corpus.find_sku("nope"), None);
    assert_eq!(corpus.find_sku(""), None);
}

#[test]
fn compound_query_ranks_its_document_first() {
    let (_tmp, corpus, tokenizer) = load();
    let index = Bm25Index::build(corpus.token_sets());
    assert_eq!(index.doc_count(), corpus.len());

    let query = tokenizer.tokenize("4-conductor");
    let scores = index.get_scores(&query);
    let best = scores
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(best, 1);
}

#[test]
fn empty_query_and_empty_corpus_are_all_zero() {
    let (_tmp, corpus, _) = load();
    let index = Bm25Index::build(corpus.token_sets());
    assert!(index.get_scores(&BTreeSet::new()).iter().all(|s| *s == 0.0));

    let empty = Corpus::build(Vec::new(), &Tokenizer::new());
    let index = Bm25Index::build(empty.token_sets());
    assert!(index.get_scores(&BTreeSet::from(["cable".to_string()])).is_empty());
}
