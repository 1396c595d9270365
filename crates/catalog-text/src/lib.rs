#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod bm25;
pub mod corpus;
pub mod tokenizer;

pub use bm25::Bm25Index;
pub use corpus::Corpus;
pub use tokenizer::Tokenizer;
