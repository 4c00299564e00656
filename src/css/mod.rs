//! CSS engine: splitter, rule parser, model, cascade dedup, serializer.

pub mod tokenizer;
pub mod model;
pub mod warning;
pub mod parser;
pub mod dedup;
pub mod serializer;
