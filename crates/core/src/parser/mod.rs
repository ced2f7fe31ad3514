//! Tree-sitter front end: Java parsing and element-model extraction

pub mod extractor;
pub mod java_parser;
pub mod utils;

pub use extractor::ElementExtractor;
pub use java_parser::JavaParser;
