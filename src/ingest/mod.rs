//! Ingestion module for turning extracted document text into structured
//! documents

pub mod parser;

pub use parser::*;
