//! Matching module containing the reconciliation engine and the
//! storage-backed verification service

pub mod engine;
pub mod service;

pub use engine::*;
pub use service::*;
