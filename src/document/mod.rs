pub mod extract;
pub mod handlers;
pub mod models;
pub mod multipart_parser;
pub mod service;

#[cfg(test)]
mod extract_tests;

pub use extract::{extract_text, DocumentError, DocumentFormat};
pub use handlers::config;
