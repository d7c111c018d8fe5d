//! Text generation backed by a single generative-language provider.
//!
//! Everything above this module talks to [`TextGenerator`]; the concrete
//! [`GeminiClient`] is only constructed at startup.

pub mod client;
pub mod gemini;
pub mod prompts;

pub use client::{GenerationError, TextGenerator, TextStream};
pub use gemini::GeminiClient;
