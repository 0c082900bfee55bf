//! studynote-ai: client for the generative-language API
//!
//! This crate provides two stateless operations over the hosted model:
//!
//! - [`GeminiClient::summarize`]: condense a note body into a short summary
//! - [`GeminiClient::generate_study_guide`]: produce a summary, flashcards,
//!   and quiz questions for a topic
//!
//! The model does not guarantee pure JSON output for the study-guide
//! prompt, so the response text goes through best-effort JSON extraction
//! followed by fail-closed shape validation. Every failure surfaces as a
//! tagged [`AiError`]; nothing panics past this boundary.

pub mod client;
pub mod error;
pub mod extract;

pub use client::{AiConfig, GeminiClient};
pub use error::{AiError, AiResult};
pub use extract::extract_json_object;
