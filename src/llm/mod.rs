//! LLM client abstraction layer
//!
//! Trait-level request/response types plus the Gemini HTTP backend.

pub mod client;
pub mod gemini;

pub use client::*;
pub use gemini::*;
