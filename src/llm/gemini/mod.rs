//! Gemini provider implementation
//!
//! This module provides a provider for Google's Gemini models via the public
//! Generative Language API, implementing the LlmProvider trait.

pub mod client;
pub mod types;

// Re-export main types for convenience
pub use client::GeminiProvider;
