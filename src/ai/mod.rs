//! Hosted model access for the abstractive path

pub mod client;

// Re-export main types for convenience
pub use client::InferenceClient;
