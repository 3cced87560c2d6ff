//! Gemini adapter for the reasoning gateway port.
//!
//! One `generateContent` call per turn with a fixed system instruction and a
//! JSON response schema. The model's text is parsed as JSON and handed back
//! unvalidated.

pub mod error;
pub mod gateway;
pub mod types;
