//! Prompt templates sent to the reasoning service

pub mod template;

pub use template::TrialPromptTemplate;
