// Catalyst Content Core Library
//
// Extracts structured field groups from Project Catalyst proposal markdown.
// Main interface for turning fund-template content into keyed sections.

pub mod types;
pub mod clean;
pub mod parser;
pub mod patterns;
pub mod cache;
pub mod config;
pub mod classifier;
pub mod processor;
pub mod storage;

mod output;

// Re-export main types and functions for easy use
pub use types::*;
pub use classifier::FormatClassifier;
pub use clean::clean_content;
pub use config::{ConfigError, FallbackConfig, MatchingConfig, ParserConfig};
pub use parser::ContentParser;
pub use processor::ProposalProcessor;
