use crate::cache::{ExtractionCacheKey, ExtractionCacheValue};
use crate::config::ParserConfig;
use crate::parser::ContentParser;
use crate::storage::{
    calculate_config_hash, calculate_content_hash, ExtractionStorage, FileStorage, NoOpStorage,
};
use crate::types::ExtractionRecord;
use anyhow::Result;
use std::time::Instant;
use tracing::debug;

/// Cache-aware front door for proposal extraction. Wraps a [`ContentParser`]
/// with content-addressed result storage so re-processing an unchanged
/// proposal under an unchanged config is a file read.
pub struct ProposalProcessor {
    parser: ContentParser,
    storage: Box<dyn ExtractionStorage + Send + Sync>,
}

impl ProposalProcessor {
    /// Create a processor with full dependency injection
    pub fn new_with_dependencies(
        config: ParserConfig,
        storage: Box<dyn ExtractionStorage + Send + Sync>,
    ) -> Result<Self> {
        Ok(Self {
            parser: ContentParser::with_config(config)?,
            storage,
        })
    }

    /// Convenience constructor with file-backed caching
    pub fn new_with_cache_dir(config: ParserConfig, cache_dir: &str) -> Result<Self> {
        let storage = Box::new(FileStorage::new(cache_dir)?);
        Self::new_with_dependencies(config, storage)
    }

    /// Convenience constructor with caching disabled
    pub fn new_uncached(config: ParserConfig) -> Result<Self> {
        Self::new_with_dependencies(config, Box::new(NoOpStorage::new()))
    }

    pub fn parser(&self) -> &ContentParser {
        &self.parser
    }

    /// Extract all field groups from one proposal, consulting the cache
    /// first and storing the result on a miss.
    pub fn process_content(&self, content: &str) -> Result<ExtractionRecord> {
        let content_hash = calculate_content_hash(content);
        let config_hash = calculate_config_hash(self.parser.config())?;
        let cache_key = ExtractionCacheKey::new(content_hash, config_hash);

        if let Some(cached) = self.storage.get_extraction(&cache_key)? {
            debug!(
                cache_hash = %cache_key.to_cache_hash(),
                "extraction cache hit"
            );
            return Ok(cached.record);
        }

        let start = Instant::now();
        let fields = self.parser.parse_all(content);
        let format = self.parser.classify_format(content);
        let record = ExtractionRecord::new(fields, format);
        let elapsed_us = start.elapsed().as_micros() as u64;

        let cache_value = ExtractionCacheValue::new(record.clone(), elapsed_us);
        self.storage.store_extraction(&cache_key, &cache_value)?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncached_processing_extracts_fields() {
        let processor = ProposalProcessor::new_uncached(ParserConfig::default()).unwrap();
        let content = "### \\[SOLUTION\\] What is it?\nAn on-chain voting dashboard for delegators.\n";
        let record = processor.process_content(content).unwrap();
        let details = record.fields.project_details.unwrap();
        assert_eq!(
            details.get("solution").unwrap(),
            "An on-chain voting dashboard for delegators."
        );
        assert!(record.content_format.is_some());
    }

    #[test]
    fn cached_processing_returns_stored_record() {
        let temp_dir = std::env::temp_dir().join("catalyst_processor_cache_test");
        std::fs::remove_dir_all(&temp_dir).ok();
        let processor = ProposalProcessor::new_with_cache_dir(
            ParserConfig::default(),
            temp_dir.to_str().unwrap(),
        )
        .unwrap();

        let content = "### \\[TEAM\\]\nThree Haskell engineers.\n";
        let first = processor.process_content(content).unwrap();
        let second = processor.process_content(content).unwrap();
        assert_eq!(first.fields, second.fields);
        assert_eq!(first.extracted_at, second.extracted_at);

        std::fs::remove_dir_all(temp_dir).ok();
    }
}
