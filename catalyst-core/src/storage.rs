use crate::cache::{ExtractionCacheKey, ExtractionCacheValue};
use anyhow::{anyhow, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Storage abstraction for caching extraction results
pub trait ExtractionStorage {
    fn get_extraction(&self, cache_key: &ExtractionCacheKey) -> Result<Option<ExtractionCacheValue>>;
    fn store_extraction(
        &self,
        cache_key: &ExtractionCacheKey,
        cache_value: &ExtractionCacheValue,
    ) -> Result<()>;
}

/// File-based storage implementation using a local cache directory
pub struct FileStorage {
    cache_dir: String,
}

impl FileStorage {
    pub fn new(cache_dir: &str) -> Result<Self> {
        // Ensure cache directory exists
        fs::create_dir_all(cache_dir)?;
        fs::create_dir_all(format!("{cache_dir}/extractions"))?;

        Ok(Self {
            cache_dir: cache_dir.to_string(),
        })
    }

    fn extraction_path(&self, cache_key: &ExtractionCacheKey) -> String {
        format!(
            "{}/extractions/{}.json",
            self.cache_dir,
            cache_key.to_cache_hash()
        )
    }
}

impl ExtractionStorage for FileStorage {
    fn get_extraction(&self, cache_key: &ExtractionCacheKey) -> Result<Option<ExtractionCacheValue>> {
        let path = self.extraction_path(cache_key);
        if Path::new(&path).exists() {
            let json_str = fs::read_to_string(path)?;
            let cache_value: ExtractionCacheValue = serde_json::from_str(&json_str)
                .map_err(|e| anyhow!("Failed to deserialize cached extraction: {}", e))?;
            Ok(Some(cache_value))
        } else {
            Ok(None)
        }
    }

    fn store_extraction(
        &self,
        cache_key: &ExtractionCacheKey,
        cache_value: &ExtractionCacheValue,
    ) -> Result<()> {
        let path = self.extraction_path(cache_key);
        let json_str = serde_json::to_string_pretty(cache_value)
            .map_err(|e| anyhow!("Failed to serialize extraction for cache: {}", e))?;
        fs::write(path, json_str)?;
        Ok(())
    }
}

/// Calculate hash for proposal content (for the cache key)
pub fn calculate_content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Calculate hash for configuration data (for the cache key)
pub fn calculate_config_hash<T: serde::Serialize>(config: &T) -> Result<String> {
    let config_json = serde_json::to_string(config)
        .map_err(|e| anyhow!("Failed to serialize config for hashing: {}", e))?;

    let mut hasher = Sha256::new();
    hasher.update(config_json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// No-op storage implementation that disables all caching
pub struct NoOpStorage;

impl Default for NoOpStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl NoOpStorage {
    pub fn new() -> Self {
        Self
    }
}

impl ExtractionStorage for NoOpStorage {
    fn get_extraction(
        &self,
        _cache_key: &ExtractionCacheKey,
    ) -> Result<Option<ExtractionCacheValue>> {
        Ok(None) // Always cache miss
    }

    fn store_extraction(
        &self,
        _cache_key: &ExtractionCacheKey,
        _cache_value: &ExtractionCacheValue,
    ) -> Result<()> {
        Ok(()) // No-op
    }
}
