use crate::types::ExtractionRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version constants for cache invalidation
pub mod versions {
    pub const CRATE_VERSION: &str = "0.1.0";
    pub const PARSER_VERSION: &str = "1.0.0";
}

/// Cache key (content + config → extraction)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ExtractionCacheKey {
    pub content_hash: String,
    pub config_hash: String,
    pub crate_version: String,
    pub parser_version: String,
}

impl ExtractionCacheKey {
    pub fn new(content_hash: String, config_hash: String) -> Self {
        Self {
            content_hash,
            config_hash,
            crate_version: versions::CRATE_VERSION.to_string(),
            parser_version: versions::PARSER_VERSION.to_string(),
        }
    }

    /// Compute cache key hash for storage
    pub fn to_cache_hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(&self.content_hash);
        hasher.update(&self.config_hash);
        hasher.update(&self.crate_version);
        hasher.update(&self.parser_version);
        format!("{:x}", hasher.finalize())
    }
}

/// Cache value (extraction record with metadata)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionCacheValue {
    pub record: ExtractionRecord,
    pub created_at: DateTime<Utc>,
    pub processing_time_us: u64,
    pub cache_version: String,
}

impl ExtractionCacheValue {
    pub fn new(record: ExtractionRecord, processing_time_us: u64) -> Self {
        Self {
            record,
            created_at: Utc::now(),
            processing_time_us,
            cache_version: versions::CRATE_VERSION.to_string(),
        }
    }
}
