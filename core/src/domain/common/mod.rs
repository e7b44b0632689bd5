use std::{path::PathBuf, time::Duration};

use chrono::{DateTime, Local};

pub mod entities;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

#[derive(Clone, Debug)]
pub struct FoodGuardConfig {
    pub llm: LLMConfig,
    pub ocr: OcrConfig,
    pub food_database: FoodDatabaseConfig,
    pub scan: ScanConfig,
    pub storage: StorageConfig,
    /// Upper bound for every outbound HTTP call.
    pub request_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

#[derive(Clone, Debug)]
pub struct OcrConfig {
    pub api_key: String,
    pub endpoint: String,
    pub language: String,
}

#[derive(Clone, Debug)]
pub struct FoodDatabaseConfig {
    pub base_url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Lookups issued concurrently per classification batch.
    pub batch_size: usize,
    /// Length cap of the canonical ingredient list.
    pub max_ingredients: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            max_ingredients: 15,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub state_file: PathBuf,
}

pub fn generate_timestamp() -> DateTime<Local> {
    Local::now()
}

/// Formats a timestamp the way a browser renders `Date::toLocaleString` for en-US.
pub fn format_locale_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
