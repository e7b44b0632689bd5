use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::{format_locale_timestamp, generate_timestamp};

/// Number of scans kept in history.
pub const HISTORY_CAPACITY: usize = 5;

/// Ingredients shown in a history entry summary.
const SUMMARY_INGREDIENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    /// Data URL of the scanned label.
    pub image: String,
    pub summary: String,
    pub date: String,
}

impl HistoryEntry {
    pub fn new(image: String, ingredients: &[String]) -> Self {
        Self {
            image,
            summary: summarize(ingredients),
            date: format_locale_timestamp(&generate_timestamp()),
        }
    }
}

fn summarize(ingredients: &[String]) -> String {
    let summary = ingredients
        .iter()
        .take(SUMMARY_INGREDIENTS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if summary.is_empty() {
        "Unknown".to_string()
    } else {
        summary
    }
}

/// Most-recent-first list of past scans, never longer than [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanHistory(Vec<HistoryEntry>);

impl ScanHistory {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        let mut history = Self(entries);
        history.0.truncate(HISTORY_CAPACITY);
        history
    }

    /// Prepends `entry` and evicts the oldest entries beyond capacity.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.0.insert(0, entry);
        self.0.truncate(HISTORY_CAPACITY);
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.0.get(index)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.0
    }

    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.0
    }
}
