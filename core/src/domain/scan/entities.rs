use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError, history::entities::HistoryEntry,
    risk::entities::RiskResult,
};

/// Label image the next scan runs on.
///
/// `blob` is only present for direct uploads; images restored from a data URL
/// (camera capture, history) carry the data URL alone and are sent to OCR as
/// a base64 field instead of a file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanImage {
    pub data_url: String,
    pub blob: Option<Bytes>,
    pub mime_type: String,
}

impl ScanImage {
    pub fn from_upload(blob: Bytes, mime_type: String) -> Result<Self, CoreError> {
        if blob.is_empty() {
            return Err(CoreError::InvalidImage("image cannot be empty".to_string()));
        }
        if !mime_type.starts_with("image/") {
            return Err(CoreError::InvalidImage(format!(
                "unsupported content type: {}",
                mime_type
            )));
        }

        let data_url = format!(
            "data:{};base64,{}",
            mime_type,
            general_purpose::STANDARD.encode(&blob)
        );

        Ok(Self {
            data_url,
            blob: Some(blob),
            mime_type,
        })
    }

    pub fn from_data_url(data_url: String) -> Result<Self, CoreError> {
        let (mime_type, payload) = data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .ok_or_else(|| CoreError::InvalidImage("expected a base64 data URL".to_string()))?;

        if !mime_type.starts_with("image/") {
            return Err(CoreError::InvalidImage(format!(
                "unsupported content type: {}",
                mime_type
            )));
        }

        let decoded = general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| CoreError::InvalidImage(format!("invalid base64 payload: {}", e)))?;
        if decoded.is_empty() {
            return Err(CoreError::InvalidImage("image cannot be empty".to_string()));
        }

        let mime_type = mime_type.to_string();
        Ok(Self {
            data_url,
            blob: None,
            mime_type,
        })
    }

    pub fn preview(&self) -> ImagePreview {
        ImagePreview {
            data_url: self.data_url.clone(),
            mime_type: self.mime_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImagePreview {
    pub data_url: String,
    pub mime_type: String,
}

/// Progress indicator of the active scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScanStep {
    #[default]
    Idle,
    ImageSelected,
    Analyzing,
    Completed,
}

/// User-visible reason a scan stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScanNotice {
    OcrFailed,
    NoTextDetected,
    NoValidIngredients,
}

impl ScanNotice {
    pub fn message(&self) -> &'static str {
        match self {
            ScanNotice::OcrFailed => "❌ OCR failed. Try again.",
            ScanNotice::NoTextDetected => "⚠️ No ingredients detected.",
            ScanNotice::NoValidIngredients => "⚠️ No valid ingredients found to analyze.",
        }
    }
}

/// Where the canonical ingredient list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionSource {
    LanguageModel,
    RawCandidates,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScanReport {
    pub generation: u64,
    pub raw_text: String,
    pub correction: CorrectionSource,
    pub ingredients: Vec<String>,
    pub results: Vec<RiskResult>,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    Completed {
        report: ScanReport,
    },
    Halted {
        generation: u64,
        notice: ScanNotice,
        message: String,
    },
    /// A newer scan started before this one finished; its results were dropped.
    Superseded {
        generation: u64,
    },
}

impl ScanOutcome {
    pub fn halted(generation: u64, notice: ScanNotice) -> Self {
        ScanOutcome::Halted {
            generation,
            notice,
            message: notice.message().to_string(),
        }
    }
}

/// Read model of the session's active scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScanSnapshot {
    pub generation: u64,
    pub step: ScanStep,
    pub preview: Option<ImagePreview>,
    pub ingredients: Vec<String>,
    pub results: Vec<RiskResult>,
}
