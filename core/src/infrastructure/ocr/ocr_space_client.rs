use std::time::Duration;

use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::Deserialize;
use tracing::{debug, error};

use crate::domain::{
    common::{OcrConfig, entities::app_errors::CoreError},
    scan::{entities::ScanImage, ports::OcrClient},
};

/// Client for OCR.space compatible text extraction endpoints.
#[derive(Debug, Clone)]
pub struct OcrSpaceClient {
    api_key: String,
    endpoint: String,
    language: String,
    client: Client,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrResponse {
    #[serde(default)]
    parsed_results: Option<Vec<ParsedResult>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    parsed_text: Option<String>,
}

impl OcrResponse {
    fn parsed_text(self) -> String {
        self.parsed_results
            .and_then(|results| results.into_iter().next())
            .and_then(|result| result.parsed_text)
            .unwrap_or_default()
    }
}

impl OcrSpaceClient {
    pub fn new(config: &OcrConfig, timeout: Duration) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            error!("failed to build OCR HTTP client: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(Self {
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            language: config.language.clone(),
            client,
        })
    }

    fn build_form(&self, image: ScanImage) -> Result<Form, CoreError> {
        let form = Form::new()
            .text("apikey", self.api_key.clone())
            .text("language", self.language.clone())
            .text("isOverlayRequired", "false");

        match image.blob {
            Some(blob) => {
                let extension = image.mime_type.trim_start_matches("image/").to_string();
                let part = Part::bytes(blob.to_vec())
                    .file_name(format!("label.{}", extension))
                    .mime_str(&image.mime_type)
                    .map_err(|e| CoreError::InvalidImage(e.to_string()))?;
                Ok(form.part("file", part))
            }
            None => Ok(form.text("base64Image", image.data_url)),
        }
    }
}

impl OcrClient for OcrSpaceClient {
    async fn extract_text(&self, image: ScanImage) -> Result<String, CoreError> {
        let form = self.build_form(image)?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("OCR request failed: {}", e);
                CoreError::ExternalServiceError(format!("OCR API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("OCR API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "OCR API returned error: {} - {}",
                status, error_text
            )));
        }

        let ocr_response: OcrResponse = response.json().await.map_err(|e| {
            error!("Failed to parse OCR response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse OCR response: {}", e))
        })?;

        let text = ocr_response.parsed_text();
        debug!(characters = text.chars().count(), "OCR text extracted");
        Ok(text)
    }
}
