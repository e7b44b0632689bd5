use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, scan::entities::ScanImage};

/// OCR client trait for extracting raw text out of a label image
#[cfg_attr(test, mockall::automock)]
pub trait OcrClient: Send + Sync {
    /// Returns the recognized text, empty when nothing was recognized.
    fn extract_text(
        &self,
        image: ScanImage,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
