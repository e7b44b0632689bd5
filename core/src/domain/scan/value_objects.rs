use bytes::Bytes;

#[derive(Debug, Clone)]
pub enum SelectImageInput {
    /// Multipart file upload.
    Upload { data: Bytes, mime_type: String },
    /// Data URL produced by a client-side camera capture.
    Capture { data_url: String },
}
