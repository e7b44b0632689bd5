pub mod ocr_space_client;
