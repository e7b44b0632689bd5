pub mod food_database;
pub mod history;
pub mod llm;
pub mod local_store;
pub mod ocr;
pub mod profile;
