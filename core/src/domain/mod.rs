pub mod chat;
pub mod common;
pub mod history;
pub mod presenter;
pub mod profile;
pub mod risk;
pub mod scan;
