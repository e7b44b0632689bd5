pub mod get_history;
pub mod select_history_entry;
