pub mod ask_about_card;
pub mod capture_image;
pub mod get_cards;
pub mod get_current_scan;
pub mod scan_label;
pub mod select_image;
