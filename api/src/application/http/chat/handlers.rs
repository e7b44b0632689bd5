pub mod get_transcript;
pub mod send_chat;
