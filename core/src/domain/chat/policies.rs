/// Casual acknowledgements answered with silence.
const IGNORED_PHRASES: [&str; 7] = [
    "thanks",
    "thank you",
    "ok",
    "okay",
    "you're welcome",
    "hi",
    "hello",
];

pub fn is_ignored(message: &str) -> bool {
    let message = message.trim().to_lowercase();
    message.is_empty() || IGNORED_PHRASES.contains(&message.as_str())
}
